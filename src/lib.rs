/*!
 * Back office core for an internet service provider: customer directory,
 * customer map, trouble ticket tracker and dashboard summary.
 *
 * The collections live in memory. `service` holds the pure filter and
 * lifecycle functions together with the state containers, `api` binds them
 * to JSON endpoints.
 */
pub mod api;
pub mod dao;
pub mod model;
pub mod service;
