pub mod apperror;
pub mod config;
pub mod customer;
pub mod models;
pub mod ticket;
