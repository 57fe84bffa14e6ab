pub mod customers;
pub mod seed;
pub mod tickets;
