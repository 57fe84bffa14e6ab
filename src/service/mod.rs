pub mod clock;
pub mod customers;
pub mod dashboard;
pub mod sections;
pub mod tickets;
