pub mod catalog;
pub mod config;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod schedule;
