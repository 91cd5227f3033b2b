pub mod cache;
pub mod config;
pub mod persistence;
pub mod queue;
pub mod workers;
