pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod listings;
pub mod salary;
pub mod scrape;
pub mod telemetry;
