pub mod aggregate;
pub mod enrich;
pub mod error;
pub mod export;
pub mod filter;
pub mod read_times;
pub mod session;
pub mod trend;
pub mod types;
