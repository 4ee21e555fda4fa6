pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used items
pub use config::AggregatorConfig;
pub use models::cache::FreshnessCache;
pub use services::trend_service::TrendService;
