pub mod trend_service;
