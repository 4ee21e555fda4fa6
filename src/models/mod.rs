pub mod cache;
pub mod response;
