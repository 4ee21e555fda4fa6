pub mod display;
pub mod keywords;
