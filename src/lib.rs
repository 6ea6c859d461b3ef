pub mod args;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;
pub mod utils;
