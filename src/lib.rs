pub mod api;
pub mod catalog;
pub mod config;
pub mod evolution;
pub mod metrics;
pub mod models;
pub mod search;
pub mod state;
pub mod utils;
