pub mod actions;
pub mod adapters;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::types::*;
