// src/lib.rs
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod resolver;
pub mod search;
pub mod session;
pub mod sources;
pub mod types;
pub mod utils;

pub use cli::Args;
pub use engine::DorkEngine;
pub use types::{Category, CategoryReport, Config, RunStats, SearchItem, SitedorkError};
