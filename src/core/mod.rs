//! Core relay module

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod presets;
