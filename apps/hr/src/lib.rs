//! # HR Library
//!
//! This library exposes the HR directory app modules for testing and
//! integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;

pub use error::{Error, Result};

// Re-export hr_core for convenience
pub use hr_core;
