//! Core types and configuration for quote normalization.
//!
//! This crate provides shared types used across all other crates:
//! - Quote and normalization result types
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use types::*;
