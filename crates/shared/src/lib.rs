//! Shared types and configuration for Kasboek.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Money helpers with currency precision
//! - Configuration management

pub mod config;
pub mod types;

#[cfg(test)]
mod config_tests;

pub use config::AppConfig;
