//! Shared types and configuration for Finstar.
//!
//! This crate provides common types used across all other crates:
//! - Typed surrogate ids for type-safe dimension references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
