//! Core types, config, errors, and usage persistence for Agentlens.

pub mod config;
pub mod error;
pub mod types;
pub mod usage_store;
