//! ops-debug library
//!
//! This module exports the core components for testing and integration.

pub mod audit;
pub mod base58;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod kv;
pub mod logging;
