//! scout - terminal client for a research-query service.
//!
//! Submits free-text research queries, lists prior sessions and renders
//! their message threads. All state lives in a `ResearchController`
//! driving a `ResearchApi` adapter.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod logging;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
