//! # Sonar MCP
//!
//! A Model Context Protocol (MCP) server exposing Perplexity's Sonar family
//! of web-grounded AI search models as callable tools.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Typed request/response structures for the Sonar API
//! - [`sonar`]: Upstream API client and response formatting
//! - [`mcp`]: MCP protocol implementation, tool catalog, and handlers
//! - [`utils`]: Argument validation and text helpers
//! - [`config`]: Configuration management

pub mod config;
pub mod mcp;
pub mod models;
pub mod sonar;
pub mod utils;

// Re-export commonly used types
pub use models::{ChatRequest, ChatResponse, SonarModel};
pub use sonar::{SonarClient, SonarError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
