//! Common types and utilities shared across keytree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration (minimum key count)
//! - Error types
//! - Identifiers (NodeId)

pub mod config;
pub mod error;
mod node_id;

pub use config::TreeConfig;
pub use error::{Error, Result};
pub use node_id::NodeId;
