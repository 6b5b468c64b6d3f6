//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - TextGenerator implementations (Anthropic, mock, fallback wrapper)
//! - `storage` - in-memory repositories and the file-based answer cache
//! - `postgres` - sqlx-backed persistence
//! - `http` - axum REST API

pub mod ai;
pub mod http;
pub mod postgres;
pub mod storage;
