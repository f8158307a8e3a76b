//! # extagent-config
//!
//! Parser for the line-oriented agent configuration file named by
//! `CHORIA_EXTERNAL_CONFIG`.
//!
//! ## Format
//!
//! ```text
//! # comments and blank lines are ignored
//! endpoint = https://example.net
//! retries=3
//! ```
//!
//! Whitespace around keys and values is trimmed. Lines without `=` are
//! skipped rather than rejected.

pub mod parser;

pub use parser::{load_config, parse_config_str};

// ── Tests ─────────────────────────────────────────────────────────────────────
