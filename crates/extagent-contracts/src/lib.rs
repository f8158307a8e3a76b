//! # extagent-contracts
//!
//! Wire types, protocol identifiers, and error contracts for external agents.
//!
//! All crates in the workspace import from here. No dispatch logic lives in
//! this crate, only data definitions and error types.

pub mod activation;
pub mod config;
pub mod error;
pub mod protocol;
pub mod reply;
pub mod request;
pub mod wire;
