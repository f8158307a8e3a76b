//! Error types for the external agent runtime.
//!
//! Every variant here belongs to the fatal tier: a failure that means the
//! file contract with the orchestrator is broken. Reportable failures never
//! surface as `ExtAgentError`; they travel inside a `Reply` status code.

use thiserror::Error;

/// The unified error type for the external agent runtime.
#[derive(Debug, Error)]
pub enum ExtAgentError {
    /// The protocol in the environment is not the one the caller expected.
    #[error("unexpected protocol '{actual}', expected '{expected}'")]
    ProtocolMismatch { expected: String, actual: String },

    /// The protocol in the environment is not one this binary serves.
    #[error("Invalid protocol '{protocol}'")]
    InvalidProtocol { protocol: String },

    /// One of the variables required for any invocation is unset or empty.
    #[error("Invalid environment")]
    InvalidEnvironment,

    /// A file named by an environment variable is absent or does not exist.
    #[error("file '{path}' from {variable} does not exist")]
    MissingFile { variable: String, path: String },

    /// An existing file could not be read.
    #[error("could not read '{path}': {reason}")]
    ReadError { path: String, reason: String },

    /// File content is not valid JSON of the expected shape.
    #[error("could not parse {what}: {reason}")]
    DecodeError { what: String, reason: String },

    /// A value could not be serialized to JSON.
    #[error("could not JSON encode reply data: {reason}")]
    EncodeError { reason: String },

    /// The reply file could not be written.
    #[error("failed writing to reply file '{path}': {reason}")]
    WriteError { path: String, reason: String },

    /// An action with this name is already registered.
    #[error("duplicate action {action}")]
    DuplicateAction { action: String },

    /// Action names must be non-empty.
    #[error("invalid action name '{action}'")]
    InvalidActionName { action: String },

    /// The user supplied activation predicate returned an error.
    #[error("activation handler failed: {reason}")]
    ActivationFailed { reason: String },

    /// The agent configuration file could not be loaded.
    #[error("could not parse configuration: {reason}")]
    ConfigError { reason: String },

    /// A discovery source failed. The message is reported verbatim.
    #[error("{0}")]
    Discovery(String),
}

/// Convenience alias used throughout the extagent crates.
pub type ExtAgentResult<T> = Result<T, ExtAgentError>;
