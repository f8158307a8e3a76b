//! The invocation environment.
//!
//! The orchestrator describes each invocation entirely through environment
//! variables. They are read once into an [`Environment`] at process start,
//! and that value is passed down explicitly; nothing below the driver looks
//! at the process environment.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Selects which protocol is being invoked.
pub const PROTOCOL_VAR: &str = "CHORIA_EXTERNAL_PROTOCOL";
/// Path of the incoming JSON request.
pub const REQUEST_VAR: &str = "CHORIA_EXTERNAL_REQUEST";
/// Path of the pre-existing file that receives the JSON reply.
pub const REPLY_VAR: &str = "CHORIA_EXTERNAL_REPLY";
/// Optional path of the `key = value` agent configuration.
pub const CONFIG_VAR: &str = "CHORIA_EXTERNAL_CONFIG";
/// Optional path of a JSON document describing node facts.
pub const FACTS_VAR: &str = "CHORIA_EXTERNAL_FACTS";

/// Snapshot of the invocation environment.
///
/// Empty variables are treated the same as unset ones. Paths are taken
/// verbatim and need not be UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Environment {
    pub protocol: String,
    pub request_path: Option<PathBuf>,
    pub reply_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub facts_path: Option<PathBuf>,
}

impl Environment {
    /// Read the environment of the current process.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build an environment from an arbitrary variable lookup.
    ///
    /// A protocol that is not valid UTF-8 cannot name a known protocol and
    /// is read as empty.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        Self {
            protocol: lookup(PROTOCOL_VAR)
                .and_then(|v| v.into_string().ok())
                .unwrap_or_default(),
            request_path: path(REQUEST_VAR),
            reply_path: path(REPLY_VAR),
            config_path: path(CONFIG_VAR),
            facts_path: path(FACTS_VAR),
        }
    }

    /// An environment for `protocol` with the given request and reply files.
    pub fn for_files(
        protocol: impl Into<String>,
        request: impl AsRef<Path>,
        reply: impl AsRef<Path>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            request_path: Some(request.as_ref().to_path_buf()),
            reply_path: Some(reply.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// True when protocol, request and reply are all present.
    pub fn is_complete(&self) -> bool {
        !self.protocol.is_empty() && self.request_path.is_some() && self.reply_path.is_some()
    }
}
