//! The transport adapter: one request file in, one reply file out.
//!
//! A [`Transport`] moves raw bytes; the provided `load_request` and
//! `publish_reply` methods layer protocol checking and JSON coding on top.
//! [`FileTransport`] is the implementation backed by the files named in the
//! [`Environment`].

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use extagent_contracts::error::{ExtAgentError, ExtAgentResult};

use crate::env::{Environment, REPLY_VAR, REQUEST_VAR};

/// Byte-level access to the request/reply pair of one invocation.
pub trait Transport {
    /// The protocol the orchestrator invoked us with.
    fn protocol(&self) -> &str;

    /// Read the raw request document.
    fn read_request(&self) -> ExtAgentResult<Vec<u8>>;

    /// Replace the reply document with `bytes`.
    fn write_reply(&self, bytes: &[u8]) -> ExtAgentResult<()>;

    /// Load and decode the request, insisting on `expected_protocol`.
    ///
    /// # Errors
    ///
    /// `ProtocolMismatch` when the invocation protocol differs, any error of
    /// `read_request()`, and `DecodeError` when the content is not JSON of
    /// shape `T`.
    fn load_request<T: DeserializeOwned>(&self, expected_protocol: &str) -> ExtAgentResult<T> {
        if self.protocol() != expected_protocol {
            return Err(ExtAgentError::ProtocolMismatch {
                expected: expected_protocol.to_string(),
                actual: self.protocol().to_string(),
            });
        }

        let raw = self.read_request()?;
        serde_json::from_slice(&raw).map_err(|e| ExtAgentError::DecodeError {
            what: "request".to_string(),
            reason: e.to_string(),
        })
    }

    /// Encode `value` as JSON and write it as the reply.
    fn publish_reply<T: Serialize>(&self, value: &T) -> ExtAgentResult<()> {
        let encoded = serde_json::to_vec(value).map_err(|e| ExtAgentError::EncodeError {
            reason: e.to_string(),
        })?;
        self.write_reply(&encoded)
    }
}

/// A transport over the request and reply files of an [`Environment`].
#[derive(Debug, Clone, Copy)]
pub struct FileTransport<'a> {
    env: &'a Environment,
}

impl<'a> FileTransport<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self { env }
    }

    /// Resolve an environment path, requiring that the file already exists.
    fn existing<'p>(variable: &str, path: Option<&'p Path>) -> ExtAgentResult<&'p Path> {
        match path {
            Some(p) if p.exists() => Ok(p),
            other => Err(ExtAgentError::MissingFile {
                variable: variable.to_string(),
                path: other.map(|p| p.display().to_string()).unwrap_or_default(),
            }),
        }
    }
}

impl Transport for FileTransport<'_> {
    fn protocol(&self) -> &str {
        &self.env.protocol
    }

    fn read_request(&self) -> ExtAgentResult<Vec<u8>> {
        let path = Self::existing(REQUEST_VAR, self.env.request_path.as_deref())?;
        debug!(path = %path.display(), "reading request");

        fs::read(path).map_err(|e| ExtAgentError::ReadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Truncate and overwrite the pre-existing reply file.
    ///
    /// The orchestrator creates the reply file ahead of time to fix its
    /// ownership and permissions, so a missing file is an error rather than
    /// something to create. The file is only opened for writing; its
    /// metadata is never touched, so it need not be owned by this process.
    fn write_reply(&self, bytes: &[u8]) -> ExtAgentResult<()> {
        let path = Self::existing(REPLY_VAR, self.env.reply_path.as_deref())?;
        let write_error = |e: std::io::Error| ExtAgentError::WriteError {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(write_error)?;
        file.write_all(bytes).map_err(write_error)?;

        debug!(path = %path.display(), bytes = bytes.len(), "reply written");
        Ok(())
    }
}
