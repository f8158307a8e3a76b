//! In-memory transport shared by the unit tests of this crate.

use std::cell::RefCell;

use serde_json::Value;

use extagent_contracts::error::{ExtAgentError, ExtAgentResult};

use crate::transport::Transport;

/// Serves a fixed request and captures whatever reply is written.
pub(crate) struct MemoryTransport {
    pub(crate) protocol: String,
    /// `None` makes `read_request()` fail with `ReadError`.
    pub(crate) request: Option<String>,
    /// When true, `write_reply()` fails with `WriteError`.
    pub(crate) fail_write: bool,
    reply: RefCell<Option<String>>,
}

impl MemoryTransport {
    pub(crate) fn new(protocol: &str, request: &str) -> Self {
        Self {
            protocol: protocol.to_string(),
            request: Some(request.to_string()),
            fail_write: false,
            reply: RefCell::new(None),
        }
    }

    pub(crate) fn unreadable(protocol: &str) -> Self {
        Self {
            request: None,
            ..Self::new(protocol, "")
        }
    }

    pub(crate) fn reply(&self) -> Option<String> {
        self.reply.borrow().clone()
    }

    pub(crate) fn reply_json(&self) -> Value {
        let raw = self.reply().unwrap_or_else(|| panic!("no reply was written"));
        serde_json::from_str(&raw).unwrap()
    }
}

impl Transport for MemoryTransport {
    fn protocol(&self) -> &str {
        &self.protocol
    }

    fn read_request(&self) -> ExtAgentResult<Vec<u8>> {
        self.request
            .as_ref()
            .map(|r| r.as_bytes().to_vec())
            .ok_or_else(|| ExtAgentError::ReadError {
                path: "memory".to_string(),
                reason: "permission denied".to_string(),
            })
    }

    fn write_reply(&self, bytes: &[u8]) -> ExtAgentResult<()> {
        if self.fail_write {
            return Err(ExtAgentError::WriteError {
                path: "memory".to_string(),
                reason: "read-only file system".to_string(),
            });
        }
        *self.reply.borrow_mut() = Some(String::from_utf8_lossy(bytes).into_owned());
        Ok(())
    }
}
