//! RPC reply types.
//!
//! The status taxonomy follows MCollective SimpleRPC: six closed codes,
//! serialized on the wire as their ordinal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome classification of an RPC reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StatusCode {
    /// The action completed.
    #[default]
    Ok,
    /// The action could not run. Most action failures should use this.
    Aborted,
    /// The requested action does not exist.
    UnknownAction,
    /// Required input data was missing.
    MissingData,
    /// Input data was present but invalid.
    InvalidData,
    /// General failure inside an action.
    UnknownError,
}

impl StatusCode {
    /// The wire ordinal, 0 to 5.
    pub fn ordinal(self) -> u8 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::Aborted => 1,
            StatusCode::UnknownAction => 2,
            StatusCode::MissingData => 3,
            StatusCode::InvalidData => 4,
            StatusCode::UnknownError => 5,
        }
    }
}

impl From<StatusCode> for u8 {
    fn from(code: StatusCode) -> Self {
        code.ordinal()
    }
}

impl TryFrom<u8> for StatusCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(StatusCode::Ok),
            1 => Ok(StatusCode::Aborted),
            2 => Ok(StatusCode::UnknownAction),
            3 => Ok(StatusCode::MissingData),
            4 => Ok(StatusCode::InvalidData),
            5 => Ok(StatusCode::UnknownError),
            other => Err(format!("invalid status code {other}, expected 0 to 5")),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusCode::Ok => "ok",
            StatusCode::Aborted => "aborted",
            StatusCode::UnknownAction => "unknown_action",
            StatusCode::MissingData => "missing_data",
            StatusCode::InvalidData => "invalid_data",
            StatusCode::UnknownError => "unknown_error",
        };
        f.write_str(name)
    }
}

/// The reply written back to the orchestrator for an RPC request.
///
/// A fresh reply is `Ok` with an empty message and `null` data. Action
/// handlers mutate it freely; the dispatcher serializes it exactly once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Reply {
    pub statuscode: StatusCode,
    pub statusmsg: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Reply {
    /// Set the status code and message in one go.
    pub fn abort(&mut self, code: StatusCode, msg: impl Into<String>) {
        self.statuscode = code;
        self.statusmsg = msg.into();
    }

    pub fn aborted(&mut self, msg: impl Into<String>) {
        self.abort(StatusCode::Aborted, msg);
    }

    pub fn unknown_action(&mut self, msg: impl Into<String>) {
        self.abort(StatusCode::UnknownAction, msg);
    }

    pub fn missing_data(&mut self, msg: impl Into<String>) {
        self.abort(StatusCode::MissingData, msg);
    }

    pub fn invalid_data(&mut self, msg: impl Into<String>) {
        self.abort(StatusCode::InvalidData, msg);
    }

    pub fn unknown_error(&mut self, msg: impl Into<String>) {
        self.abort(StatusCode::UnknownError, msg);
    }

    /// Store `value` as the reply payload.
    ///
    /// If `value` cannot be represented as JSON the reply becomes an
    /// `UnknownError` and `false` is returned.
    pub fn set_data<T: Serialize>(&mut self, value: &T) -> bool {
        match serde_json::to_value(value) {
            Ok(data) => {
                self.data = data;
                true
            }
            Err(e) => {
                self.unknown_error(format!("could not encode reply data: {e}"));
                false
            }
        }
    }

    /// True when the status code is `Ok`.
    pub fn is_ok(&self) -> bool {
        self.statuscode == StatusCode::Ok
    }
}
