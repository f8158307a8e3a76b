//! The RPC request envelope handed to action handlers.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::reply::Reply;
use crate::wire::null_as_default;

/// An RPC request as written by the orchestrator.
///
/// Every field defaults to its zero value when absent or `null`. The
/// `data` payload stays untyped until an action decodes it with
/// [`Request::parse_data`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    #[serde(rename = "$schema", deserialize_with = "null_as_default")]
    pub schema: String,
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: String,
    #[serde(deserialize_with = "null_as_default")]
    pub agent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(rename = "requestid", deserialize_with = "null_as_default")]
    pub request_id: String,
    #[serde(rename = "senderid", deserialize_with = "null_as_default")]
    pub sender_id: String,
    #[serde(rename = "callerid", deserialize_with = "null_as_default")]
    pub caller_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub collective: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ttl: i64,
    #[serde(rename = "msgtime", deserialize_with = "null_as_default")]
    pub time: i64,
    pub data: serde_json::Value,
}

impl Request {
    /// Decode the opaque payload into `T`.
    ///
    /// On failure `reply` is set to `InvalidData` and `None` is returned, so
    /// the handler can simply return.
    pub fn parse_data<T: DeserializeOwned>(&self, reply: &mut Reply) -> Option<T> {
        match T::deserialize(&self.data) {
            Ok(value) => Some(value),
            Err(e) => {
                reply.invalid_data(format!(
                    "could not parse request data for {}#{}: {}",
                    self.agent, self.action, e
                ));
                None
            }
        }
    }

    /// `msgtime` as a UTC timestamp, `None` when out of range.
    pub fn message_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}
