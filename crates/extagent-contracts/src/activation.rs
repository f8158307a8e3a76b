//! Activation check wire types.

use serde::{Deserialize, Serialize};

use crate::wire::null_as_default;

/// Asks whether an agent should be considered active on this node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationCheck {
    #[serde(rename = "$schema", deserialize_with = "null_as_default")]
    pub schema: String,
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: String,
    #[serde(deserialize_with = "null_as_default")]
    pub agent: String,
}

/// Answer to an [`ActivationCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivationReply {
    #[serde(rename = "activate")]
    pub should_activate: bool,
}
