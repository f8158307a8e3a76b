//! Discovery wire types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use extagent_contracts::wire::null_as_default;

/// A single fact comparison, e.g. `country == mt`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactFilter {
    pub fact: String,
    pub operator: String,
    pub value: String,
}

/// The node filter an orchestrator request carries.
///
/// Every list may be empty; an entirely empty filter selects all nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub fact: Vec<FactFilter>,
    #[serde(rename = "cf_class")]
    pub class: Vec<String>,
    pub agent: Vec<String>,
    pub identity: Vec<String>,
    pub compound: Vec<Vec<BTreeMap<String, String>>>,
}

impl Filter {
    /// True when no constraint of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.fact.is_empty()
            && self.class.is_empty()
            && self.agent.is_empty()
            && self.identity.is_empty()
            && self.compound.is_empty()
    }
}

/// The request written by the orchestrator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: String,
    /// Seconds the discovery source may spend.
    #[serde(deserialize_with = "null_as_default")]
    pub timeout: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub collective: String,
    #[serde(deserialize_with = "null_as_default")]
    pub filter: Filter,
}

/// The reply the orchestrator expects back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryResponse {
    pub protocol: String,
    pub nodes: Vec<String>,
    pub error: String,
}
