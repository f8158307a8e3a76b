//! # extagent-discovery
//!
//! External node discovery for the orchestrator.
//!
//! The orchestrator spawns the discovery binary with the same
//! `CHORIA_EXTERNAL_*` variables agents receive. The request carries a
//! filter and a timeout; the binary answers with the matching node names.
//!
//! ```rust,ignore
//! use extagent_discovery::{Deadline, Discovery, Filter};
//!
//! let discovery = Discovery::new(|_deadline: Deadline, _collective: &str, _filter: &Filter| {
//!     Ok(vec!["node1.example.net".to_string()])
//! });
//! let result = discovery.process_request(&Environment::from_env());
//! ```

pub mod deadline;
pub mod source;
pub mod types;

pub use deadline::Deadline;
pub use source::{Discoverer, Discovery};
pub use types::{DiscoveryRequest, DiscoveryResponse, FactFilter, Filter};

// ── Tests ─────────────────────────────────────────────────────────────────────
