//! # extagent-core
//!
//! The protocol dispatcher for external agents.
//!
//! An external agent is a separate executable the orchestrator spawns once
//! per request. The orchestrator names a protocol and a request/reply file
//! pair in environment variables; this crate:
//!
//! - reads that environment once into an `Environment`
//! - routes activation checks to an `Activator` and RPC requests to a
//!   registered `ActionHandler`
//! - writes exactly one JSON reply back, or fails fatally
//!
//! ## Usage
//!
//! ```rust,ignore
//! use extagent_core::driver;
//!
//! fn main() -> std::process::ExitCode {
//!     driver::run_agent("echo", |agent, _env| {
//!         agent.register_action("ping", |req: &Request, reply: &mut Reply, _: &AgentConfig| {
//!             reply.data = req.data.clone();
//!         })
//!     })
//! }
//! ```

pub mod activation;
pub mod driver;
pub mod env;
pub mod facts;
pub mod registry;
pub mod router;
pub mod rpc;
pub mod traits;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use env::Environment;
pub use registry::ActionRegistry;
pub use router::{Agent, Outcome, Route};
pub use transport::{FileTransport, Transport};
