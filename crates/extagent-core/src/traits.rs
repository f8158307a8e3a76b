//! Extension points for agent authors.
//!
//! - `ActionHandler`: one RPC action
//! - `Activator`: decides whether the agent is active on this node
//!
//! Both are implemented for plain closures, so most agents never name these
//! traits directly.

use extagent_contracts::{config::AgentConfig, error::ExtAgentResult, reply::Reply, request::Request};

/// A single RPC action.
///
/// The handler owns the outcome: it may set any status code, message and
/// payload on `reply`, including reporting its own payload decode failures
/// as `InvalidData`. The dispatcher publishes whatever `reply` holds when
/// `handle()` returns.
pub trait ActionHandler {
    fn handle(&self, request: &Request, reply: &mut Reply, config: &AgentConfig);
}

impl<F> ActionHandler for F
where
    F: Fn(&Request, &mut Reply, &AgentConfig),
{
    fn handle(&self, request: &Request, reply: &mut Reply, config: &AgentConfig) {
        self(request, reply, config)
    }
}

/// The activation predicate.
///
/// Returning an error is fatal to the invocation: no reply is written and
/// the process exits non-zero.
pub trait Activator {
    fn should_activate(&self, agent: &str, config: &AgentConfig) -> ExtAgentResult<bool>;
}

impl<F> Activator for F
where
    F: Fn(&str, &AgentConfig) -> ExtAgentResult<bool>,
{
    fn should_activate(&self, agent: &str, config: &AgentConfig) -> ExtAgentResult<bool> {
        self(agent, config)
    }
}

/// Used when no activator was registered: always activate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysActivate;

impl Activator for AlwaysActivate {
    fn should_activate(&self, _agent: &str, _config: &AgentConfig) -> ExtAgentResult<bool> {
        Ok(true)
    }
}
