//! Activation check handling.
//!
//! Two linear steps: load the check, then answer it. Every failure on this
//! path is fatal and leaves the reply file untouched, because a request that
//! cannot be parsed has no channel to report through.

use tracing::{debug, info};

use extagent_contracts::{
    activation::{ActivationCheck, ActivationReply},
    config::AgentConfig,
    error::{ExtAgentError, ExtAgentResult},
    protocol,
};

use crate::traits::Activator;
use crate::transport::Transport;

/// Run one activation check against `transport`.
///
/// # Errors
///
/// Any `load_request` error, `ActivationFailed` when the predicate errors,
/// and any `publish_reply` error.
pub fn handle_activation<T: Transport>(
    transport: &T,
    activator: &dyn Activator,
    config: &AgentConfig,
) -> ExtAgentResult<ActivationReply> {
    let check: ActivationCheck = transport.load_request(protocol::ACTIVATION_REQUEST)?;
    debug!(agent = %check.agent, "activation check loaded");

    let should_activate = activator
        .should_activate(&check.agent, config)
        .map_err(|e| match e {
            ExtAgentError::ActivationFailed { .. } => e,
            other => ExtAgentError::ActivationFailed {
                reason: other.to_string(),
            },
        })?;

    let reply = ActivationReply { should_activate };
    transport.publish_reply(&reply)?;

    info!(agent = %check.agent, activate = should_activate, "activation check answered");
    Ok(reply)
}
