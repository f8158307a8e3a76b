//! RPC request handling.
//!
//! The RPC handler runs the invocation pipeline:
//!
//!   Read → Decode → Validate action → Lookup → Handler → Publish
//!
//! Any failure before the handler runs is reportable: an `Aborted` reply is
//! published and the invocation ends normally. Only a failed publish is
//! fatal, since there is no further channel to report through.

use serde_json::json;
use tracing::{debug, info, warn};

use extagent_contracts::{
    config::AgentConfig,
    error::ExtAgentResult,
    reply::{Reply, StatusCode},
    request::Request,
};

use crate::env::REQUEST_VAR;
use crate::registry::ActionRegistry;
use crate::transport::Transport;

/// Dispatch one RPC request to the matching action in `registry`.
///
/// Returns the reply that was published.
///
/// # Errors
///
/// Only publish failures are returned; everything else becomes an
/// `Aborted` reply.
pub fn handle_rpc<T: Transport>(
    transport: &T,
    registry: &ActionRegistry,
    config: &AgentConfig,
) -> ExtAgentResult<Reply> {
    // ── Step 1: Raw request ──────────────────────────────────────────────────
    let raw = match transport.read_request() {
        Ok(raw) => raw,
        Err(e) => {
            return abort(
                transport,
                format!("could not read request from {REQUEST_VAR} file: {e}"),
            )
        }
    };

    // ── Step 2: Decode ───────────────────────────────────────────────────────
    let request: Request = match serde_json::from_slice(&raw) {
        Ok(request) => request,
        Err(e) => return abort(transport, format!("could not parse request: {e}")),
    };

    // ── Step 3: Validate the action name ─────────────────────────────────────
    if request.action.is_empty() {
        return abort(transport, "invalid action".to_string());
    }

    // ── Step 4: Lookup ───────────────────────────────────────────────────────
    let Some(handler) = registry.get(&request.action) else {
        return abort(transport, format!("unknown action {}", request.action));
    };

    // ── Step 5: Invoke ───────────────────────────────────────────────────────
    debug!(
        agent = %request.agent,
        action = %request.action,
        requestid = %request.request_id,
        callerid = %request.caller_id,
        "invoking action"
    );

    let mut reply = Reply::default();
    handler.handle(&request, &mut reply, config);

    // ── Step 6: Publish ──────────────────────────────────────────────────────
    transport.publish_reply(&reply)?;

    info!(
        agent = %request.agent,
        action = %request.action,
        requestid = %request.request_id,
        statuscode = reply.statuscode.ordinal(),
        "action completed"
    );
    Ok(reply)
}

/// Publish an `Aborted` reply with an empty object payload.
fn abort<T: Transport>(transport: &T, msg: String) -> ExtAgentResult<Reply> {
    warn!(reason = %msg, "aborting rpc request");

    let reply = Reply {
        statuscode: StatusCode::Aborted,
        statusmsg: msg,
        data: json!({}),
    };
    transport.publish_reply(&reply)?;
    Ok(reply)
}
