//! Protocol identifiers exchanged with the orchestrator.

/// Protocol of an activation check request.
pub const ACTIVATION_REQUEST: &str = "io.choria.mcorpc.external.v1.activation_request";

/// Protocol of an activation check reply.
pub const ACTIVATION_REPLY: &str = "io.choria.mcorpc.external.v1.activation_reply";

/// Protocol of an RPC action request.
pub const RPC_REQUEST: &str = "io.choria.mcorpc.external.v1.rpc_request";

/// Protocol of an RPC action reply.
pub const RPC_REPLY: &str = "io.choria.mcorpc.external.v1.rpc_reply";

/// Protocol of an external discovery request.
pub const DISCOVERY_REQUEST: &str = "io.choria.choria.discovery.v1.external_request";

/// Protocol an external discovery reply must carry.
pub const DISCOVERY_REPLY: &str = "io.choria.choria.discovery.v1.external_reply";

/// Printed on stdout when the binary is invoked outside the orchestrator.
pub const USAGE_BANNER: &str =
    "This binary is a Plugin for the Choria Orchestrator and should only be called from within Choria";
