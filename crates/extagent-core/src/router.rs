//! Protocol routing and the `Agent` facade.
//!
//! An [`Agent`] bundles the activation predicate, the action registry and
//! the static configuration. `process_request()` reads the protocol once,
//! routes to the activation or RPC handler, and returns what was published.

use tracing::{debug, error};

use extagent_contracts::{
    activation::ActivationReply,
    config::AgentConfig,
    error::{ExtAgentError, ExtAgentResult},
    protocol,
    reply::Reply,
};

use crate::activation::handle_activation;
use crate::env::Environment;
use crate::registry::ActionRegistry;
use crate::rpc::handle_rpc;
use crate::traits::{ActionHandler, Activator, AlwaysActivate};
use crate::transport::{FileTransport, Transport};

/// Which handler an invocation protocol selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Activation,
    Rpc,
}

impl Route {
    /// Map a protocol identifier to its route.
    ///
    /// Anything other than the two agent protocols, including the empty
    /// string, is `InvalidProtocol`.
    pub fn from_protocol(protocol: &str) -> ExtAgentResult<Self> {
        match protocol {
            protocol::ACTIVATION_REQUEST => Ok(Route::Activation),
            protocol::RPC_REQUEST => Ok(Route::Rpc),
            other => Err(ExtAgentError::InvalidProtocol {
                protocol: other.to_string(),
            }),
        }
    }
}

/// What an invocation published.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Activation(ActivationReply),
    Rpc(Reply),
}

/// An external agent: a named set of actions plus an optional activator.
pub struct Agent {
    name: String,
    activator: Option<Box<dyn Activator>>,
    actions: ActionRegistry,
    config: AgentConfig,
}

impl Agent {
    /// Create an agent with an explicit configuration.
    pub fn new(name: impl Into<String>, config: AgentConfig) -> Self {
        Self {
            name: name.into(),
            activator: None,
            actions: ActionRegistry::new(),
            config,
        }
    }

    /// Create an agent whose configuration is loaded from the file named by
    /// `CHORIA_EXTERNAL_CONFIG`.
    ///
    /// A missing file gives an empty configuration; an unreadable one is a
    /// `ConfigError`.
    pub fn from_environment(name: impl Into<String>, env: &Environment) -> ExtAgentResult<Self> {
        let config = extagent_config::load_config(env.config_path.as_deref())?;
        Ok(Self::new(name, config))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Replace the activation predicate. Without one the agent always
    /// activates.
    pub fn register_activator<A>(&mut self, activator: A)
    where
        A: Activator + 'static,
    {
        self.activator = Some(Box::new(activator));
    }

    /// Register an RPC action. See [`ActionRegistry::register`].
    pub fn register_action<H>(&mut self, name: impl Into<String>, handler: H) -> ExtAgentResult<()>
    where
        H: ActionHandler + 'static,
    {
        self.actions.register(name, handler)
    }

    /// Handle the single request described by `env`.
    ///
    /// # Errors
    ///
    /// Returns the fatal tier only: `InvalidProtocol`, any activation
    /// failure, and reply publish failures. Reportable RPC failures are
    /// `Ok(Outcome::Rpc(..))` with a non-OK status.
    pub fn process_request(&self, env: &Environment) -> ExtAgentResult<Outcome> {
        self.dispatch(&FileTransport::new(env))
    }

    /// Route and handle one request over an arbitrary transport.
    pub fn dispatch<T: Transport>(&self, transport: &T) -> ExtAgentResult<Outcome> {
        let route = Route::from_protocol(transport.protocol()).inspect_err(|e| {
            error!(agent = %self.name, error = %e, "refusing invocation");
        })?;
        debug!(agent = %self.name, protocol = %transport.protocol(), ?route, "dispatching request");

        match route {
            Route::Activation => {
                let activator = self.activator.as_deref().unwrap_or(&AlwaysActivate);
                handle_activation(transport, activator, &self.config).map(Outcome::Activation)
            }
            Route::Rpc => handle_rpc(transport, &self.actions, &self.config).map(Outcome::Rpc),
        }
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("has_activator", &self.activator.is_some())
            .field("actions", &self.actions)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::{json, Value};
    use tempfile::TempDir;

    use extagent_contracts::{
        activation::ActivationReply,
        config::AgentConfig,
        error::{ExtAgentError, ExtAgentResult},
        protocol,
        reply::{Reply, StatusCode},
        request::Request,
    };

    use super::{Agent, Outcome, Route};
    use crate::env::Environment;

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// A request/reply file pair in a private temp directory.
    struct Invocation {
        dir: TempDir,
        request: PathBuf,
        reply: PathBuf,
    }

    impl Invocation {
        fn new(request: Value) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let request_path = dir.path().join("request.json");
            let reply_path = dir.path().join("reply.json");
            std::fs::write(&request_path, request.to_string()).unwrap();
            std::fs::File::create(&reply_path).unwrap();
            Self {
                dir,
                request: request_path,
                reply: reply_path,
            }
        }

        fn env(&self, protocol: &str) -> Environment {
            Environment::for_files(protocol, &self.request, &self.reply)
        }

        fn reply_text(&self) -> String {
            std::fs::read_to_string(&self.reply).unwrap()
        }
    }

    fn echo_agent() -> Agent {
        let mut agent = Agent::new("echo", AgentConfig::new());
        agent
            .register_action("ping", |req: &Request, reply: &mut Reply, _: &AgentConfig| {
                if let Some(data) = req.parse_data::<serde_json::Map<String, Value>>(reply) {
                    reply.set_data(&json!({ "message": data.get("message") }));
                }
            })
            .unwrap();
        agent
    }

    // ── Route ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_route_from_protocol() {
        assert_eq!(Route::from_protocol(protocol::ACTIVATION_REQUEST).unwrap(), Route::Activation);
        assert_eq!(Route::from_protocol(protocol::RPC_REQUEST).unwrap(), Route::Rpc);
    }

    #[test]
    fn test_route_rejects_unknown_and_empty() {
        for bad in ["", protocol::RPC_REPLY, "io.choria.mcorpc.external.v2.rpc_request"] {
            match Route::from_protocol(bad) {
                Err(ExtAgentError::InvalidProtocol { protocol }) => assert_eq!(protocol, bad),
                other => panic!("expected InvalidProtocol for {bad:?}, got {:?}", other),
            }
        }
    }

    // ── Agent ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_new_agent_is_empty() {
        let agent = Agent::new("testing", AgentConfig::new());
        assert_eq!(agent.name(), "testing");
        assert!(agent.config().is_empty());
        assert!(agent.actions().is_empty());
    }

    #[test]
    fn test_from_environment_without_config_file() {
        let env = Environment {
            config_path: Some(PathBuf::from("/nonexisting")),
            ..Environment::default()
        };
        let agent = Agent::from_environment("testing", &env).unwrap();
        assert!(agent.config().is_empty());
    }

    #[test]
    fn test_from_environment_with_config_file() {
        let inv = Invocation::new(json!({}));
        let config_path = inv.dir.path().join("config");
        std::fs::write(&config_path, "foo = bar\n").unwrap();

        let env = Environment {
            config_path: Some(config_path),
            ..Environment::default()
        };
        let agent = Agent::from_environment("testing", &env).unwrap();
        assert_eq!(agent.config().len(), 1);
        assert_eq!(agent.config().get("foo"), Some("bar"));
    }

    #[test]
    fn test_register_action_rejects_duplicates() {
        let mut agent = echo_agent();
        let err = agent
            .register_action("ping", |_: &Request, _: &mut Reply, _: &AgentConfig| {})
            .unwrap_err();
        assert!(matches!(err, ExtAgentError::DuplicateAction { .. }));
    }

    // ── process_request ───────────────────────────────────────────────────────

    #[test]
    fn test_activation_uses_registered_activator() {
        let inv = Invocation::new(json!({
            "protocol": protocol::ACTIVATION_REQUEST,
            "agent": "echo"
        }));
        let mut agent = echo_agent();
        agent.register_activator(|_: &str, _: &AgentConfig| -> ExtAgentResult<bool> { Ok(false) });

        let outcome = agent.process_request(&inv.env(protocol::ACTIVATION_REQUEST)).unwrap();
        assert_eq!(outcome, Outcome::Activation(ActivationReply { should_activate: false }));
        assert_eq!(inv.reply_text(), r#"{"activate":false}"#);
    }

    #[test]
    fn test_activation_defaults_to_active() {
        let inv = Invocation::new(json!({
            "protocol": protocol::ACTIVATION_REQUEST,
            "agent": "echo"
        }));

        let outcome = echo_agent()
            .process_request(&inv.env(protocol::ACTIVATION_REQUEST))
            .unwrap();
        assert_eq!(outcome, Outcome::Activation(ActivationReply { should_activate: true }));
        assert_eq!(inv.reply_text(), r#"{"activate":true}"#);
    }

    #[test]
    fn test_rpc_ping_round_trip_through_files() {
        let inv = Invocation::new(json!({
            "protocol": protocol::RPC_REQUEST,
            "action": "ping",
            "data": { "message": "hello" }
        }));

        echo_agent().process_request(&inv.env(protocol::RPC_REQUEST)).unwrap();
        assert_eq!(
            inv.reply_text(),
            r#"{"statuscode":0,"statusmsg":"","data":{"message":"hello"}}"#
        );
    }

    #[test]
    fn test_rpc_unknown_action_is_not_fatal() {
        let inv = Invocation::new(json!({ "action": "reboot" }));

        let outcome = echo_agent().process_request(&inv.env(protocol::RPC_REQUEST)).unwrap();
        match outcome {
            Outcome::Rpc(reply) => {
                assert_eq!(reply.statuscode, StatusCode::Aborted);
                assert!(reply.statusmsg.contains("reboot"));
            }
            other => panic!("expected Rpc outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_protocol_writes_no_reply() {
        let inv = Invocation::new(json!({ "action": "ping" }));

        let err = echo_agent().process_request(&inv.env("bogus")).unwrap_err();
        assert!(matches!(err, ExtAgentError::InvalidProtocol { .. }));
        assert_eq!(inv.reply_text(), "");
    }

    #[test]
    fn test_activation_predicate_error_is_fatal() {
        let inv = Invocation::new(json!({
            "protocol": protocol::ACTIVATION_REQUEST,
            "agent": "echo"
        }));
        let mut agent = echo_agent();
        agent.register_activator(|_: &str, _: &AgentConfig| -> ExtAgentResult<bool> {
            Err(ExtAgentError::ActivationFailed {
                reason: "set".to_string(),
            })
        });

        let err = agent.process_request(&inv.env(protocol::ACTIVATION_REQUEST)).unwrap_err();
        assert!(matches!(err, ExtAgentError::ActivationFailed { ref reason } if reason == "set"));
        assert_eq!(inv.reply_text(), "");
    }
}
