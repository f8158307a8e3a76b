//! The external discovery flow.
//!
//! Unlike agents, a discovery invocation always answers when its protocol is
//! right: every failure up to and including the discovery source itself is
//! carried in the response `error` field. Only a bad environment and a
//! failed reply write are fatal.

use tracing::{debug, info, warn};

use extagent_contracts::{
    error::{ExtAgentError, ExtAgentResult},
    protocol,
};
use extagent_core::env::REQUEST_VAR;
use extagent_core::{Environment, FileTransport, Transport};

use crate::deadline::Deadline;
use crate::types::{DiscoveryRequest, DiscoveryResponse, Filter};

/// A discovery source: resolves a filter to a list of node identities.
pub trait Discoverer {
    fn discover(
        &self,
        deadline: Deadline,
        collective: &str,
        filter: &Filter,
    ) -> ExtAgentResult<Vec<String>>;
}

impl<F> Discoverer for F
where
    F: Fn(Deadline, &str, &Filter) -> ExtAgentResult<Vec<String>>,
{
    fn discover(
        &self,
        deadline: Deadline,
        collective: &str,
        filter: &Filter,
    ) -> ExtAgentResult<Vec<String>> {
        self(deadline, collective, filter)
    }
}

/// Serves the external discovery protocol with an optional source.
#[derive(Default)]
pub struct Discovery {
    source: Option<Box<dyn Discoverer>>,
}

impl Discovery {
    pub fn new<D>(source: D) -> Self
    where
        D: Discoverer + 'static,
    {
        Self {
            source: Some(Box::new(source)),
        }
    }

    /// Handle the single discovery request described by `env`.
    ///
    /// # Errors
    ///
    /// `InvalidEnvironment` when protocol, request or reply variables are
    /// missing, `InvalidProtocol` for any other protocol, and reply write
    /// failures.
    pub fn process_request(&self, env: &Environment) -> ExtAgentResult<DiscoveryResponse> {
        if env.protocol == protocol::DISCOVERY_REQUEST {
            return self.dispatch(&FileTransport::new(env));
        }

        if !env.is_complete() {
            return Err(ExtAgentError::InvalidEnvironment);
        }

        Err(ExtAgentError::InvalidProtocol {
            protocol: env.protocol.clone(),
        })
    }

    /// Answer one discovery request over `transport` and publish the response.
    pub fn dispatch<T: Transport>(&self, transport: &T) -> ExtAgentResult<DiscoveryResponse> {
        let mut response = match self.answer(transport) {
            Ok(nodes) => DiscoveryResponse {
                nodes,
                ..DiscoveryResponse::default()
            },
            Err(e) => {
                warn!(error = %e, "discovery failed");
                DiscoveryResponse {
                    error: e.to_string(),
                    ..DiscoveryResponse::default()
                }
            }
        };
        response.protocol = protocol::DISCOVERY_REPLY.to_string();

        transport.publish_reply(&response)?;
        info!(nodes = response.nodes.len(), "discovery response written");
        Ok(response)
    }

    fn answer<T: Transport>(&self, transport: &T) -> ExtAgentResult<Vec<String>> {
        let Some(source) = self.source.as_deref() else {
            return Err(ExtAgentError::Discovery(
                "no discovery implementation function specified".to_string(),
            ));
        };

        let raw = transport.read_request().map_err(|e| {
            debug!(error = %e, "reading discovery request");
            ExtAgentError::Discovery(format!("could not read request from {REQUEST_VAR} file"))
        })?;

        let request: DiscoveryRequest = serde_json::from_slice(&raw).map_err(|e| {
            debug!(error = %e, "decoding discovery request");
            ExtAgentError::Discovery(format!(
                "could not parse JSON request from {REQUEST_VAR} file"
            ))
        })?;

        let deadline = Deadline::from_secs_f64(request.timeout);
        debug!(
            collective = %request.collective,
            timeout_ms = u64::try_from(deadline.timeout().as_millis()).unwrap_or(u64::MAX),
            "running discovery source"
        );

        source.discover(deadline, &request.collective, &request.filter)
    }
}
