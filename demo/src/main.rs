//! Echo agent and static discovery source.
//!
//! The orchestrator runs this binary with no arguments and the
//! `CHORIA_EXTERNAL_*` variables set; that serves the `echo` agent. The
//! discovery source and the facts dump are selected by subcommand.
//!
//! Usage:
//!   demo                 # serve the echo agent
//!   demo discovery --nodes web1,web2,db1
//!   demo facts

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use extagent_contracts::{
    config::AgentConfig,
    error::{ExtAgentError, ExtAgentResult},
    reply::Reply,
    request::Request,
};
use extagent_core::{driver, facts, Agent, Environment};
use extagent_discovery::{Deadline, Discovery, Filter};

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "demo",
    about = "Echo agent and static discovery source for the external agent protocol",
    long_about = "Without a subcommand this serves the 'echo' agent using the request\n\
                  and reply files named by the CHORIA_EXTERNAL_* environment variables."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the echo agent (the default).
    Agent,
    /// Answer a discovery request from a static node list.
    Discovery {
        /// Nodes this source knows about.
        #[arg(long, env = "DEMO_DISCOVERY_NODES", value_delimiter = ',')]
        nodes: Vec<String>,
    },
    /// Print the node facts supplied by the orchestrator.
    Facts,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // stdout is reserved for the usage banner; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Agent) {
        Command::Agent => run_agent(),
        Command::Discovery { nodes } => run_discovery(nodes),
        Command::Facts => print_facts(),
    }
}

// ── Echo agent ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PingInput {
    message: String,
}

fn run_agent() -> ExitCode {
    driver::run_agent("echo", register_echo)
}

fn register_echo(agent: &mut Agent, env: &Environment) -> ExtAgentResult<()> {
    let facts_env = env.clone();

    agent.register_activator(|_agent: &str, config: &AgentConfig| -> ExtAgentResult<bool> {
        match config.get_or("activate", "true") {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            other => Err(ExtAgentError::ActivationFailed {
                reason: format!("invalid 'activate' setting '{other}'"),
            }),
        }
    });

    agent.register_action("ping", |req: &Request, reply: &mut Reply, _: &AgentConfig| {
        let Some(input) = req.parse_data::<PingInput>(reply) else {
            return;
        };
        reply.set_data(&json!({ "message": input.message }));
    })?;

    agent.register_action(
        "facts",
        move |_: &Request, reply: &mut Reply, _: &AgentConfig| {
            match facts::load_facts(&facts_env) {
                Ok(node_facts) => reply.data = node_facts,
                Err(e) => reply.unknown_error(format!("could not load facts: {e}")),
            }
        },
    )?;

    agent.register_action("config", |_: &Request, reply: &mut Reply, config: &AgentConfig| {
        let items: serde_json::Map<String, Value> = config
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        reply.data = Value::Object(items);
    })
}

// ── Discovery ─────────────────────────────────────────────────────────────────

fn run_discovery(nodes: Vec<String>) -> ExitCode {
    debug!(known_nodes = nodes.len(), "serving static discovery");
    let discovery = Discovery::new(
        move |deadline: Deadline, _collective: &str, filter: &Filter| -> ExtAgentResult<Vec<String>> {
            if deadline.is_expired() {
                return Err(ExtAgentError::Discovery("discovery timed out".to_string()));
            }
            Ok(select_nodes(&nodes, filter))
        },
    );
    driver::finish(discovery.process_request(&Environment::from_env()))
}

/// Apply the identity filter; other filter kinds need facts this source
/// does not have, so they are ignored.
fn select_nodes(nodes: &[String], filter: &Filter) -> Vec<String> {
    nodes
        .iter()
        .filter(|node| filter.identity.is_empty() || filter.identity.iter().any(|i| i == *node))
        .cloned()
        .collect()
}

// ── Facts ─────────────────────────────────────────────────────────────────────

fn print_facts() -> ExitCode {
    let result = facts::load_facts(&Environment::from_env()).and_then(|facts| {
        serde_json::to_string_pretty(&facts)
            .map_err(|e| ExtAgentError::EncodeError { reason: e.to_string() })
    });

    match result {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => driver::finish::<()>(Err(e)),
    }
}
