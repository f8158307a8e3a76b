//! `key = value` configuration parsing.
//!
//! Parsing algorithm, applied line by line:
//!
//! 1. Trim surrounding whitespace.
//! 2. Skip blank lines and lines starting with `#`.
//! 3. Match `(.+?)\s*=\s*(.+)`; lines that do not match are skipped.
//! 4. Insert `key -> value`, later lines overwriting earlier ones.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use extagent_contracts::{
    config::AgentConfig,
    error::{ExtAgentError, ExtAgentResult},
};

static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Constant pattern, cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^(.+?)\s*=\s*(.+)$").expect("valid regex")
});

/// Parse configuration text into an `AgentConfig`.
pub fn parse_config_str(contents: &str) -> AgentConfig {
    let mut config = AgentConfig::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some(captures) = ITEM_RE.captures(line) else {
            debug!(line = %line, "skipping configuration line without '='");
            continue;
        };

        config.insert(&captures[1], &captures[2]);
    }

    config
}

/// Load the configuration file at `path`.
///
/// An absent path, or a path that does not exist, yields an empty
/// configuration. A file that exists but cannot be read is a
/// `ConfigError`.
pub fn load_config(path: Option<&Path>) -> ExtAgentResult<AgentConfig> {
    let Some(path) = path else {
        return Ok(AgentConfig::new());
    };

    if !path.exists() {
        debug!(path = %path.display(), "configuration file does not exist, using empty configuration");
        return Ok(AgentConfig::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ExtAgentError::ConfigError {
        reason: format!("failed to read configuration file '{}': {}", path.display(), e),
    })?;

    let config = parse_config_str(&contents);
    debug!(path = %path.display(), items = config.len(), "loaded agent configuration");
    Ok(config)
}
