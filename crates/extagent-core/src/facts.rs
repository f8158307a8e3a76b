//! Node facts supplied by the orchestrator.

use std::path::Path;

use serde_json::Value;

use extagent_contracts::error::{ExtAgentError, ExtAgentResult};

use crate::env::Environment;

/// Path of the facts document, if the orchestrator provided one.
pub fn facts_path(env: &Environment) -> Option<&Path> {
    env.facts_path.as_deref()
}

/// Load the node facts, or an empty JSON object when none were provided.
pub fn load_facts(env: &Environment) -> ExtAgentResult<Value> {
    let Some(path) = facts_path(env) else {
        return Ok(Value::Object(serde_json::Map::new()));
    };

    let raw = std::fs::read(path).map_err(|e| ExtAgentError::ReadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    serde_json::from_slice(&raw).map_err(|e| ExtAgentError::DecodeError {
        what: "facts".to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use extagent_contracts::error::ExtAgentError;

    use super::{facts_path, load_facts};
    use crate::env::Environment;

    #[test]
    fn absent_facts_are_an_empty_object() {
        let env = Environment::default();
        assert!(facts_path(&env).is_none());
        assert_eq!(load_facts(&env).unwrap(), json!({}));
    }

    #[test]
    fn facts_are_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.json");
        std::fs::write(&path, r#"{"os":{"family":"RedHat"},"cores":4}"#).unwrap();

        let env = Environment {
            facts_path: Some(path.clone()),
            ..Environment::default()
        };
        assert_eq!(facts_path(&env), Some(path.as_path()));

        let facts = load_facts(&env).unwrap();
        assert_eq!(facts["os"]["family"], "RedHat");
        assert_eq!(facts["cores"], 4);
    }

    #[test]
    fn unreadable_facts_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let env = Environment {
            facts_path: Some(dir.path().join("missing.json")),
            ..Environment::default()
        };
        assert!(matches!(load_facts(&env), Err(ExtAgentError::ReadError { .. })));
    }

    #[test]
    fn invalid_facts_are_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.json");
        std::fs::write(&path, "os: linux").unwrap();

        let env = Environment {
            facts_path: Some(path),
            ..Environment::default()
        };
        assert!(matches!(load_facts(&env), Err(ExtAgentError::DecodeError { .. })));
    }
}
