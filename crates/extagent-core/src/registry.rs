//! The action registry: unique action name to handler.
//!
//! Registration needs `&mut self` and dispatch only `&self`, so the registry
//! is populated before dispatch and read-only afterwards.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use extagent_contracts::error::{ExtAgentError, ExtAgentResult};

use crate::traits::ActionHandler;

#[derive(Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, Box<dyn ActionHandler>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`.
    ///
    /// Returns `InvalidActionName` for an empty name and `DuplicateAction`
    /// when `name` is already taken; the existing handler is kept.
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H) -> ExtAgentResult<()>
    where
        H: ActionHandler + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(ExtAgentError::InvalidActionName { action: name });
        }
        if self.actions.contains_key(&name) {
            return Err(ExtAgentError::DuplicateAction { action: name });
        }

        debug!(action = %name, "registered action");
        self.actions.insert(name, Box::new(handler));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn ActionHandler> {
        self.actions.get(name).map(|h| h.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered action names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}
