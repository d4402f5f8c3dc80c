//! Permission checker registry
//!
//! Maps permission type names to their checkers. The registry is passed
//! explicitly to the deserializer and to evaluation; there is no global
//! instance.

use crate::checker::PermissionChecker;
use crate::error::RegistryError;
use crate::spec::{FALSE, NO_BYPASS, TRUE};
use logic_gates::LogicGate;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Keys with a fixed meaning in every permission tree
pub fn reserved_keys() -> Vec<&'static str> {
    let mut keys = vec![NO_BYPASS, TRUE, FALSE];
    keys.extend(LogicGate::ALL.iter().map(|gate| gate.name()));
    keys
}

/// Whether `name` collides with a reserved key, ignoring case
pub fn is_reserved_key(name: &str) -> bool {
    reserved_keys()
        .iter()
        .any(|key| key.eq_ignore_ascii_case(name))
}

/// Named collection of permission checkers
#[derive(Clone, Default)]
pub struct PermissionCheckerRegistry {
    checkers: HashMap<String, Arc<dyn PermissionChecker>>,
}

impl PermissionCheckerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from checkers; later duplicates are rejected
    pub fn from_checkers<I>(checkers: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Arc<dyn PermissionChecker>>,
    {
        let mut registry = Self::new();
        for checker in checkers {
            registry.add(checker, false)?;
        }
        Ok(registry)
    }

    /// Register a checker under its own name
    ///
    /// Fails when the name is empty or reserved, or when the name is taken
    /// and `overwrite` is false.
    pub fn add(
        &mut self,
        checker: Arc<dyn PermissionChecker>,
        overwrite: bool,
    ) -> Result<&mut Self, RegistryError> {
        let name = checker.name().to_string();
        if name.is_empty() || is_reserved_key(&name) {
            return Err(RegistryError::InvalidPermissionType(name));
        }
        if !overwrite && self.checkers.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }

        debug!(permission_type = %name, overwrite, "Registering permission checker");
        self.checkers.insert(name, checker);
        Ok(self)
    }

    /// Remove a checker; returns whether it was present
    pub fn remove(&mut self, name: &str) -> bool {
        self.checkers.remove(name).is_some()
    }

    /// Whether a checker is registered under `name` (exact match)
    pub fn has(&self, name: &str) -> bool {
        self.checkers.contains_key(name)
    }

    /// Checker registered under `name`
    pub fn get(&self, name: &str) -> Option<&Arc<dyn PermissionChecker>> {
        self.checkers.get(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.checkers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Every key usable in a permission tree: reserved keys, then types
    pub fn valid_permission_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = reserved_keys().into_iter().map(str::to_string).collect();
        keys.extend(self.names().into_iter().map(str::to_string));
        keys
    }
}

impl fmt::Debug for PermissionCheckerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionCheckerRegistry")
            .field("types", &self.names())
            .finish()
    }
}
