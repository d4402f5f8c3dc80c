//! High-level access checking service
//!
//! [`LogicalPermissions`] owns the checker registry, the optional bypass
//! checker and the configuration, and checks raw specifications end to end.

use crate::access::check_access;
use crate::checker::{BypassAccessChecker, PermissionChecker};
use crate::config::LogicalPermissionsConfig;
use crate::context::EvaluationContext;
use crate::debug::DebugEntry;
use crate::deserializer::FullPermissionTreeDeserializer;
use crate::error::{EvaluationError, Result};
use crate::registry::PermissionCheckerRegistry;
use crate::serializer::FullPermissionTreeSerializer;
use crate::spec::PermissionSpec;
use crate::tree::FullPermissionTree;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Access checker over raw permission specifications
#[derive(Clone, Default)]
pub struct LogicalPermissions {
    registry: PermissionCheckerRegistry,
    bypass_checker: Option<Arc<dyn BypassAccessChecker>>,
    config: LogicalPermissionsConfig,
}

impl LogicalPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LogicalPermissionsConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace the registry
    pub fn with_registry(mut self, registry: PermissionCheckerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the bypass checker
    pub fn with_bypass_checker(mut self, checker: Arc<dyn BypassAccessChecker>) -> Self {
        self.bypass_checker = Some(checker);
        self
    }

    pub fn config(&self) -> &LogicalPermissionsConfig {
        &self.config
    }

    pub fn registry(&self) -> &PermissionCheckerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PermissionCheckerRegistry {
        &mut self.registry
    }

    /// Register a checker using the configured overwrite policy
    pub fn add_type(&mut self, checker: Arc<dyn PermissionChecker>) -> Result<()> {
        self.registry.add(checker, self.config.overwrite_types)?;
        Ok(())
    }

    /// Remove a checker; returns whether it was present
    pub fn remove_type(&mut self, name: &str) -> bool {
        self.registry.remove(name)
    }

    pub fn set_bypass_checker(&mut self, checker: Arc<dyn BypassAccessChecker>) {
        self.bypass_checker = Some(checker);
    }

    pub fn clear_bypass_checker(&mut self) {
        self.bypass_checker = None;
    }

    pub fn has_bypass_checker(&self) -> bool {
        self.bypass_checker.is_some()
    }

    /// Every key usable in a permission tree
    pub fn valid_permission_keys(&self) -> Vec<String> {
        self.registry.valid_permission_keys()
    }

    /// Compile a full specification against the current registry
    pub fn deserialize(&self, spec: &PermissionSpec) -> Result<FullPermissionTree> {
        Ok(FullPermissionTreeDeserializer::new(&self.registry).deserialize(spec)?)
    }

    /// Serialize a full tree back to its raw form
    pub fn serialize(&self, tree: &FullPermissionTree) -> PermissionSpec {
        FullPermissionTreeSerializer::default().serialize(tree)
    }

    /// Check access for a raw specification
    pub fn check_access(
        &self,
        spec: &PermissionSpec,
        context: &EvaluationContext,
        allow_bypass: bool,
    ) -> Result<bool> {
        let tree = self.deserialize(spec)?;
        self.check_tree_access(&tree, context, allow_bypass)
    }

    /// Check access using the configured `allow_bypass`
    pub fn check_access_default(
        &self,
        spec: &PermissionSpec,
        context: &EvaluationContext,
    ) -> Result<bool> {
        self.check_access(spec, context, self.config.allow_bypass)
    }

    /// Check access for an already compiled tree
    ///
    /// The bypass checker is only consulted when `allow_bypass` is set.
    pub fn check_tree_access(
        &self,
        tree: &FullPermissionTree,
        context: &EvaluationContext,
        allow_bypass: bool,
    ) -> Result<bool> {
        let bypass = if allow_bypass {
            self.bypass_decision(context)?
        } else {
            None
        };

        let allowed = check_access(tree, &self.registry, context, bypass, allow_bypass)?;
        debug!(allowed, allow_bypass, bypass = ?bypass, "Access check completed");
        Ok(allowed)
    }

    /// Pre-order evaluation trace of the main tree of `spec`
    pub fn debug_values(
        &self,
        spec: &PermissionSpec,
        context: &EvaluationContext,
    ) -> Result<Vec<DebugEntry>> {
        let tree = self.deserialize(spec)?;
        Ok(tree.main_tree().debug_values(&self.registry, context)?)
    }

    fn bypass_decision(&self, context: &EvaluationContext) -> Result<Option<bool>> {
        let Some(checker) = &self.bypass_checker else {
            return Ok(None);
        };
        let granted = checker
            .check_bypass_access(context)
            .map_err(|source| EvaluationError::BypassCheckFailed { source })?;
        Ok(Some(granted))
    }
}

impl fmt::Debug for LogicalPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicalPermissions")
            .field("registry", &self.registry)
            .field("has_bypass_checker", &self.has_bypass_checker())
            .field("config", &self.config)
            .finish()
    }
}
