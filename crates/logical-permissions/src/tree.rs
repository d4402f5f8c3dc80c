//! Compiled permission trees

use crate::context::EvaluationContext;
use crate::debug::{debug_values, DebugEntry};
use crate::error::EvaluationError;
use crate::node::PermissionTreeNode;
use crate::registry::PermissionCheckerRegistry;
use crate::spec::PermissionSpec;
use serde::Serialize;

/// Root node together with the specification it was compiled from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermissionTree {
    original_spec: PermissionSpec,
    root: PermissionTreeNode,
}

impl PermissionTree {
    pub fn new(original_spec: PermissionSpec, root: PermissionTreeNode) -> Self {
        Self {
            original_spec,
            root,
        }
    }

    pub fn original_spec(&self) -> &PermissionSpec {
        &self.original_spec
    }

    pub fn root(&self) -> &PermissionTreeNode {
        &self.root
    }

    /// Evaluate the root node
    pub fn evaluate(
        &self,
        registry: &PermissionCheckerRegistry,
        context: &EvaluationContext,
    ) -> Result<bool, EvaluationError> {
        self.root.evaluate(registry, context)
    }

    /// Pre-order trace of the whole tree
    pub fn debug_values(
        &self,
        registry: &PermissionCheckerRegistry,
        context: &EvaluationContext,
    ) -> Result<Vec<DebugEntry>, EvaluationError> {
        debug_values(&self.root, registry, context)
    }
}

/// Main tree plus the optional `NO_BYPASS` veto tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullPermissionTree {
    main_tree: PermissionTree,
    no_bypass_tree: Option<PermissionTree>,
}

impl FullPermissionTree {
    pub fn new(main_tree: PermissionTree, no_bypass_tree: Option<PermissionTree>) -> Self {
        Self {
            main_tree,
            no_bypass_tree,
        }
    }

    pub fn main_tree(&self) -> &PermissionTree {
        &self.main_tree
    }

    pub fn no_bypass_tree(&self) -> Option<&PermissionTree> {
        self.no_bypass_tree.as_ref()
    }

    pub fn has_no_bypass_tree(&self) -> bool {
        self.no_bypass_tree.is_some()
    }
}

impl From<PermissionTree> for FullPermissionTree {
    fn from(main_tree: PermissionTree) -> Self {
        Self::new(main_tree, None)
    }
}
