//! Evaluation traces
//!
//! A trace lists every node of a tree in pre-order together with the value it
//! evaluated to and the raw sub-specification it came from, which explains
//! exactly which leaves and gates produced a decision.

use crate::context::EvaluationContext;
use crate::error::EvaluationError;
use crate::node::PermissionTreeNode;
use crate::registry::PermissionCheckerRegistry;
use crate::spec::PermissionSpec;
use serde::{Deserialize, Serialize};

/// Evaluated value of one node and its source specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugEntry {
    pub value: bool,
    pub spec: PermissionSpec,
}

/// Pre-order trace of `node`: the node itself, then each child's trace in
/// declaration order
pub fn debug_values(
    node: &PermissionTreeNode,
    registry: &PermissionCheckerRegistry,
    context: &EvaluationContext,
) -> Result<Vec<DebugEntry>, EvaluationError> {
    let mut entries = Vec::with_capacity(node.node_count());
    collect(node, registry, context, &mut entries)?;
    Ok(entries)
}

fn collect(
    node: &PermissionTreeNode,
    registry: &PermissionCheckerRegistry,
    context: &EvaluationContext,
    entries: &mut Vec<DebugEntry>,
) -> Result<(), EvaluationError> {
    entries.push(DebugEntry {
        value: node.evaluate(registry, context)?,
        spec: node.original_spec().clone(),
    });
    for child in node.children() {
        collect(child, registry, context, entries)?;
    }
    Ok(())
}
