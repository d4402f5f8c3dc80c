//! Permission tree nodes
//!
//! A compiled tree is a closed sum of three node kinds. Each node keeps the
//! raw sub-specification that produced it so that trees can be serialized
//! and traced back to their source.

use crate::context::EvaluationContext;
use crate::error::EvaluationError;
use crate::registry::PermissionCheckerRegistry;
use crate::spec::PermissionSpec;
use logic_gates::LogicGate;
use serde::Serialize;
use tracing::{trace, warn};

/// One node of a compiled permission tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PermissionTreeNode {
    /// Literal decision
    Boolean {
        value: bool,
        original_spec: PermissionSpec,
    },

    /// Check delegated to the checker registered for `permission_type`
    String {
        permission_type: String,
        permission_value: String,
        original_spec: PermissionSpec,
    },

    /// Logic gate over the evaluated inputs
    Gate {
        gate: LogicGate,
        inputs: Vec<PermissionTreeNode>,
        original_spec: PermissionSpec,
    },
}

impl PermissionTreeNode {
    pub fn boolean(value: bool, original_spec: PermissionSpec) -> Self {
        Self::Boolean {
            value,
            original_spec,
        }
    }

    pub fn string(
        permission_type: impl Into<String>,
        permission_value: impl Into<String>,
        original_spec: PermissionSpec,
    ) -> Self {
        Self::String {
            permission_type: permission_type.into(),
            permission_value: permission_value.into(),
            original_spec,
        }
    }

    pub fn gate(gate: LogicGate, inputs: Vec<PermissionTreeNode>, original_spec: PermissionSpec) -> Self {
        Self::Gate {
            gate,
            inputs,
            original_spec,
        }
    }

    /// Raw sub-specification this node was built from
    pub fn original_spec(&self) -> &PermissionSpec {
        match self {
            Self::Boolean { original_spec, .. }
            | Self::String { original_spec, .. }
            | Self::Gate { original_spec, .. } => original_spec,
        }
    }

    /// Direct children; empty for leaves
    pub fn children(&self) -> &[PermissionTreeNode] {
        match self {
            Self::Gate { inputs, .. } => inputs,
            Self::Boolean { .. } | Self::String { .. } => &[],
        }
    }

    /// Number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Self::node_count).sum::<usize>()
    }

    /// Evaluate the node against a context
    ///
    /// Gates evaluate every input before combining them; nothing is
    /// short-circuited.
    pub fn evaluate(
        &self,
        registry: &PermissionCheckerRegistry,
        context: &EvaluationContext,
    ) -> Result<bool, EvaluationError> {
        let value = match self {
            Self::Boolean { value, .. } => *value,
            Self::String {
                permission_type,
                permission_value,
                ..
            } => {
                let checker = registry.get(permission_type).ok_or_else(|| {
                    EvaluationError::UnregisteredPermissionType(permission_type.clone())
                })?;
                checker
                    .check_permission(permission_value, context)
                    .map_err(|source| {
                        warn!(
                            permission_type = %permission_type,
                            value = %permission_value,
                            error = %source,
                            "Permission checker failed"
                        );
                        EvaluationError::CheckerFailed {
                            permission_type: permission_type.clone(),
                            value: permission_value.clone(),
                            source,
                        }
                    })?
            }
            Self::Gate { gate, inputs, .. } => {
                let values = inputs
                    .iter()
                    .map(|input| input.evaluate(registry, context))
                    .collect::<Result<Vec<_>, _>>()?;
                gate.evaluate(&values)?
            }
        };

        trace!(spec = %self.original_spec(), value, "Evaluated permission node");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::FnChecker;
    use crate::error::CheckerError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn role_registry(calls: Arc<AtomicUsize>) -> PermissionCheckerRegistry {
        let mut registry = PermissionCheckerRegistry::new();
        registry
            .add(
                Arc::new(FnChecker::new(
                    "role",
                    move |role: &str, ctx: &EvaluationContext| -> Result<bool, CheckerError> {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(ctx
                            .get("roles")
                            .and_then(|roles| roles.as_array())
                            .map(|roles| roles.iter().any(|r| r == role))
                            .unwrap_or(false))
                    },
                )),
                false,
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_boolean_leaf() {
        let registry = PermissionCheckerRegistry::new();
        let ctx = EvaluationContext::empty();
        assert!(PermissionTreeNode::boolean(true, json!(true))
            .evaluate(&registry, &ctx)
            .unwrap());
        assert!(!PermissionTreeNode::boolean(false, json!("false"))
            .evaluate(&registry, &ctx)
            .unwrap());
    }

    #[test]
    fn test_gate_evaluates_every_input() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = role_registry(calls.clone());
        let ctx = EvaluationContext::empty().with("roles", json!(["editor"]));

        let node = PermissionTreeNode::gate(
            LogicGate::Or,
            vec![
                PermissionTreeNode::string("role", "editor", json!("editor")),
                PermissionTreeNode::string("role", "admin", json!("admin")),
            ],
            json!(["editor", "admin"]),
        );

        assert!(node.evaluate(&registry, &ctx).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(node.node_count(), 3);
    }

    #[test]
    fn test_unregistered_type_at_evaluation() {
        let registry = PermissionCheckerRegistry::new();
        let node = PermissionTreeNode::string("role", "admin", json!({"role": "admin"}));
        let err = node
            .evaluate(&registry, &EvaluationContext::empty())
            .unwrap_err();
        assert!(matches!(err, EvaluationError::UnregisteredPermissionType(t) if t == "role"));
    }

    #[test]
    fn test_checker_failure_propagates() {
        let mut registry = PermissionCheckerRegistry::new();
        registry
            .add(
                Arc::new(FnChecker::new(
                    "flag",
                    |_: &str, _: &EvaluationContext| -> Result<bool, CheckerError> {
                        Err("flag store offline".into())
                    },
                )),
                false,
            )
            .unwrap();
        let node = PermissionTreeNode::gate(
            LogicGate::And,
            vec![
                PermissionTreeNode::boolean(true, json!(true)),
                PermissionTreeNode::string("flag", "beta", json!("beta")),
            ],
            json!([true, "beta"]),
        );

        let err = node
            .evaluate(&registry, &EvaluationContext::empty())
            .unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::CheckerFailed { ref permission_type, .. } if permission_type == "flag"
        ));
    }

    #[test]
    fn test_serialize_node_shape() {
        let node = PermissionTreeNode::gate(
            LogicGate::Not,
            vec![PermissionTreeNode::boolean(false, json!(false))],
            json!({"not": false}),
        );
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["kind"], json!("gate"));
        assert_eq!(value["gate"], json!("NOT"));
        assert_eq!(value["inputs"][0]["kind"], json!("boolean"));
    }
}
