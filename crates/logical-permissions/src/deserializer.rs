//! Permission tree deserialization
//!
//! Compiles a raw specification into a [`PermissionTree`] by recursive
//! descent. Validation is fail-fast: the first structural problem aborts the
//! whole build and no partial tree is returned.
//!
//! Sibling entries of a mapping are combined with an implicit `OR` unless the
//! mapping is itself the input list of an explicit gate. A single input under
//! `AND` or `OR` collapses to the input itself.

use crate::error::PermissionTreeError;
use crate::node::PermissionTreeNode;
use crate::registry::PermissionCheckerRegistry;
use crate::spec::{
    entries, is_boolean_token, is_empty_mapping, render, single_entry, PermissionSpec, SpecKey,
    NO_BYPASS, TRUE,
};
use crate::tree::{FullPermissionTree, PermissionTree};
use logic_gates::LogicGate;
use serde_json::{Map, Value};
use tracing::debug;

type Result<T> = std::result::Result<T, PermissionTreeError>;

/// Key under which a value was found
#[derive(Debug, Clone, Copy)]
enum Parent<'k> {
    Root,
    Index,
    Gate(LogicGate),
    Type(&'k str),
}

/// Compiles raw specifications into permission trees
#[derive(Debug, Clone, Copy)]
pub struct PermissionTreeDeserializer<'r> {
    registry: &'r PermissionCheckerRegistry,
}

impl<'r> PermissionTreeDeserializer<'r> {
    pub fn new(registry: &'r PermissionCheckerRegistry) -> Self {
        Self { registry }
    }

    /// Compile `spec` into a tree
    pub fn deserialize(&self, spec: &PermissionSpec) -> Result<PermissionTree> {
        if is_empty_mapping(spec) {
            return Ok(PermissionTree::new(
                spec.clone(),
                PermissionTreeNode::boolean(true, spec.clone()),
            ));
        }

        let inputs = self.parse_value(Parent::Root, spec, None)?;
        let root = wrap(LogicGate::Or, inputs, spec.clone())?;

        debug!(nodes = root.node_count(), "Deserialized permission tree");
        Ok(PermissionTree::new(spec.clone(), root))
    }

    fn parse_value(
        &self,
        parent: Parent<'_>,
        spec: &PermissionSpec,
        permission_type: Option<&str>,
    ) -> Result<Vec<PermissionTreeNode>> {
        match spec {
            Value::Bool(value) => Ok(vec![parse_boolean(*value, spec, permission_type)?]),
            Value::String(value) => Ok(vec![parse_string(parent, value, spec, permission_type)?]),
            Value::Array(_) | Value::Object(_) => self.parse_mapping(parent, spec, permission_type),
            Value::Null | Value::Number(_) => Err(PermissionTreeError::InvalidSpecShape {
                spec: render(spec),
            }),
        }
    }

    fn parse_mapping(
        &self,
        parent: Parent<'_>,
        spec: &PermissionSpec,
        permission_type: Option<&str>,
    ) -> Result<Vec<PermissionTreeNode>> {
        let entries = entries(spec).unwrap_or_default();
        let mut nodes = Vec::with_capacity(entries.len());
        for (key, value) in &entries {
            nodes.extend(self.parse_entry(key, value, permission_type)?);
        }

        if entries.len() > 1 && !matches!(parent, Parent::Gate(_)) {
            nodes = vec![wrap(LogicGate::Or, nodes, spec.clone())?];
        }

        Ok(nodes)
    }

    fn parse_entry(
        &self,
        key: &SpecKey,
        value: &PermissionSpec,
        permission_type: Option<&str>,
    ) -> Result<Vec<PermissionTreeNode>> {
        let name = match key {
            SpecKey::Index(_) => return self.parse_value(Parent::Index, value, permission_type),
            SpecKey::Name(name) => name.as_str(),
        };
        let entry_spec = || single_entry(key, value.clone());

        if name.eq_ignore_ascii_case(NO_BYPASS) {
            return Err(PermissionTreeError::MisplacedNoBypass {
                spec: render(&entry_spec()),
            });
        }

        if let Some(gate) = LogicGate::from_name(name) {
            let inputs = self.parse_value(Parent::Gate(gate), value, permission_type)?;
            return Ok(vec![wrap(gate, inputs, entry_spec())?]);
        }

        if is_boolean_token(name) {
            return Err(PermissionTreeError::BooleanKeyHasChildren {
                spec: render(&entry_spec()),
            });
        }

        if let Some(existing) = permission_type {
            return Err(PermissionTreeError::TypeNestedUnderType {
                permission_type: existing.to_string(),
                spec: render(&entry_spec()),
            });
        }

        if !self.registry.has(name) {
            return Err(PermissionTreeError::UnknownPermissionType {
                permission_type: name.to_string(),
            });
        }

        self.parse_value(Parent::Type(name), value, Some(name))
    }
}

fn parse_boolean(
    value: bool,
    spec: &PermissionSpec,
    permission_type: Option<&str>,
) -> Result<PermissionTreeNode> {
    if let Some(existing) = permission_type {
        return Err(PermissionTreeError::BooleanUnderType {
            permission_type: existing.to_string(),
            spec: render(spec),
        });
    }

    Ok(PermissionTreeNode::boolean(value, spec.clone()))
}

fn parse_string(
    parent: Parent<'_>,
    value: &str,
    spec: &PermissionSpec,
    permission_type: Option<&str>,
) -> Result<PermissionTreeNode> {
    if value.is_empty() {
        return Err(PermissionTreeError::EmptyStringPermission);
    }

    if is_boolean_token(value) {
        return parse_boolean(value.eq_ignore_ascii_case(TRUE), spec, permission_type);
    }

    let Some(permission_type) = permission_type else {
        return Err(PermissionTreeError::StringWithoutTypeContext {
            spec: render(spec),
        });
    };

    // A string directly under its type key keeps the key in its source spec.
    let original_spec = match parent {
        Parent::Type(key) if key == permission_type => {
            single_entry(&SpecKey::Name(key.to_string()), spec.clone())
        }
        _ => spec.clone(),
    };

    Ok(PermissionTreeNode::string(permission_type, value, original_spec))
}

/// Combine `inputs` under `gate`, collapsing single-input `AND`/`OR`
fn wrap(
    gate: LogicGate,
    mut inputs: Vec<PermissionTreeNode>,
    spec: PermissionSpec,
) -> Result<PermissionTreeNode> {
    if inputs.len() == 1 && matches!(gate, LogicGate::And | LogicGate::Or) {
        if let Some(input) = inputs.pop() {
            return Ok(input);
        }
    }

    gate.check_arity(inputs.len())
        .map_err(|source| PermissionTreeError::GateArityViolation {
            source,
            spec: render(&spec),
        })?;

    Ok(PermissionTreeNode::gate(gate, inputs, spec))
}

/// Compiles a full specification, splitting off the top-level `NO_BYPASS` tree
#[derive(Debug, Clone, Copy)]
pub struct FullPermissionTreeDeserializer<'r> {
    tree_deserializer: PermissionTreeDeserializer<'r>,
}

impl<'r> FullPermissionTreeDeserializer<'r> {
    pub fn new(registry: &'r PermissionCheckerRegistry) -> Self {
        Self {
            tree_deserializer: PermissionTreeDeserializer::new(registry),
        }
    }

    /// Compile the main tree, then the veto tree if present
    pub fn deserialize(&self, spec: &PermissionSpec) -> Result<FullPermissionTree> {
        let (main_spec, no_bypass_spec) = split_no_bypass(spec);

        let main_tree = self.tree_deserializer.deserialize(&main_spec)?;
        let no_bypass_tree = no_bypass_spec
            .map(|spec| self.tree_deserializer.deserialize(&spec))
            .transpose()?;

        Ok(FullPermissionTree::new(main_tree, no_bypass_tree))
    }
}

/// Separate top-level `NO_BYPASS` entries from the rest of the specification
///
/// Several differently-cased `NO_BYPASS` keys are combined into one list,
/// i.e. an implicit `OR`.
fn split_no_bypass(spec: &PermissionSpec) -> (PermissionSpec, Option<PermissionSpec>) {
    let Value::Object(map) = spec else {
        return (spec.clone(), None);
    };

    let mut main = Map::new();
    let mut vetoes = Vec::new();
    for (key, value) in map {
        if SpecKey::parse(key).is_token(NO_BYPASS) {
            vetoes.push(value.clone());
        } else {
            main.insert(key.clone(), value.clone());
        }
    }

    let no_bypass = match vetoes.len() {
        0 => None,
        1 => vetoes.pop(),
        _ => Some(Value::Array(vetoes)),
    };

    (Value::Object(main), no_bypass)
}
