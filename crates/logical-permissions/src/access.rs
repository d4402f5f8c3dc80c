//! Bypass-aware access decisions

use crate::context::EvaluationContext;
use crate::error::EvaluationError;
use crate::registry::PermissionCheckerRegistry;
use crate::tree::FullPermissionTree;
use tracing::debug;

/// Decide access for a compiled tree
///
/// With `allow_bypass` set and a granted bypass decision, access is granted
/// without consulting the main tree unless the `NO_BYPASS` tree evaluates to
/// true. In every other case the main tree decides.
pub fn check_access(
    tree: &FullPermissionTree,
    registry: &PermissionCheckerRegistry,
    context: &EvaluationContext,
    bypass: Option<bool>,
    allow_bypass: bool,
) -> Result<bool, EvaluationError> {
    if allow_bypass && bypass == Some(true) {
        let vetoed = match tree.no_bypass_tree() {
            Some(no_bypass_tree) => no_bypass_tree.evaluate(registry, context)?,
            None => false,
        };

        if !vetoed {
            debug!(bypass_granted = true, "Access granted through bypass");
            return Ok(true);
        }
        debug!(vetoed, "Bypass vetoed by NO_BYPASS tree");
    }

    let allowed = tree.main_tree().evaluate(registry, context)?;
    debug!(allowed, "Evaluated main permission tree");
    Ok(allowed)
}
