//! Error types for permission trees, evaluation and the checker registry

use logic_gates::LogicGateError;
use thiserror::Error;

/// Failure reported by a permission or bypass checker
pub type CheckerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Structural errors found while deserializing a permission specification
///
/// Every variant carries the offending sub-specification rendered as JSON.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermissionTreeError {
    /// The value is neither a boolean, a string nor a mapping
    #[error("A permission must be a boolean, a string or a mapping. Evaluated permissions: {spec}")]
    InvalidSpecShape { spec: String },

    /// An empty string was used as a permission value
    #[error("You cannot use an empty string in a permission tree")]
    EmptyStringPermission,

    /// A string permission has no permission type as an ancestor
    #[error("A string value cannot be used without having a permission type as an ancestor. Evaluated permissions: {spec}")]
    StringWithoutTypeContext { spec: String },

    /// A boolean literal was placed below a permission type
    #[error("You cannot put a boolean permission as a descendant to a permission type. Existing type: \"{permission_type}\". Evaluated permissions: {spec}")]
    BooleanUnderType {
        permission_type: String,
        spec: String,
    },

    /// A mapping key is neither reserved nor a registered type
    #[error("The permission type \"{permission_type}\" could not be found")]
    UnknownPermissionType { permission_type: String },

    /// A permission type was placed below another permission type
    #[error("You cannot put a permission type as a descendant to another permission type. Existing type: \"{permission_type}\". Evaluated permissions: {spec}")]
    TypeNestedUnderType {
        permission_type: String,
        spec: String,
    },

    /// `TRUE` or `FALSE` was used as a mapping key
    #[error("A boolean permission cannot have children. Evaluated permissions: {spec}")]
    BooleanKeyHasChildren { spec: String },

    /// `NO_BYPASS` appeared below the top level
    #[error("The NO_BYPASS key must be placed highest in the permission hierarchy. Evaluated permissions: {spec}")]
    MisplacedNoBypass { spec: String },

    /// A gate received a number of inputs it does not accept
    #[error("Logic gate arity violation: {source}. Evaluated permissions: {spec}")]
    GateArityViolation {
        #[source]
        source: LogicGateError,
        spec: String,
    },
}

/// Errors raised while evaluating a built tree
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// A registered permission checker failed
    #[error("Permission checker \"{permission_type}\" failed for value \"{value}\": {source}")]
    CheckerFailed {
        permission_type: String,
        value: String,
        #[source]
        source: CheckerError,
    },

    /// The bypass checker failed
    #[error("Bypass access checker failed: {source}")]
    BypassCheckFailed {
        #[source]
        source: CheckerError,
    },

    /// The type was removed from the registry after the tree was built
    #[error("The permission type \"{0}\" is not registered")]
    UnregisteredPermissionType(String),

    /// Gate evaluation failed
    #[error(transparent)]
    Gate(#[from] LogicGateError),
}

/// Errors raised by the permission checker registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The name is empty or collides with a reserved key
    #[error("The name \"{0}\" cannot be used as a permission type")]
    InvalidPermissionType(String),

    /// A checker with this name is already registered
    #[error("The permission type \"{0}\" already exists. Pass overwrite to replace it")]
    AlreadyRegistered(String),
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level error for the [`LogicalPermissions`](crate::LogicalPermissions) facade
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Tree(#[from] PermissionTreeError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for facade operations
pub type Result<T> = std::result::Result<T, Error>;
