//! # Logic Gates
//!
//! Pure n-ary boolean combinators used by permission trees.
//!
//! Every gate takes an ordered list of already-evaluated inputs:
//!
//! | Gate   | Arity | Result                               |
//! |--------|-------|--------------------------------------|
//! | `AND`  | >= 1  | all inputs true                      |
//! | `OR`   | >= 1  | at least one input true              |
//! | `NOT`  | 1     | negation of the input                |
//! | `NAND` | >= 1  | negation of `AND`                    |
//! | `NOR`  | >= 1  | negation of `OR`                     |
//! | `XOR`  | >= 1  | an odd number of inputs true         |
//! | `XNOR` | >= 1  | negation of `XOR`                    |
//!
//! ## Example
//!
//! ```rust
//! use logic_gates::LogicGate;
//!
//! let gate: LogicGate = "xor".parse().unwrap();
//! assert_eq!(gate, LogicGate::Xor);
//! assert!(gate.evaluate(&[true, false, false]).unwrap());
//! assert!(LogicGate::Not.evaluate(&[true, true]).is_err());
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised by gate evaluation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogicGateError {
    /// The gate received a number of inputs it does not accept
    #[error("{gate} gate expects {expected} input(s), got {actual}")]
    ArityViolation {
        gate: LogicGate,
        expected: Arity,
        actual: usize,
    },

    /// The name is not one of the known gates
    #[error("Unknown logic gate: {0}")]
    UnknownGate(String),
}

/// Result type for gate operations
pub type Result<T> = std::result::Result<T, LogicGateError>;

/// Number of inputs a gate accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many inputs
    Exactly(usize),
    /// At least this many inputs
    AtLeast(usize),
}

impl Arity {
    /// Check whether `count` inputs satisfy this arity
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// A named boolean combinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicGate {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
}

impl LogicGate {
    /// All gates, in canonical order
    pub const ALL: [LogicGate; 7] = [
        LogicGate::And,
        LogicGate::Or,
        LogicGate::Not,
        LogicGate::Nand,
        LogicGate::Nor,
        LogicGate::Xor,
        LogicGate::Xnor,
    ];

    /// Canonical upper-case name
    pub fn name(&self) -> &'static str {
        match self {
            LogicGate::And => "AND",
            LogicGate::Or => "OR",
            LogicGate::Not => "NOT",
            LogicGate::Nand => "NAND",
            LogicGate::Nor => "NOR",
            LogicGate::Xor => "XOR",
            LogicGate::Xnor => "XNOR",
        }
    }

    /// Case-insensitive lookup; `None` when the name is not a gate
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|gate| gate.name().eq_ignore_ascii_case(name))
    }

    /// Whether `name` is a gate name, ignoring case
    pub fn is_gate_name(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// Number of inputs this gate accepts
    pub fn arity(&self) -> Arity {
        match self {
            LogicGate::Not => Arity::Exactly(1),
            _ => Arity::AtLeast(1),
        }
    }

    /// Verify that `count` inputs are acceptable for this gate
    pub fn check_arity(&self, count: usize) -> Result<()> {
        let expected = self.arity();
        if expected.accepts(count) {
            Ok(())
        } else {
            Err(LogicGateError::ArityViolation {
                gate: *self,
                expected,
                actual: count,
            })
        }
    }

    /// Apply the gate to already-evaluated inputs
    pub fn evaluate(&self, inputs: &[bool]) -> Result<bool> {
        self.check_arity(inputs.len())?;

        let value = match self {
            LogicGate::And => and(inputs),
            LogicGate::Or => or(inputs),
            LogicGate::Not => !inputs[0],
            LogicGate::Nand => !and(inputs),
            LogicGate::Nor => !or(inputs),
            LogicGate::Xor => xor(inputs),
            LogicGate::Xnor => !xor(inputs),
        };

        Ok(value)
    }
}

fn and(inputs: &[bool]) -> bool {
    inputs.iter().all(|value| *value)
}

fn or(inputs: &[bool]) -> bool {
    inputs.iter().any(|value| *value)
}

// Parity: true when an odd number of inputs are true.
fn xor(inputs: &[bool]) -> bool {
    inputs.iter().filter(|value| **value).count() % 2 == 1
}

impl fmt::Display for LogicGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogicGate {
    type Err = LogicGateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| LogicGateError::UnknownGate(s.to_string()))
    }
}
