//! What the store does when a snapshot write fails

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reaction to a failed snapshot write after an in-memory mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceFailurePolicy {
    /// Log FATAL and exit the process with status 1
    #[default]
    Halt,
    /// Revert the mutation and return `PersistenceFailure` to the caller
    Rollback,
}

impl PersistenceFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersistenceFailurePolicy::Halt => "halt",
            PersistenceFailurePolicy::Rollback => "rollback",
        }
    }
}

impl fmt::Display for PersistenceFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersistenceFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "halt" => Ok(PersistenceFailurePolicy::Halt),
            "rollback" => Ok(PersistenceFailurePolicy::Rollback),
            other => Err(format!(
                "invalid persistence failure policy '{}', expected 'halt' or 'rollback'",
                other
            )),
        }
    }
}
