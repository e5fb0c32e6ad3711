//! Database readiness precondition
//!
//! The readiness poll produces a `Readiness`; stages that talk to the
//! database require a `DatabaseReady` instead of probing again. Only the
//! readiness poll can construct one.

use std::fmt;

/// Proof that the database answered a query during this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseReady {
    attempts: u32,
}

impl DatabaseReady {
    pub(crate) fn after(attempts: u32) -> Self {
        Self { attempts }
    }

    /// Probes it took to get an answer
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready(DatabaseReady),
    NotReady { attempts: u32 },
}

impl Readiness {
    pub fn ready(&self) -> Option<&DatabaseReady> {
        match self {
            Readiness::Ready(proof) => Some(proof),
            Readiness::NotReady { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready().is_some()
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Ready(proof) => write!(f, "ready after {} attempt(s)", proof.attempts),
            Readiness::NotReady { attempts } => write!(f, "not ready after {attempts} attempts"),
        }
    }
}
