//! Readiness gate for external players
//!
//! External SDKs announce readiness through a callback. The gate turns that
//! into a guard: `NotReady -> Ready` happens once, and only teardown moves it
//! back.

use std::cell::Cell;
use std::fmt;

/// Gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    #[default]
    NotReady,
    Ready,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::NotReady => write!(f, "not-ready"),
            Readiness::Ready => write!(f, "ready"),
        }
    }
}

/// Single-transition readiness flag
#[derive(Debug, Default)]
pub struct ReadinessGate {
    state: Cell<Readiness>,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Readiness {
        self.state.get()
    }

    pub fn is_ready(&self) -> bool {
        self.state.get() == Readiness::Ready
    }

    /// Open the gate; returns false if it was already open
    pub fn mark_ready(&self) -> bool {
        self.state.replace(Readiness::Ready) == Readiness::NotReady
    }

    /// Close the gate on teardown; returns true if it was open
    pub fn reset(&self) -> bool {
        self.state.replace(Readiness::NotReady) == Readiness::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_transition() {
        let gate = ReadinessGate::new();
        assert!(!gate.is_ready());
        assert!(gate.mark_ready());
        assert!(!gate.mark_ready());
        assert_eq!(gate.state(), Readiness::Ready);
    }

    #[test]
    fn test_reset() {
        let gate = ReadinessGate::new();
        assert!(!gate.reset());
        gate.mark_ready();
        assert!(gate.reset());
        assert!(!gate.is_ready());
        assert_eq!(gate.state().to_string(), "not-ready");
    }
}
