//! Structural checks over boards and engines.
//!
//! The engine runs [`ConnectFourInvariants`] after every accepted drop in
//! debug builds and panics if any check fails.

use serde::{Deserialize, Serialize};

/// A property of `S` that every reachable state satisfies.
pub trait Invariant<S> {
    /// Returns false if `state` breaks the property.
    fn holds(state: &S) -> bool;

    /// One-line statement of the property, used in violation reports.
    fn description() -> &'static str;
}

/// A failed check, named by the invariant's description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantViolation {
    /// What should have held.
    pub description: String,
}

impl InvariantViolation {
    /// Records a failed check.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Tuple of invariants run as one check.
///
/// Implemented for pairs and triples.
pub trait InvariantSet<S> {
    /// Runs every member and returns all failures, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod alternating_turn;
pub mod gravity;
pub mod monotonic_fill;

pub use alternating_turn::AlternatingTurnInvariant;
pub use gravity::GravityInvariant;
pub use monotonic_fill::MonotonicFillInvariant;

/// Gravity, replayed fill and turn order, checked together.
pub type ConnectFourInvariants = (
    GravityInvariant,
    MonotonicFillInvariant,
    AlternatingTurnInvariant,
);
