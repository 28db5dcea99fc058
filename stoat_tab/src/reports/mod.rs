/*!
Reports and results for a build.

A [BuildResult] is the full outcome of a tableau construction: the logical verdicts carry their branches, and the non-verdicts (cancellation, resource exhaustion) are peer variants rather than errors, so callers handle every way a build can end in one place.

A [Report] is the one-word summary.
*/

use crate::branch::{Branch, BranchId};
use crate::engine::Counters;
use crate::structures::sign::System;
use crate::structures::signed::SignedFormula;

/// High-level reports regarding a build.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Report {
    /// Some open saturated branch exists.
    Satisfiable,

    /// Every branch closed.
    Unsatisfiable,

    /// The cancellation token fired.
    Cancelled,

    /// A safety bound tripped; satisfiability was not decided.
    ResourceExhausted,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::ResourceExhausted => write!(f, "ResourceExhausted"),
        }
    }
}

/// A closed branch, reduced to its identifier and the contradictory pair witnessing closure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClosedBranch {
    pub id: BranchId,

    /// The pair of signed formulas which closed the branch, in arrival order.
    pub witness: (SignedFormula, SignedFormula),
}

impl ClosedBranch {
    /// Reduce a closed branch. `None` if the branch is in fact open.
    pub fn from_branch(branch: &Branch) -> Option<Self> {
        branch.closure().map(|witness| ClosedBranch {
            id: branch.id(),
            witness: witness.clone(),
        })
    }
}

impl std::fmt::Display for ClosedBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "branch {}: {} ⊥ {}", self.id, self.witness.0, self.witness.1)
    }
}

/// The safety bound a build ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExhaustionReason {
    /// The active-branch cap.
    BranchLimit(usize),

    /// The per-universal instantiation cap.
    InstantiationLimit(usize),
}

impl std::fmt::Display for ExhaustionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BranchLimit(limit) => write!(f, "branch limit {limit} reached"),
            Self::InstantiationLimit(limit) => {
                write!(f, "instantiation limit {limit} reached for a universal")
            }
        }
    }
}

/// The outcome of a build.
#[derive(Clone, Debug)]
pub enum BuildResult {
    /// At least one open saturated branch exists.
    Sat {
        system: System,

        /// The initial signed formulas, kept for the model post-condition.
        initial: Vec<SignedFormula>,

        /// Every open saturated branch, leftmost first.
        open_branches: Vec<Branch>,

        stats: Counters,
    },

    /// Every branch closed, each with its contradiction witness.
    Unsat {
        system: System,
        closed_branches: Vec<ClosedBranch>,
        stats: Counters,
    },

    /// The cancellation token fired before a verdict.
    Cancelled { stats: Counters },

    /// A safety bound tripped before a verdict.
    ResourceExhausted {
        reason: ExhaustionReason,
        stats: Counters,
    },
}

impl BuildResult {
    /// The one-word summary.
    pub fn report(&self) -> Report {
        match self {
            BuildResult::Sat { .. } => Report::Satisfiable,
            BuildResult::Unsat { .. } => Report::Unsatisfiable,
            BuildResult::Cancelled { .. } => Report::Cancelled,
            BuildResult::ResourceExhausted { .. } => Report::ResourceExhausted,
        }
    }

    pub fn is_sat(&self) -> bool {
        matches!(self, BuildResult::Sat { .. })
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, BuildResult::Unsat { .. })
    }

    /// The statistics of the build, however it ended.
    pub fn stats(&self) -> &Counters {
        match self {
            BuildResult::Sat { stats, .. }
            | BuildResult::Unsat { stats, .. }
            | BuildResult::Cancelled { stats }
            | BuildResult::ResourceExhausted { stats, .. } => stats,
        }
    }
}
