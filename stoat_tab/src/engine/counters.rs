//! Counters for a build.
//!
//! All counts are deterministic: a build on identical input and configuration produces an identical record, apart from the elapsed time.

/// The statistics record of a build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    /// Applications of α-rules.
    pub alpha_applications: u64,

    /// Applications of β-rules (each creating two or more branches).
    pub beta_applications: u64,

    /// Applications of δ-rules (each introducing a witness constant).
    pub delta_applications: u64,

    /// Individual γ instantiations, summed over universals and branches.
    pub gamma_instantiations: u64,

    /// Branches created, the root included.
    pub branches_created: u64,

    /// Closure checks performed while adding signed formulas.
    pub closure_checks: u64,

    /// Branches closed.
    pub closures: u64,

    /// Open branches pruned by subsumption.
    pub subsumption_eliminations: u64,

    /// The largest count of signed formulas seen on a single branch.
    pub max_branch_size: usize,

    /// Iterations of the build loop.
    pub total_iterations: u64,

    /// Wall time of the build.
    pub time: std::time::Duration,
}

impl Counters {
    /// Record a branch size, keeping the maximum.
    pub fn note_branch_size(&mut self, size: usize) {
        if size > self.max_branch_size {
            self.max_branch_size = size;
        }
    }

    /// The record with the elapsed time zeroed, for comparisons in tests.
    pub fn without_time(&self) -> Counters {
        Counters {
            time: std::time::Duration::default(),
            ..self.clone()
        }
    }
}
