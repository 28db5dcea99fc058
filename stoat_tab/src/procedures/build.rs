/*!
The build loop.

# Overview

A build maintains three collections of branches: active, open (saturated), and closed.
Work always continues on the most recently split branch --- depth-first, which keeps the hot branch warm and makes the enumeration order of open branches the leftmost-first order of the tableau literature.

Each iteration pops the highest-priority waiting signed formula from the chosen branch and applies its rule:

- An α expansion adds its one delta to the branch in place.
- A β expansion replaces the branch with one child per delta.
- A δ expansion allocates a fresh witness constant first, and fires at most once per signed formula per branch.
- A γ expansion instantiates its universal at every domain constant not yet used, and the universal re-enters the queue whenever the domain grows.

Every addition runs through the branch's sign index, so closure is noticed the moment a contradictory pair co-occurs.

Termination: each α/β application strictly reduces the non-literal content of a branch (Smullyan's measure); δ fires once per signed formula per branch, and γ only instantiates constants already in the domain.
The configured caps on branch count and per-universal instantiations guard the pathological cases, and tripping one ends the build with a resource-exhausted outcome, distinct from any verdict.

Roughly, the loop is as diagrammed:

```none
          +-----------------------+
  +-------| pop an active branch  |<--------------------+
  |       +-----------------------+                     |
  |                   |                                 |
  |          queue empty? -- yes --> saturated (open)   |
  |                   |                                 |
  |                  no                                 |
  |                   ⌄                                 |
  |       +-----------------------+     α, δ, γ: extend |
  |       | apply the rule for    |---------------------+
  |       | the popped formula    |     β: split into children
  |       +-----------------------+---------------------+
  |                   |                                 |
  |            closure noticed                          |
  |                   ⌄                                 |
  +-----------> closed branches                         |
                                                        |
      (children re-enter the active collection) <-------+
```

The loop exits when no branch is active: satisfiable if some branch saturated open, unsatisfiable otherwise.
*/

use crate::branch::{AddOutcome, Branch};
use crate::engine::Engine;
use crate::misc::log::targets::{self};
use crate::procedures::subsumption;
use crate::reports::{BuildResult, ClosedBranch, ExhaustionReason};
use crate::rules::{self, propositional, quantifier, RuleClass, RuleResult};
use crate::structures::signed::SignedFormula;
use crate::types::err::{self, ErrorKind};

/// What became of one expansion step on one branch.
enum StepOutcome {
    /// The branch was extended (or left as it was) and remains active.
    Extended(Branch),

    /// The branch was replaced by children; closed ones have been recorded.
    Split(Vec<Branch>),

    /// The branch closed.
    Closed(Branch),

    /// A safety bound tripped.
    Exhausted(ExhaustionReason),
}

impl Engine {
    /// Construct a tableau from the initial signed formulas and decide satisfiability.
    ///
    /// The engine is consumed: a build is single-shot.
    ///
    /// Errors are reserved for misuse (a sign foreign to the system) and failed self-checks; cancellation and resource exhaustion are [BuildResult] variants.
    pub fn build(mut self, initial: Vec<SignedFormula>) -> Result<BuildResult, ErrorKind> {
        let system = self.config.system;

        for signed in &initial {
            if !system.admits(signed.sign) {
                return Err(ErrorKind::SystemMismatch {
                    system,
                    sign: signed.sign,
                });
            }
        }

        let timer = std::time::Instant::now();

        let mut active: Vec<Branch> = Vec::default();
        let mut open: Vec<Branch> = Vec::default();
        let mut closed: Vec<ClosedBranch> = Vec::default();

        let mut root = Branch::new(self.fresh_branch_id(), system);
        self.counters.branches_created += 1;

        for signed in &initial {
            if self.add_counted(&mut root, signed.clone()) {
                break;
            }
        }
        active.push(root);

        'build_loop: while let Some(mut branch) = active.pop() {
            self.counters.total_iterations += 1;

            if self.cancellation.as_ref().is_some_and(|token| token.is_cancelled()) {
                log::info!(target: targets::EXPANSION, "Build cancelled");
                self.counters.time = timer.elapsed();
                return Ok(BuildResult::Cancelled {
                    stats: self.counters,
                });
            }

            if branch.is_closed() {
                // Recording is deferred to here so a closure within a split is
                // handled the same way as one on the active branch.
                if let Some(record) = ClosedBranch::from_branch(&branch) {
                    closed.push(record);
                }
                continue 'build_loop;
            }

            let Some(signed) = branch.pop_next() else {
                log::trace!(target: targets::BRANCH, "Branch {} saturated", branch.id());
                branch.mark_saturated();
                open.push(branch);
                continue 'build_loop;
            };

            match self.expansion_step(branch, signed, active.len())? {
                StepOutcome::Extended(branch) => active.push(branch),

                StepOutcome::Split(children) => {
                    // Reversed, so the first delta's child is processed first.
                    for child in children.into_iter().rev() {
                        match child.is_closed() {
                            true => match ClosedBranch::from_branch(&child) {
                                Some(record) => closed.push(record),
                                None => {}
                            },
                            false => active.push(child),
                        }
                    }
                }

                StepOutcome::Closed(branch) => match ClosedBranch::from_branch(&branch) {
                    Some(record) => closed.push(record),
                    None => {
                        return Err(ErrorKind::from(err::InvariantError::ExpansionOfClosedBranch))
                    }
                },

                StepOutcome::Exhausted(reason) => {
                    log::info!(target: targets::EXPANSION, "Build exhausted: {reason}");
                    self.counters.time = timer.elapsed();
                    return Ok(BuildResult::ResourceExhausted {
                        reason,
                        stats: self.counters,
                    });
                }
            }
        }

        if self.config.enable_subsumption {
            open = subsumption::prune(open, &mut self.counters);
        }

        self.counters.time = timer.elapsed();

        match open.is_empty() {
            false => Ok(BuildResult::Sat {
                system,
                initial,
                open_branches: open,
                stats: self.counters,
            }),
            true => Ok(BuildResult::Unsat {
                system,
                closed_branches: closed,
                stats: self.counters,
            }),
        }
    }

    /// Apply the rule for `signed` to `branch`.
    ///
    /// `active_count` is the size of the active collection, for the branch cap.
    fn expansion_step(
        &mut self,
        mut branch: Branch,
        signed: SignedFormula,
        active_count: usize,
    ) -> Result<StepOutcome, ErrorKind> {
        // The queue admits only rule-bearing signed formulas.
        let Some(class) = rules::classify(self.config.system, &signed) else {
            return Ok(StepOutcome::Extended(branch));
        };

        let result = match class {
            RuleClass::Alpha | RuleClass::Beta => propositional::expand(&signed),

            RuleClass::Delta => {
                if branch.delta_fired(&signed) {
                    return Ok(StepOutcome::Extended(branch));
                }
                let witness = branch.allocate_witness();
                branch.note_delta_fired(signed.clone());
                self.counters.delta_applications += 1;
                quantifier::expand_delta(&signed, &witness)
            }

            RuleClass::Gamma => {
                let outstanding = branch.gamma_uninstantiated(&signed);

                let cap = self.config.max_instantiations_per_universal;
                if branch.gamma_count(&signed) + outstanding.len() > cap {
                    return Ok(StepOutcome::Exhausted(ExhaustionReason::InstantiationLimit(cap)));
                }

                branch.note_gamma_instantiated(&signed, &outstanding);
                self.counters.gamma_instantiations += outstanding.len() as u64;
                quantifier::expand_gamma(&signed, &outstanding)
            }
        };

        let Some(result) = result else {
            return Err(ErrorKind::from(err::InvariantError::MissingRuleExpansion));
        };

        log::trace!(
            target: targets::EXPANSION,
            "Branch {}: {signed} expands into {} delta(s)",
            branch.id(),
            result.deltas.len()
        );

        match result.is_branching() {
            false => {
                self.counters.alpha_applications += u64::from(class == RuleClass::Alpha);

                let RuleResult { deltas } = result;
                for conclusion in deltas.into_iter().flatten() {
                    if self.add_counted(&mut branch, conclusion) {
                        return Ok(StepOutcome::Closed(branch));
                    }
                }
                Ok(StepOutcome::Extended(branch))
            }

            true => {
                self.counters.beta_applications += 1;

                if active_count + result.deltas.len() > self.config.max_branches {
                    return Ok(StepOutcome::Exhausted(ExhaustionReason::BranchLimit(
                        self.config.max_branches,
                    )));
                }

                let mut children = Vec::with_capacity(result.deltas.len());
                for delta in result.deltas {
                    let mut child = branch.child(self.fresh_branch_id(), signed.clone());
                    self.counters.branches_created += 1;

                    for conclusion in delta {
                        if self.add_counted(&mut child, conclusion) {
                            break;
                        }
                    }
                    children.push(child);
                }
                Ok(StepOutcome::Split(children))
            }
        }
    }

    /// Add a signed formula to a branch, keeping the counters current.
    /// Returns true when the addition closed the branch.
    fn add_counted(&mut self, branch: &mut Branch, signed: SignedFormula) -> bool {
        let outcome = branch.add(signed);
        match outcome {
            AddOutcome::Duplicate => {}
            AddOutcome::Added => {
                self.counters.closure_checks += 1;
                self.counters.note_branch_size(branch.len());
            }
            AddOutcome::Closed => {
                self.counters.closure_checks += 1;
                self.counters.closures += 1;
            }
        }
        matches!(outcome, AddOutcome::Closed)
    }
}
