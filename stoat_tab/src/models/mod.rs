/*!
Models, and their extraction from open saturated branches.

A model is what a branch commits to: a partial assignment of truth values to the atomic formulas the branch signed, the signs themselves (so `M`/`N` epistemic standing survives the lossy projection to truth values), and the branch's Herbrand domain.

Extraction reads literals only.
The quantifier semantics live in the rules; by the time a branch saturates, every quantifier on it has been cashed out into signed instances, and the model simply records the atomic residue.
Atoms the branch never signed default per system when queried: `f` classically, the undefined value in the gap systems.

Two kinds of branch yield no model:

- a closed branch;
- a *spurious* branch: open under the closure relation, but attaching signs to some atom which no single truth value honours (`U` with `F`, say, or `T` with `N`).
  Only `T` against `F` closes, so such branches arise and count for the satisfiability verdict, but they describe no valuation and extraction skips them.

Every model handed out is checked against the initial signed formulas ([check_against](Model::check_against)); a failure there is an engine bug, reported as [InternalInvariantViolated](crate::types::err::ErrorKind::InternalInvariantViolated).
*/

use std::collections::{BTreeMap, BTreeSet};

use crate::branch::Branch;
use crate::misc::log::targets::{self};
use crate::reports::BuildResult;
use crate::structures::formula::Formula;
use crate::structures::sign::{Sign, SignSet, System};
use crate::structures::truth::TruthValue;
use crate::types::err::ErrorKind;

mod valuation;
pub use valuation::ValueSet;

/// A truth-value assignment consistent with an open saturated branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    system: System,

    /// The value of each atom the branch signed.
    assignments: BTreeMap<Formula, TruthValue>,

    /// The signs the branch attached to each atom.
    signs: BTreeMap<Formula, SignSet>,

    /// The branch's Herbrand domain.
    domain: BTreeSet<String>,
}

impl Model {
    pub fn system(&self) -> System {
        self.system
    }

    /// The assigned atoms and their values, in a deterministic order.
    pub fn assignments(&self) -> impl Iterator<Item = (&Formula, TruthValue)> + '_ {
        self.assignments.iter().map(|(atom, value)| (atom, *value))
    }

    /// The value of an atomic formula, falling back to the system's canonical default --- `f` classically, undefined in the gap systems.
    pub fn value_of(&self, atom: &Formula) -> TruthValue {
        match self.assignments.get(atom) {
            Some(value) => *value,
            None => self.default_value(),
        }
    }

    /// The value of a propositional atom by name.
    pub fn value_of_name(&self, name: &str) -> TruthValue {
        match Formula::atom(name) {
            Ok(atom) => self.value_of(&atom),
            Err(_) => self.default_value(),
        }
    }

    /// The signs the branch attached to an atomic formula.
    pub fn signs_of(&self, atom: &Formula) -> SignSet {
        self.signs.get(atom).copied().unwrap_or_default()
    }

    /// Whether the branch's standing on this atom is purely epistemic: `M`/`N` signs only.
    pub fn is_epistemic(&self, atom: &Formula) -> bool {
        let signs = self.signs_of(atom);
        !signs.is_empty() && signs.iter().all(Sign::is_epistemic)
    }

    pub fn domain(&self) -> &BTreeSet<String> {
        &self.domain
    }

    fn default_value(&self) -> TruthValue {
        match self.system {
            System::Classical => TruthValue::False,
            System::WK3 | System::WKrQ => TruthValue::Undefined,
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, (atom, value)) in self.assignments().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{atom} ↦ {value}")?;
        }
        write!(f, "}}")?;

        if !self.domain.is_empty() {
            write!(f, " over {{")?;
            for (index, constant) in self.domain.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{constant}")?;
            }
            write!(f, "}}")?;
        }

        Ok(())
    }
}

/// Extract the model an open saturated branch describes.
///
/// `None` for a closed branch, and for a spurious one (see the module documentation).
pub fn extract_model(branch: &Branch, system: System) -> Option<Model> {
    if branch.is_closed() {
        return None;
    }

    let mut assignments = BTreeMap::default();
    let mut signs = BTreeMap::default();

    for (formula, sign_set) in branch.sign_index() {
        if !formula.is_atomic() || sign_set.is_empty() {
            continue;
        }

        if !sign_set.admits_common_value() {
            log::trace!(
                target: targets::MODELS,
                "Branch {} is spurious at {formula}; no model",
                branch.id()
            );
            return None;
        }

        // T wins, then F, then U; a purely epistemic sign set reads as the
        // undefined value with the signs preserved alongside.
        let value = if sign_set.contains(Sign::T) {
            TruthValue::True
        } else if sign_set.contains(Sign::F) {
            TruthValue::False
        } else {
            TruthValue::Undefined
        };

        assignments.insert(formula.clone(), value);
        signs.insert(formula.clone(), sign_set);
    }

    Some(Model {
        system,
        assignments,
        signs,
        domain: branch.domain().clone(),
    })
}

/// Extract one model per open branch of a satisfiable result, in branch order, each checked against the initial signed formulas.
///
/// Unsatisfiable, cancelled, and exhausted results yield no models.
pub fn extract_all_models(result: &BuildResult) -> Result<Vec<Model>, ErrorKind> {
    let BuildResult::Sat {
        system,
        initial,
        open_branches,
        ..
    } = result
    else {
        return Ok(Vec::default());
    };

    let mut models = Vec::default();
    for branch in open_branches {
        if let Some(model) = extract_model(branch, *system) {
            model.check_against(initial)?;
            models.push(model);
        }
    }

    Ok(models)
}

#[cfg(test)]
mod extraction_tests {
    use super::*;
    use crate::structures::signed::{F, M, N, T, U};

    fn atom(name: &str) -> Formula {
        Formula::atom(name).unwrap()
    }

    #[test]
    fn values_follow_the_sign_order() {
        let mut branch = Branch::new(0, System::WK3);
        branch.add(T(atom("p")));
        branch.add(F(atom("q")));
        branch.add(U(atom("r")));

        let model = extract_model(&branch, System::WK3).unwrap();
        assert_eq!(model.value_of_name("p"), TruthValue::True);
        assert_eq!(model.value_of_name("q"), TruthValue::False);
        assert_eq!(model.value_of_name("r"), TruthValue::Undefined);
    }

    #[test]
    fn defaults_differ_by_system() {
        let classical = extract_model(&Branch::new(0, System::Classical), System::Classical).unwrap();
        assert_eq!(classical.value_of_name("unmentioned"), TruthValue::False);

        let gap = extract_model(&Branch::new(0, System::WK3), System::WK3).unwrap();
        assert_eq!(gap.value_of_name("unmentioned"), TruthValue::Undefined);
    }

    #[test]
    fn epistemic_standing_is_preserved() {
        let mut branch = Branch::new(0, System::WKrQ);
        branch.add(M(atom("p")));
        branch.add(N(atom("p")));
        branch.add(T(atom("q")));

        let model = extract_model(&branch, System::WKrQ).unwrap();
        assert_eq!(model.value_of_name("p"), TruthValue::Undefined);
        assert!(model.is_epistemic(&atom("p")));
        assert!(!model.is_epistemic(&atom("q")));

        let signs = model.signs_of(&atom("p"));
        assert!(signs.contains(Sign::M));
        assert!(signs.contains(Sign::N));
    }

    #[test]
    fn closed_branches_have_no_model() {
        let mut branch = Branch::new(0, System::Classical);
        branch.add(T(atom("p")));
        branch.add(F(atom("p")));

        assert!(extract_model(&branch, System::Classical).is_none());
    }

    #[test]
    fn spurious_branches_have_no_model() {
        // U against F is open under the closure relation, but no value honours both.
        let mut branch = Branch::new(0, System::WK3);
        branch.add(U(atom("p")));
        branch.add(F(atom("p")));

        assert!(!branch.is_closed());
        assert!(extract_model(&branch, System::WK3).is_none());
    }
}
