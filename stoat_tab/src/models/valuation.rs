/*!
Evaluation of formulas in a model.

Connectives evaluate by the weak Kleene tables.
The restricted quantifiers evaluate their instances with the weak tables and then combine instances with the *definite-information* (strong) fold: a true witness settles an existential and a counterexample settles a universal, whatever the other instances do.
This is the point of restriction --- an individual irrelevant to the guard cannot infect the quantifier --- and it is exactly what the δ- and γ-rules commit branches to.
The domain is the model's; no witnesses are invented.
Over an empty domain an existential is false and a universal true.

Two evaluations are provided:

- [evaluate](Model::evaluate): a point evaluation of the completed model, unassigned atoms at the system default.
- [possible_values](Model::possible_values): the set of values the formula can take across completions of the partial model which honour the branch's signs.
  An atom signed `M` ranges over `{t, e}`, an unassigned atom over the whole value space, and a quantifier additionally over what instances beyond the committed domain could make of it.
  The sets are computed compositionally, so correlations between occurrences are not tracked and the result may over-approximate; it never omits an achievable value.

The model post-condition ([check_against](Model::check_against)) uses the point evaluation classically, where models are total, and achievability in the gap systems, where a branch constrains without always determining: each initial signed formula must be honoured by some completion the branch allows.
*/

use super::Model;
use crate::structures::formula::Formula;
use crate::structures::sign::{Sign, System};
use crate::structures::signed::SignedFormula;
use crate::structures::term::Term;
use crate::structures::truth::TruthValue;
use crate::types::err::{self, ErrorKind};

/// A set of truth values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValueSet(u8);

impl ValueSet {
    const VALUES: [TruthValue; 3] = [TruthValue::True, TruthValue::False, TruthValue::Undefined];

    fn bit(value: TruthValue) -> u8 {
        match value {
            TruthValue::True => 1,
            TruthValue::False => 1 << 1,
            TruthValue::Undefined => 1 << 2,
        }
    }

    pub fn singleton(value: TruthValue) -> Self {
        ValueSet(Self::bit(value))
    }

    /// Every value a system's models range over.
    pub fn full(system: System) -> Self {
        match system {
            System::Classical => [TruthValue::True, TruthValue::False].into_iter().collect(),
            System::WK3 | System::WKrQ => Self::VALUES.into_iter().collect(),
        }
    }

    /// The values a sign allows the signed formula to take.
    pub fn admitted_by(sign: Sign) -> Self {
        Self::VALUES
            .into_iter()
            .filter(|value| sign.admits_value(*value))
            .collect()
    }

    pub fn insert(&mut self, value: TruthValue) {
        self.0 |= Self::bit(value);
    }

    pub fn contains(&self, value: TruthValue) -> bool {
        self.0 & Self::bit(value) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn intersects(&self, other: ValueSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = TruthValue> + '_ {
        Self::VALUES.into_iter().filter(|value| self.contains(*value))
    }

    /// The image of a binary operation over the two sets.
    fn lift(self, other: ValueSet, operation: impl Fn(TruthValue, TruthValue) -> TruthValue) -> ValueSet {
        let mut image = ValueSet::default();
        for a in self.iter() {
            for b in other.iter() {
                image.insert(operation(a, b));
            }
        }
        image
    }

    fn lift_unary(self, operation: impl Fn(TruthValue) -> TruthValue) -> ValueSet {
        let mut image = ValueSet::default();
        for a in self.iter() {
            image.insert(operation(a));
        }
        image
    }
}

impl std::iter::FromIterator<TruthValue> for ValueSet {
    fn from_iter<I: IntoIterator<Item = TruthValue>>(iter: I) -> Self {
        let mut set = ValueSet::default();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

/// The definite-information disjunction: a true disjunct settles the matter.
fn definite_or(a: TruthValue, b: TruthValue) -> TruthValue {
    match (a, b) {
        (TruthValue::True, _) | (_, TruthValue::True) => TruthValue::True,
        (TruthValue::Undefined, _) | (_, TruthValue::Undefined) => TruthValue::Undefined,
        _ => TruthValue::False,
    }
}

/// The definite-information conjunction: a false conjunct settles the matter.
fn definite_and(a: TruthValue, b: TruthValue) -> TruthValue {
    match (a, b) {
        (TruthValue::False, _) | (_, TruthValue::False) => TruthValue::False,
        (TruthValue::Undefined, _) | (_, TruthValue::Undefined) => TruthValue::Undefined,
        _ => TruthValue::True,
    }
}

/// Close a quantifier's value set under instances a domain extension could add.
fn extension_closure(
    over_domain: ValueSet,
    combine: impl Fn(TruthValue, TruthValue) -> TruthValue,
) -> ValueSet {
    let mut closed = over_domain;
    for value in over_domain.iter() {
        for added in ValueSet::VALUES {
            closed.insert(combine(value, added));
        }
    }
    closed
}

impl Model {
    /// Evaluate a formula at this model, unassigned atoms at the system default.
    pub fn evaluate(&self, formula: &Formula) -> TruthValue {
        match formula {
            Formula::Pred { .. } => self.value_of(formula),

            Formula::Not(operand) => self.evaluate(operand).negate(),

            Formula::And(left, right) => self.evaluate(left).and(self.evaluate(right)),

            Formula::Or(left, right) => self.evaluate(left).or(self.evaluate(right)),

            Formula::Imp(left, right) => self.evaluate(left).implies(self.evaluate(right)),

            Formula::RExists {
                variable,
                guard,
                body,
            } => self.fold_instances(variable, guard, body, TruthValue::False, |acc, g, b| {
                definite_or(acc, g.and(b))
            }),

            Formula::RForall {
                variable,
                guard,
                body,
            } => self.fold_instances(variable, guard, body, TruthValue::True, |acc, g, b| {
                definite_and(acc, g.implies(b))
            }),
        }
    }

    fn fold_instances(
        &self,
        variable: &str,
        guard: &Formula,
        body: &Formula,
        empty: TruthValue,
        step: impl Fn(TruthValue, TruthValue, TruthValue) -> TruthValue,
    ) -> TruthValue {
        let mut accumulated = empty;
        for name in self.domain() {
            let constant = Term::Constant(name.clone());
            let guard_value = self.evaluate(&guard.substitute(variable, &constant));
            let body_value = self.evaluate(&body.substitute(variable, &constant));
            accumulated = step(accumulated, guard_value, body_value);
        }
        accumulated
    }

    /// The values the formula can take across completions of this partial model.
    pub fn possible_values(&self, formula: &Formula) -> ValueSet {
        match formula {
            Formula::Pred { .. } => {
                let signs = self.signs_of(formula);
                if signs.is_empty() {
                    return ValueSet::full(self.system());
                }
                signs
                    .iter()
                    .map(ValueSet::admitted_by)
                    .fold(ValueSet::full(self.system()), |acc, admitted| {
                        acc.iter().filter(|value| admitted.contains(*value)).collect()
                    })
            }

            Formula::Not(operand) => self.possible_values(operand).lift_unary(TruthValue::negate),

            Formula::And(left, right) => self
                .possible_values(left)
                .lift(self.possible_values(right), TruthValue::and),

            Formula::Or(left, right) => self
                .possible_values(left)
                .lift(self.possible_values(right), TruthValue::or),

            Formula::Imp(left, right) => self
                .possible_values(left)
                .lift(self.possible_values(right), TruthValue::implies),

            // A model's domain is what the branch committed to, but a
            // completion may extend it; further instances can raise an
            // existential towards true and lower a universal towards false.
            Formula::RExists {
                variable,
                guard,
                body,
            } => {
                let over_domain = self.fold_instance_sets(
                    variable,
                    guard,
                    body,
                    TruthValue::False,
                    TruthValue::and,
                    definite_or,
                );
                extension_closure(over_domain, definite_or)
            }

            Formula::RForall {
                variable,
                guard,
                body,
            } => {
                let over_domain = self.fold_instance_sets(
                    variable,
                    guard,
                    body,
                    TruthValue::True,
                    TruthValue::implies,
                    definite_and,
                );
                extension_closure(over_domain, definite_and)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fold_instance_sets(
        &self,
        variable: &str,
        guard: &Formula,
        body: &Formula,
        empty: TruthValue,
        instance: impl Fn(TruthValue, TruthValue) -> TruthValue + Copy,
        combine: impl Fn(TruthValue, TruthValue) -> TruthValue + Copy,
    ) -> ValueSet {
        let mut accumulated = ValueSet::singleton(empty);
        for name in self.domain() {
            let constant = Term::Constant(name.clone());
            let guard_values = self.possible_values(&guard.substitute(variable, &constant));
            let body_values = self.possible_values(&body.substitute(variable, &constant));
            let instance_values = guard_values.lift(body_values, instance);
            accumulated = accumulated.lift(instance_values, combine);
        }
        accumulated
    }

    /// The model post-condition: every initial signed formula must be honoured.
    ///
    /// Classical models are total, so the check is exact evaluation.
    /// In the gap systems a branch constrains without always determining, and the check is achievability: some completion the branch allows gives the formula a value its sign admits.
    pub fn check_against(&self, initial: &[SignedFormula]) -> Result<(), ErrorKind> {
        for signed in initial {
            let honoured = match self.system() {
                System::Classical => signed.sign.admits_value(self.evaluate(&signed.formula)),
                System::WK3 | System::WKrQ => self
                    .possible_values(&signed.formula)
                    .intersects(ValueSet::admitted_by(signed.sign)),
            };

            if !honoured {
                return Err(ErrorKind::from(err::InvariantError::ModelPostCondition(
                    format!("{signed} is not honoured by {self}"),
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod valuation_tests {
    use super::*;
    use crate::branch::Branch;
    use crate::models::extract_model;
    use crate::structures::signed::{T, U};

    fn atom(name: &str) -> Formula {
        Formula::atom(name).unwrap()
    }

    fn model_from(system: System, signed: &[SignedFormula]) -> Model {
        let mut branch = Branch::new(0, system);
        for sf in signed {
            branch.add(sf.clone());
        }
        extract_model(&branch, system).unwrap()
    }

    #[test]
    fn infection_reaches_every_connective() {
        let model = model_from(System::WK3, &[U(atom("p")), T(atom("q"))]);

        let formulas = [
            Formula::and(atom("p"), atom("q")),
            Formula::or(atom("p"), atom("q")),
            Formula::imp(atom("q"), atom("p")),
            Formula::not(atom("p")),
        ];
        for formula in formulas {
            assert_eq!(model.evaluate(&formula), TruthValue::Undefined, "{formula}");
        }
    }

    #[test]
    fn classical_point_evaluation() {
        let model = model_from(System::Classical, &[T(atom("p"))]);

        assert_eq!(model.evaluate(&atom("p")), TruthValue::True);
        // Unmentioned atoms complete to false.
        assert_eq!(
            model.evaluate(&Formula::or(atom("p"), atom("q"))),
            TruthValue::True
        );
        assert_eq!(
            model.evaluate(&Formula::and(atom("p"), atom("q"))),
            TruthValue::False
        );
    }

    #[test]
    fn possible_values_respect_signs() {
        let model = model_from(System::WK3, &[T(atom("p"))]);

        let committed = model.possible_values(&atom("p"));
        assert!(committed.contains(TruthValue::True));
        assert!(!committed.contains(TruthValue::Undefined));

        // q is unconstrained, so the disjunction can still be true.
        let open = model.possible_values(&Formula::or(atom("p"), atom("q")));
        assert!(open.contains(TruthValue::True));
        assert!(open.contains(TruthValue::Undefined));
    }

    #[test]
    fn the_post_condition_accepts_partial_branches() {
        // The branch for T:(p ∨ q) which signed only p.
        let model = model_from(System::WK3, &[T(atom("p"))]);
        let initial = [T(Formula::or(atom("p"), atom("q")))];
        assert!(model.check_against(&initial).is_ok());
    }

    #[test]
    fn the_post_condition_notices_nonsense() {
        let model = model_from(System::WK3, &[T(atom("p"))]);
        let initial = [U(atom("p"))];
        assert!(model.check_against(&initial).is_err());
    }

    #[test]
    fn a_witness_settles_an_existential() {
        use crate::structures::term::Term;

        let student_c = Formula::pred("Student", vec![Term::constant("c_0").unwrap()]).unwrap();
        let human_c = Formula::pred("Human", vec![Term::constant("c_0").unwrap()]).unwrap();
        let noise = Formula::pred("Student", vec![Term::constant("a").unwrap()]).unwrap();

        let model = model_from(
            System::WKrQ,
            &[T(student_c), T(human_c), crate::structures::signed::M(noise)],
        );

        let x = Term::variable("X").unwrap();
        let some = Formula::rexists(
            "X",
            Formula::pred("Student", vec![x.clone()]).unwrap(),
            Formula::pred("Human", vec![x]).unwrap(),
        )
        .unwrap();

        // The undetermined individual `a` cannot infect the settled witness.
        assert_eq!(model.evaluate(&some), TruthValue::True);
        assert!(model
            .possible_values(&some)
            .contains(TruthValue::True));
    }

    #[test]
    fn empty_domains() {
        let model = model_from(System::WKrQ, &[]);

        let x = Term::variable("X").unwrap();
        let guard = Formula::pred("P", vec![x.clone()]).unwrap();
        let body = Formula::pred("Q", vec![x]).unwrap();

        let some = Formula::rexists("X", guard.clone(), body.clone()).unwrap();
        let all = Formula::rforall("X", guard, body).unwrap();

        assert_eq!(model.evaluate(&some), TruthValue::False);
        assert_eq!(model.evaluate(&all), TruthValue::True);
    }
}
