/*!
The tableau rule system.

A rule maps a signed formula to a [RuleResult]: a non-empty list of *branch deltas*, each delta a list of signed formulas.
One delta extends the branch in place (an α expansion); several deltas split the branch, one child per delta (a β expansion).

Rules are not objects here.
Variation over (system, sign, top connective) is expressed by `match`, the same way the solver literature's case analyses read, and each expansion function is independently testable.
Which rule applies to a signed formula is decided by [classify]; the δ- and γ-rules additionally interact with a branch's domain, so their expansion functions ([expand_delta](quantifier::expand_delta), [expand_gamma](quantifier::expand_gamma)) take the witness constant, respectively the constants to instantiate, as arguments supplied by the engine.

Scheduling is by [RuleClass]: α before β before δ before γ, with ties broken by formula depth and then insertion order.
α-before-β minimises branching; deferring γ lets witnesses populate the domain first.
*/

use crate::structures::formula::Formula;
use crate::structures::sign::{Sign, System};
use crate::structures::signed::SignedFormula;

pub mod propositional;
pub mod quantifier;

/// The classes of rule, in scheduling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleClass {
    /// Linear: a single delta.
    Alpha,

    /// Branching: two or more deltas.
    Beta,

    /// A quantifier rule introducing a fresh constant, fired at most once per signed formula per branch.
    Delta,

    /// A quantifier rule instantiating over the branch domain, re-fired as the domain grows.
    Gamma,
}

impl RuleClass {
    /// The scheduling priority; lower is earlier.
    pub fn priority(self) -> u8 {
        match self {
            RuleClass::Alpha => 1,
            RuleClass::Beta => 2,
            RuleClass::Delta => 3,
            RuleClass::Gamma => 4,
        }
    }
}

/// The conclusions of a rule application: one delta per resulting branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleResult {
    pub deltas: Vec<Vec<SignedFormula>>,
}

impl RuleResult {
    /// A linear result: every conclusion lands on the one branch.
    pub fn alpha(delta: Vec<SignedFormula>) -> Self {
        RuleResult {
            deltas: vec![delta],
        }
    }

    /// A branching result: one child branch per delta.
    pub fn beta(deltas: Vec<Vec<SignedFormula>>) -> Self {
        RuleResult { deltas }
    }

    pub fn is_branching(&self) -> bool {
        self.deltas.len() > 1
    }
}

/// The rule class applying to a signed formula within a system, if any.
///
/// `None` marks the signed formulas no rule touches: literals, and the shapes the system leaves unanalysed (a `U`-signed quantifier, for instance).
/// The engine enqueues a signed formula for processing exactly when this returns `Some`.
pub fn classify(system: System, signed: &SignedFormula) -> Option<RuleClass> {
    let sign = signed.sign;
    if !system.admits(sign) {
        return None;
    }

    match &signed.formula {
        Formula::Pred { .. } => None,

        Formula::Not(_) => Some(RuleClass::Alpha),

        Formula::And(_, _) => match sign {
            Sign::T | Sign::M => Some(RuleClass::Alpha),
            Sign::F | Sign::N | Sign::U => Some(RuleClass::Beta),
        },

        Formula::Or(_, _) => match sign {
            Sign::F | Sign::N => Some(RuleClass::Alpha),
            Sign::T | Sign::M | Sign::U => Some(RuleClass::Beta),
        },

        Formula::Imp(_, _) => match sign {
            Sign::F | Sign::N => Some(RuleClass::Alpha),
            Sign::T | Sign::M | Sign::U => Some(RuleClass::Beta),
        },

        // A true (or possibly true) restricted existential is witnessed by a
        // fresh constant; under the falsifying signs it quantifies over the
        // domain instead. Dually for the restricted universal.
        Formula::RExists { .. } => match sign {
            Sign::T | Sign::M => Some(RuleClass::Delta),
            Sign::F | Sign::N => Some(RuleClass::Gamma),
            Sign::U => None,
        },

        Formula::RForall { .. } => match sign {
            Sign::F | Sign::N => Some(RuleClass::Delta),
            Sign::T | Sign::M => Some(RuleClass::Gamma),
            Sign::U => None,
        },
    }
}

#[cfg(test)]
mod classify_tests {
    use super::*;
    use crate::structures::signed::{F, M, N, T, U};

    fn and() -> Formula {
        Formula::and(Formula::atom("p").unwrap(), Formula::atom("q").unwrap())
    }

    #[test]
    fn literals_have_no_rule() {
        let p = Formula::atom("p").unwrap();
        assert_eq!(classify(System::Classical, &T(p.clone())), None);
        assert_eq!(classify(System::WK3, &U(p)), None);
    }

    #[test]
    fn signs_outside_the_system_have_no_rule() {
        assert_eq!(classify(System::Classical, &U(and())), None);
        assert_eq!(classify(System::WK3, &M(and())), None);
        assert_eq!(classify(System::WKrQ, &U(and())), None);
    }

    #[test]
    fn connective_classes() {
        assert_eq!(classify(System::Classical, &T(and())), Some(RuleClass::Alpha));
        assert_eq!(classify(System::Classical, &F(and())), Some(RuleClass::Beta));
        assert_eq!(classify(System::WK3, &U(and())), Some(RuleClass::Beta));
        assert_eq!(classify(System::WKrQ, &M(and())), Some(RuleClass::Alpha));
        assert_eq!(classify(System::WKrQ, &N(and())), Some(RuleClass::Beta));
    }

    #[test]
    fn quantifier_classes() {
        let x = crate::structures::term::Term::variable("X").unwrap();
        let guard = Formula::pred("Student", vec![x.clone()]).unwrap();
        let body = Formula::pred("Human", vec![x]).unwrap();
        let some = Formula::rexists("X", guard.clone(), body.clone()).unwrap();
        let all = Formula::rforall("X", guard, body).unwrap();

        assert_eq!(classify(System::WKrQ, &T(some.clone())), Some(RuleClass::Delta));
        assert_eq!(classify(System::WKrQ, &M(some.clone())), Some(RuleClass::Delta));
        assert_eq!(classify(System::WKrQ, &F(some.clone())), Some(RuleClass::Gamma));
        assert_eq!(classify(System::WKrQ, &N(some)), Some(RuleClass::Gamma));

        assert_eq!(classify(System::WKrQ, &T(all.clone())), Some(RuleClass::Gamma));
        assert_eq!(classify(System::WKrQ, &M(all.clone())), Some(RuleClass::Gamma));
        assert_eq!(classify(System::WKrQ, &F(all.clone())), Some(RuleClass::Delta));
        assert_eq!(classify(System::WKrQ, &N(all)), Some(RuleClass::Delta));
    }

    #[test]
    fn priorities_are_ordered() {
        assert!(RuleClass::Alpha.priority() < RuleClass::Beta.priority());
        assert!(RuleClass::Beta.priority() < RuleClass::Delta.priority());
        assert!(RuleClass::Delta.priority() < RuleClass::Gamma.priority());
    }
}
