/*!
The abstract syntax of formulas.

A formula is a predicate applied to ground terms (with the zero-arity case serving as a propositional atom), a connective applied to formulas, or a restricted quantifier.

The restricted quantifiers pair a *guard* with a *body*: `[∃X φ(X)]ψ(X)` claims some individual satisfying the guard satisfies the body, and `[∀X φ(X)]ψ(X)` claims every individual satisfying the guard does.
Unrestricted quantification is out of scope.

Children are shared through [Rc](std::rc::Rc), so cloning a formula is cheap and branch splits do not copy subtrees.
Equality, hashing, and ordering are structural.

Formulas are built through the associated constructors ([atom](Formula::atom), [pred](Formula::pred), [not](Formula::not), [and](Formula::and), …), which reject structurally invalid input (empty names) so that a constructed formula is always well-formed.
*/

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::structures::term::Term;
use crate::types::err::{self};

mod display;

/// A formula of the language.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Formula {
    /// A predicate applied to terms; zero arity gives a propositional atom.
    Pred { name: String, args: Vec<Term> },

    /// Negation.
    Not(Rc<Formula>),

    /// Conjunction.
    And(Rc<Formula>, Rc<Formula>),

    /// Disjunction.
    Or(Rc<Formula>, Rc<Formula>),

    /// Implication.
    Imp(Rc<Formula>, Rc<Formula>),

    /// The restricted existential `[∃variable guard]body`.
    RExists {
        variable: String,
        guard: Rc<Formula>,
        body: Rc<Formula>,
    },

    /// The restricted universal `[∀variable guard]body`.
    RForall {
        variable: String,
        guard: Rc<Formula>,
        body: Rc<Formula>,
    },
}

impl Formula {
    /// A propositional atom: a zero-arity predicate.
    pub fn atom(name: impl Into<String>) -> Result<Self, err::FormulaError> {
        Self::pred(name, Vec::default())
    }

    /// A predicate applied to the given terms.
    pub fn pred(name: impl Into<String>, args: Vec<Term>) -> Result<Self, err::FormulaError> {
        let name = name.into();
        if name.is_empty() {
            return Err(err::FormulaError::EmptyPredicateName);
        }
        if args.iter().any(|arg| arg.name().is_empty()) {
            return Err(err::FormulaError::EmptyTermName);
        }
        Ok(Formula::Pred { name, args })
    }

    pub fn not(operand: Formula) -> Self {
        Formula::Not(Rc::new(operand))
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Formula::And(Rc::new(left), Rc::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Formula::Or(Rc::new(left), Rc::new(right))
    }

    pub fn imp(antecedent: Formula, consequent: Formula) -> Self {
        Formula::Imp(Rc::new(antecedent), Rc::new(consequent))
    }

    /// The biconditional, as sugar for mutual implication.
    pub fn iff(left: Formula, right: Formula) -> Self {
        Formula::and(
            Formula::imp(left.clone(), right.clone()),
            Formula::imp(right, left),
        )
    }

    /// The restricted existential `[∃variable guard]body`.
    pub fn rexists(
        variable: impl Into<String>,
        guard: Formula,
        body: Formula,
    ) -> Result<Self, err::FormulaError> {
        let variable = variable.into();
        match variable.is_empty() {
            true => Err(err::FormulaError::EmptyQuantifierVariable),
            false => Ok(Formula::RExists {
                variable,
                guard: Rc::new(guard),
                body: Rc::new(body),
            }),
        }
    }

    /// The restricted universal `[∀variable guard]body`.
    pub fn rforall(
        variable: impl Into<String>,
        guard: Formula,
        body: Formula,
    ) -> Result<Self, err::FormulaError> {
        let variable = variable.into();
        match variable.is_empty() {
            true => Err(err::FormulaError::EmptyQuantifierVariable),
            false => Ok(Formula::RForall {
                variable,
                guard: Rc::new(guard),
                body: Rc::new(body),
            }),
        }
    }

    /// Whether the formula is a predicate (including the zero-arity case).
    pub fn is_atomic(&self) -> bool {
        matches!(self, Formula::Pred { .. })
    }

    /// Whether the formula is atomic or a negated atomic.
    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Pred { .. } => true,
            Formula::Not(operand) => operand.is_atomic(),
            _ => false,
        }
    }

    /// The height of the syntax tree, with atoms at one.
    ///
    /// Used to break scheduling ties: shallower formulas are expanded first.
    pub fn depth(&self) -> usize {
        match self {
            Formula::Pred { .. } => 1,
            Formula::Not(operand) => 1 + operand.depth(),
            Formula::And(left, right) | Formula::Or(left, right) | Formula::Imp(left, right) => {
                1 + left.depth().max(right.depth())
            }
            Formula::RExists { guard, body, .. } | Formula::RForall { guard, body, .. } => {
                1 + guard.depth().max(body.depth())
            }
        }
    }

    /// The variables occurring free in the formula.
    pub fn free_variables(&self) -> BTreeSet<String> {
        match self {
            Formula::Pred { args, .. } => args
                .iter()
                .filter(|arg| arg.is_variable())
                .map(|arg| arg.name().to_owned())
                .collect(),

            Formula::Not(operand) => operand.free_variables(),

            Formula::And(left, right) | Formula::Or(left, right) | Formula::Imp(left, right) => {
                let mut variables = left.free_variables();
                variables.extend(right.free_variables());
                variables
            }

            Formula::RExists {
                variable,
                guard,
                body,
            }
            | Formula::RForall {
                variable,
                guard,
                body,
            } => {
                let mut variables = guard.free_variables();
                variables.extend(body.free_variables());
                variables.remove(variable);
                variables
            }
        }
    }

    /// Whether the formula has no free variables.
    pub fn is_ground(&self) -> bool {
        self.free_variables().is_empty()
    }

    /// The names of all constants occurring in the formula.
    ///
    /// These prime a branch's Herbrand domain.
    pub fn constants(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::default();
        self.collect_constants(&mut names);
        names
    }

    fn collect_constants(&self, names: &mut BTreeSet<String>) {
        match self {
            Formula::Pred { args, .. } => {
                for arg in args {
                    if let Term::Constant(name) = arg {
                        names.insert(name.clone());
                    }
                }
            }

            Formula::Not(operand) => operand.collect_constants(names),

            Formula::And(left, right) | Formula::Or(left, right) | Formula::Imp(left, right) => {
                left.collect_constants(names);
                right.collect_constants(names);
            }

            Formula::RExists { guard, body, .. } | Formula::RForall { guard, body, .. } => {
                guard.collect_constants(names);
                body.collect_constants(names);
            }
        }
    }

    /// The formula with `term` substituted for every free occurrence of `variable`.
    ///
    /// Substitution is capture-avoiding: occurrences under a quantifier which binds `variable` are left alone, and a quantifier whose bound variable names a substituted variable term is not descended into.
    /// The engine only ever substitutes constants, for which the second guard is vacuous.
    pub fn substitute(&self, variable: &str, term: &Term) -> Formula {
        match self {
            Formula::Pred { name, args } => Formula::Pred {
                name: name.clone(),
                args: args
                    .iter()
                    .map(|arg| match arg {
                        Term::Variable(v) if v == variable => term.clone(),
                        _ => arg.clone(),
                    })
                    .collect(),
            },

            Formula::Not(operand) => Formula::not(operand.substitute(variable, term)),

            Formula::And(left, right) => Formula::and(
                left.substitute(variable, term),
                right.substitute(variable, term),
            ),

            Formula::Or(left, right) => Formula::or(
                left.substitute(variable, term),
                right.substitute(variable, term),
            ),

            Formula::Imp(left, right) => Formula::imp(
                left.substitute(variable, term),
                right.substitute(variable, term),
            ),

            Formula::RExists {
                variable: bound,
                guard,
                body,
            } => {
                if bound == variable || (bound == term.name() && term.is_variable()) {
                    self.clone()
                } else {
                    Formula::RExists {
                        variable: bound.clone(),
                        guard: Rc::new(guard.substitute(variable, term)),
                        body: Rc::new(body.substitute(variable, term)),
                    }
                }
            }

            Formula::RForall {
                variable: bound,
                guard,
                body,
            } => {
                if bound == variable || (bound == term.name() && term.is_variable()) {
                    self.clone()
                } else {
                    Formula::RForall {
                        variable: bound.clone(),
                        guard: Rc::new(guard.substitute(variable, term)),
                        body: Rc::new(body.substitute(variable, term)),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod formula_tests {
    use super::*;

    fn atom(name: &str) -> Formula {
        Formula::atom(name).unwrap()
    }

    #[test]
    fn literals() {
        let p = atom("p");
        assert!(p.is_atomic());
        assert!(p.is_literal());

        let not_p = Formula::not(p.clone());
        assert!(!not_p.is_atomic());
        assert!(not_p.is_literal());

        let not_not_p = Formula::not(not_p);
        assert!(!not_not_p.is_literal());

        assert!(!Formula::and(p.clone(), p).is_literal());
    }

    #[test]
    fn structural_equality() {
        let left = Formula::and(atom("p"), atom("q"));
        let right = Formula::and(atom("p"), atom("q"));
        assert_eq!(left, right);
        assert_ne!(left, Formula::and(atom("q"), atom("p")));
    }

    #[test]
    fn free_variables_respect_binding() {
        let x = Term::variable("X").unwrap();
        let student = Formula::pred("Student", vec![x.clone()]).unwrap();
        let human = Formula::pred("Human", vec![x]).unwrap();

        assert_eq!(student.free_variables().len(), 1);

        let closed = Formula::rexists("X", student.clone(), human.clone()).unwrap();
        assert!(closed.is_ground());

        let mixed = Formula::rexists("Y", student, human).unwrap();
        assert_eq!(mixed.free_variables().into_iter().collect::<Vec<_>>(), ["X"]);
    }

    #[test]
    fn substitution_is_shadow_aware() {
        let x = Term::variable("X").unwrap();
        let tweety = Term::constant("tweety").unwrap();
        let bird = Formula::pred("Bird", vec![x.clone()]).unwrap();

        let ground = bird.substitute("X", &tweety);
        assert!(ground.is_ground());
        assert_eq!(ground.constants().into_iter().collect::<Vec<_>>(), ["tweety"]);

        // X is bound by the quantifier, so nothing is replaced under it.
        let flies = Formula::pred("Flies", vec![x]).unwrap();
        let all = Formula::rforall("X", bird, flies).unwrap();
        assert_eq!(all.substitute("X", &tweety), all);
    }

    #[test]
    fn depth_counts_connectives() {
        let p = atom("p");
        assert_eq!(p.depth(), 1);
        assert_eq!(Formula::not(p.clone()).depth(), 2);
        assert_eq!(Formula::and(Formula::not(p.clone()), p).depth(), 3);
    }

    #[test]
    fn iff_expands_to_mutual_implication() {
        let expanded = Formula::iff(atom("p"), atom("q"));
        let by_hand = Formula::and(
            Formula::imp(atom("p"), atom("q")),
            Formula::imp(atom("q"), atom("p")),
        );
        assert_eq!(expanded, by_hand);
    }
}
