//! The canonical printer.
//!
//! Output uses the Unicode operators and the minimal parenthesisation the precedence of the surface syntax allows, so parsing printed output returns the original formula.

use super::Formula;

/// Binding strength used to decide parenthesisation.
/// Implication is weakest, predicate application strongest.
const IMP: u8 = 1;
const OR: u8 = 2;
const AND: u8 = 3;
const PREFIX: u8 = 4;

impl Formula {
    fn strength(&self) -> u8 {
        match self {
            Formula::Imp(_, _) => IMP,
            Formula::Or(_, _) => OR,
            Formula::And(_, _) => AND,
            Formula::Not(_) | Formula::RExists { .. } | Formula::RForall { .. } => PREFIX,
            Formula::Pred { .. } => u8::MAX,
        }
    }

    fn fmt_at(&self, f: &mut std::fmt::Formatter<'_>, minimum: u8) -> std::fmt::Result {
        if self.strength() < minimum {
            write!(f, "(")?;
            self.fmt_at(f, 0)?;
            return write!(f, ")");
        }

        match self {
            Formula::Pred { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (index, arg) in args.iter().enumerate() {
                        if index > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }

            Formula::Not(operand) => {
                write!(f, "¬")?;
                operand.fmt_at(f, PREFIX)
            }

            Formula::And(left, right) => {
                left.fmt_at(f, AND)?;
                write!(f, " ∧ ")?;
                right.fmt_at(f, AND + 1)
            }

            Formula::Or(left, right) => {
                left.fmt_at(f, OR)?;
                write!(f, " ∨ ")?;
                right.fmt_at(f, OR + 1)
            }

            // Right associative, so the right child prints bare.
            Formula::Imp(left, right) => {
                left.fmt_at(f, IMP + 1)?;
                write!(f, " → ")?;
                right.fmt_at(f, IMP)
            }

            Formula::RExists {
                variable,
                guard,
                body,
            } => {
                write!(f, "[∃{variable} ")?;
                guard.fmt_at(f, 0)?;
                write!(f, "]")?;
                body.fmt_at(f, PREFIX)
            }

            Formula::RForall {
                variable,
                guard,
                body,
            } => {
                write!(f, "[∀{variable} ")?;
                guard.fmt_at(f, 0)?;
                write!(f, "]")?;
                body.fmt_at(f, PREFIX)
            }
        }
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_at(f, 0)
    }
}

#[cfg(test)]
mod display_tests {
    use super::*;

    fn atom(name: &str) -> Formula {
        Formula::atom(name).unwrap()
    }

    #[test]
    fn minimal_parentheses() {
        let p = atom("p");
        let q = atom("q");
        let r = atom("r");

        let nested_left = Formula::imp(Formula::imp(p.clone(), q.clone()), r.clone());
        assert_eq!(nested_left.to_string(), "(p → q) → r");

        let nested_right = Formula::imp(p.clone(), Formula::imp(q.clone(), r.clone()));
        assert_eq!(nested_right.to_string(), "p → q → r");

        let mixed = Formula::and(p.clone(), Formula::or(q.clone(), r.clone()));
        assert_eq!(mixed.to_string(), "p ∧ (q ∨ r)");

        let flat = Formula::or(Formula::and(p.clone(), q), r);
        assert_eq!(flat.to_string(), "p ∧ q ∨ r");

        let negated = Formula::not(Formula::and(p.clone(), p));
        assert_eq!(negated.to_string(), "¬(p ∧ p)");
    }

    #[test]
    fn quantifier_form() {
        use crate::structures::term::Term;

        let x = Term::variable("X").unwrap();
        let student = Formula::pred("Student", vec![x.clone()]).unwrap();
        let human = Formula::pred("Human", vec![x]).unwrap();
        let some = Formula::rexists("X", student, human).unwrap();

        assert_eq!(some.to_string(), "[∃X Student(X)]Human(X)");
    }
}
