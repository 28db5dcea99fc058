/*!
Signed formulas --- the atomic objects of tableau reasoning.

A signed formula pairs a [Sign] with a [Formula].
Equality and hashing are structural on both components.

The factories [T], [F], [U], [M], and [N] follow the notation of the tableau literature, so `T(formula)` reads as the signed formula `T:formula`.
*/

use crate::structures::formula::Formula;
use crate::structures::sign::Sign;

/// A sign attached to a formula.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignedFormula {
    pub sign: Sign,
    pub formula: Formula,
}

impl SignedFormula {
    pub fn new(sign: Sign, formula: Formula) -> Self {
        SignedFormula { sign, formula }
    }

    /// Whether the two signed formulas close a branch: the same formula under contradictory signs.
    ///
    /// No cross-formula test is made.
    /// In particular `T:¬p` and `F:p` do not contradict; they only come to do so once the negation rule rewrites the former to `F:p`.
    pub fn contradicts(&self, other: &SignedFormula) -> bool {
        self.formula == other.formula && self.sign.contradicts(other.sign)
    }

    /// Whether the underlying formula is a literal.
    pub fn is_literal(&self) -> bool {
        self.formula.is_literal()
    }

    /// The depth of the underlying formula.
    pub fn depth(&self) -> usize {
        self.formula.depth()
    }
}

impl std::fmt::Display for SignedFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.sign, self.formula)
    }
}

/// The signed formula `T:formula`.
#[allow(non_snake_case)]
pub fn T(formula: Formula) -> SignedFormula {
    SignedFormula::new(Sign::T, formula)
}

/// The signed formula `F:formula`.
#[allow(non_snake_case)]
pub fn F(formula: Formula) -> SignedFormula {
    SignedFormula::new(Sign::F, formula)
}

/// The signed formula `U:formula` (WK3).
#[allow(non_snake_case)]
pub fn U(formula: Formula) -> SignedFormula {
    SignedFormula::new(Sign::U, formula)
}

/// The signed formula `M:formula` (wKrQ).
#[allow(non_snake_case)]
pub fn M(formula: Formula) -> SignedFormula {
    SignedFormula::new(Sign::M, formula)
}

/// The signed formula `N:formula` (wKrQ).
#[allow(non_snake_case)]
pub fn N(formula: Formula) -> SignedFormula {
    SignedFormula::new(Sign::N, formula)
}

#[cfg(test)]
mod signed_tests {
    use super::*;

    #[test]
    fn contradiction_requires_the_same_formula() {
        let p = Formula::atom("p").unwrap();
        let q = Formula::atom("q").unwrap();

        assert!(T(p.clone()).contradicts(&F(p.clone())));
        assert!(F(p.clone()).contradicts(&T(p.clone())));
        assert!(!T(p.clone()).contradicts(&F(q)));
        assert!(!T(p.clone()).contradicts(&T(p.clone())));
        assert!(!M(p.clone()).contradicts(&N(p.clone())));

        // Closure is never read through a negation.
        let not_p = Formula::not(p.clone());
        assert!(!T(not_p).contradicts(&T(p)));
    }

    #[test]
    fn display() {
        let p = Formula::atom("p").unwrap();
        assert_eq!(T(p.clone()).to_string(), "T:p");
        assert_eq!(U(p).to_string(), "U:p");
    }
}
