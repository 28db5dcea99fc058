/*!
Terms: constants and variables.

The core requires ground terms only --- a quantifier's bound variable is the sole route by which a variable enters a formula, and instantiation replaces it with a constant before the term reaches a branch.

Names are non-empty identifier strings.
The convention that constants begin lowercase and variables begin uppercase belongs to the parser; the structures here enforce non-emptiness only.
*/

use crate::types::err::{self};

/// A term of the language: a constant or a variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// A constant, e.g. `tweety` or an engine-introduced witness `c_0`.
    Constant(String),

    /// A variable, e.g. the `X` of `[∃X Student(X)]Human(X)`.
    Variable(String),
}

impl Term {
    /// A constant with the given name, rejecting the empty string.
    pub fn constant(name: impl Into<String>) -> Result<Self, err::FormulaError> {
        let name = name.into();
        match name.is_empty() {
            true => Err(err::FormulaError::EmptyTermName),
            false => Ok(Term::Constant(name)),
        }
    }

    /// A variable with the given name, rejecting the empty string.
    pub fn variable(name: impl Into<String>) -> Result<Self, err::FormulaError> {
        let name = name.into();
        match name.is_empty() {
            true => Err(err::FormulaError::EmptyTermName),
            false => Ok(Term::Variable(name)),
        }
    }

    /// The name of the term.
    pub fn name(&self) -> &str {
        match self {
            Term::Constant(name) | Term::Variable(name) => name,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Term::Constant(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
