/*!
Error types used in the library.

- Parsing and construction errors are returned as values; no user input makes the library panic.
- Outcomes of a tableau construction which are not errors --- resource exhaustion, cancellation --- are variants of [BuildResult](crate::reports::BuildResult) rather than anything here, so callers handle them uniformly with the logical outcomes.
- [ErrorKind::InternalInvariantViolated] marks a failed self-check (for instance the model post-condition).
  It is surfaced as an error so hosts and tests can distinguish a bug from a logical verdict.
*/

use crate::structures::sign::{Sign, System};

/// A union of the varied error kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// An error while parsing a formula string.
    Parse(ParseError),

    /// A structural violation detected at formula construction.
    Formula(FormulaError),

    /// A signed formula carried a sign which does not belong to the engine's system.
    SystemMismatch { system: System, sign: Sign },

    /// A query ended without a verdict; the façade surfaces this when a boolean answer was requested.
    Unresolved(UnresolvedKind),

    /// A self-check failed. This indicates a bug in the library, not in the input.
    InternalInvariantViolated(InvariantError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Parse(e) => write!(f, "parse error: {e}"),
            ErrorKind::Formula(e) => write!(f, "invalid formula: {e}"),
            ErrorKind::SystemMismatch { system, sign } => {
                write!(f, "sign {sign} does not belong to the {system} system")
            }
            ErrorKind::Unresolved(kind) => write!(f, "query unresolved: {kind}"),
            ErrorKind::InternalInvariantViolated(e) => write!(f, "internal invariant violated: {e}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// An error during parsing, with the character position at which it was noticed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Character offset into the input.
    pub position: usize,

    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(position: usize, kind: ParseErrorKind) -> Self {
        ParseError { position, kind }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at position {}", self.kind, self.position)
    }
}

/// The varieties of parse error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// An empty (or all-whitespace) input, where a formula was required.
    Empty,

    /// A character which begins no token.
    UnexpectedCharacter(char),

    /// A well-formed token in a position the grammar does not allow.
    UnexpectedToken(String),

    /// The input ended while a subformula was still open.
    UnexpectedEnd,

    /// A `(` without a matching `)`.
    UnmatchedParenthesis,

    /// A `[` without a matching `]`.
    UnmatchedBracket,

    /// The start of a multi-character operator without its continuation, e.g. `-` without `>`.
    IncompleteOperator(String),

    /// An identifier was required (predicate name, variable, or term).
    ExpectedIdentifier,

    /// A quantifier variable which does not begin with an uppercase letter.
    InvalidQuantifierVariable(String),

    /// A formula with free variables at the top level; arguments must be ground.
    FreeVariable(String),
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::Empty => write!(f, "empty input"),
            ParseErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character '{c}'"),
            ParseErrorKind::UnexpectedToken(t) => write!(f, "unexpected token '{t}'"),
            ParseErrorKind::UnexpectedEnd => write!(f, "unexpected end of input"),
            ParseErrorKind::UnmatchedParenthesis => write!(f, "unmatched parenthesis"),
            ParseErrorKind::UnmatchedBracket => write!(f, "unmatched bracket"),
            ParseErrorKind::IncompleteOperator(o) => write!(f, "incomplete operator '{o}'"),
            ParseErrorKind::ExpectedIdentifier => write!(f, "expected an identifier"),
            ParseErrorKind::InvalidQuantifierVariable(v) => {
                write!(f, "quantifier variable '{v}' must begin uppercase")
            }
            ParseErrorKind::FreeVariable(v) => write!(f, "unbound variable '{v}'"),
        }
    }
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Why a query ended without a verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnresolvedKind {
    /// The cancellation token fired.
    Cancelled,

    /// A safety bound tripped.
    ResourceExhausted,
}

impl std::fmt::Display for UnresolvedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnresolvedKind::Cancelled => write!(f, "cancelled"),
            UnresolvedKind::ResourceExhausted => write!(f, "resource exhausted"),
        }
    }
}

/// A structural violation detected when constructing a formula or term.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormulaError {
    /// A predicate with an empty name.
    EmptyPredicateName,

    /// A term with an empty name.
    EmptyTermName,

    /// A quantifier binding the empty string.
    EmptyQuantifierVariable,
}

impl std::fmt::Display for FormulaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormulaError::EmptyPredicateName => write!(f, "empty predicate name"),
            FormulaError::EmptyTermName => write!(f, "empty term name"),
            FormulaError::EmptyQuantifierVariable => write!(f, "empty quantifier variable"),
        }
    }
}

impl From<FormulaError> for ErrorKind {
    fn from(e: FormulaError) -> Self {
        ErrorKind::Formula(e)
    }
}

/// A failed self-check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantError {
    /// An extracted model failed to satisfy some initial signed formula.
    ModelPostCondition(String),

    /// A rule was applied to a branch already closed.
    ExpansionOfClosedBranch,

    /// A signed formula was classified for expansion, but no expansion matched its shape.
    MissingRuleExpansion,
}

impl std::fmt::Display for InvariantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvariantError::ModelPostCondition(detail) => {
                write!(f, "model post-condition: {detail}")
            }
            InvariantError::ExpansionOfClosedBranch => write!(f, "expansion of a closed branch"),
            InvariantError::MissingRuleExpansion => {
                write!(f, "no expansion matched a classified signed formula")
            }
        }
    }
}

impl From<InvariantError> for ErrorKind {
    fn from(e: InvariantError) -> Self {
        ErrorKind::InternalInvariantViolated(e)
    }
}
