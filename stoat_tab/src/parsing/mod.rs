/*!
Parsing of the concrete formula syntax.

The surface syntax, which the [parser](parse) turns into a [Formula](crate::structures::formula::Formula):

- Atom and predicate names match `[A-Za-z_][A-Za-z0-9_]*`; application is written `Name(arg, …)`, and a zero-arity predicate as a bare `Name`.
- Term arguments follow the naming convention: an identifier beginning uppercase is a variable, anything else a constant.
  A variable must be bound by an enclosing quantifier; the parser rejects free variables.
- Operators, with ASCII and Unicode spellings: `~`/`¬`, `&`/`∧`, `|`/`∨`, `->`/`→`, and `<->`/`↔` as sugar for mutual implication.
- Restricted quantifiers are bracketed: `[exists X Guard(X)]Body(X)` and `[forall X Guard(X)]Body(X)`, with `∃`/`∀` accepted in place of the keywords.

Precedence, lowest to highest: `<->`, `->` (right associative), `∨` (left), `∧` (left), `¬` and the quantifier prefixes, predicate application.
Parentheses override.
Whitespace is insignificant outside identifiers.

Parsing is pure: it reads an in-memory string and produces either a formula or a positioned [ParseError](crate::types::err::ParseError).
*/

mod tokenizer;
pub use tokenizer::{tokenize, SpannedToken, Token};

mod parser;
pub use parser::parse;
