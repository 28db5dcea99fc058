//! Parsing of token streams into formulas by recursive descent.
//!
//! One parse function per precedence level, weakest first: biconditional, implication, disjunction, conjunction, then the prefix forms and primaries.

use crate::parsing::tokenizer::{tokenize, SpannedToken, Token};
use crate::structures::formula::Formula;
use crate::structures::term::Term;
use crate::types::err::{ParseError, ParseErrorKind};

/// Parse a formula string.
///
/// # Example
///
/// ```rust
/// # use stoat_tab::parsing::parse;
/// let formula = parse("p & q -> r").unwrap();
/// assert_eq!(formula.to_string(), "p ∧ q → r");
///
/// assert!(parse("p &").is_err());
/// ```
pub fn parse(input: &str) -> Result<Formula, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::new(0, ParseErrorKind::Empty));
    }

    let mut parser = Parser {
        tokens: &tokens,
        cursor: 0,
        end: input.chars().count(),
    };

    let formula = parser.parse_iff()?;

    if let Some(spanned) = parser.peek() {
        return Err(ParseError::new(
            spanned.position,
            ParseErrorKind::UnexpectedToken(spanned.token.to_string()),
        ));
    }

    if let Some(variable) = formula.free_variables().into_iter().next() {
        return Err(ParseError::new(0, ParseErrorKind::FreeVariable(variable)));
    }

    Ok(formula)
}

struct Parser<'t> {
    tokens: &'t [SpannedToken],
    cursor: usize,
    end: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t SpannedToken> {
        self.tokens.get(self.cursor)
    }

    fn next(&mut self) -> Option<&'t SpannedToken> {
        let spanned = self.tokens.get(self.cursor);
        if spanned.is_some() {
            self.cursor += 1;
        }
        spanned
    }

    /// Consume the next token if it equals `token`.
    fn eat(&mut self, token: &Token) -> bool {
        match self.peek() {
            Some(spanned) if spanned.token == *token => {
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }

    fn unexpected(&self, spanned: Option<&SpannedToken>) -> ParseError {
        match spanned {
            Some(spanned) => ParseError::new(
                spanned.position,
                ParseErrorKind::UnexpectedToken(spanned.token.to_string()),
            ),
            None => ParseError::new(self.end, ParseErrorKind::UnexpectedEnd),
        }
    }

    fn parse_iff(&mut self) -> Result<Formula, ParseError> {
        let mut formula = self.parse_imp()?;
        while self.eat(&Token::Iff) {
            let rhs = self.parse_imp()?;
            formula = Formula::iff(formula, rhs);
        }
        Ok(formula)
    }

    fn parse_imp(&mut self) -> Result<Formula, ParseError> {
        let lhs = self.parse_or()?;
        match self.eat(&Token::Imp) {
            // Right associative.
            true => Ok(Formula::imp(lhs, self.parse_imp()?)),
            false => Ok(lhs),
        }
    }

    fn parse_or(&mut self) -> Result<Formula, ParseError> {
        let mut formula = self.parse_and()?;
        while self.eat(&Token::Or) {
            let rhs = self.parse_and()?;
            formula = Formula::or(formula, rhs);
        }
        Ok(formula)
    }

    fn parse_and(&mut self) -> Result<Formula, ParseError> {
        let mut formula = self.parse_unary()?;
        while self.eat(&Token::And) {
            let rhs = self.parse_unary()?;
            formula = Formula::and(formula, rhs);
        }
        Ok(formula)
    }

    fn parse_unary(&mut self) -> Result<Formula, ParseError> {
        match self.peek().map(|spanned| &spanned.token) {
            Some(Token::Not) => {
                self.cursor += 1;
                Ok(Formula::not(self.parse_unary()?))
            }
            Some(Token::LBracket) => self.parse_quantifier(),
            _ => self.parse_primary(),
        }
    }

    /// `[∃X Guard]Body` or `[∀X Guard]Body`, keyword spellings included.
    fn parse_quantifier(&mut self) -> Result<Formula, ParseError> {
        let open = self.next().ok_or_else(|| self.unexpected(None))?;
        let open_position = open.position;

        let existential = {
            let spanned = self.next();
            match spanned.map(|s| &s.token) {
                Some(Token::Exists) => true,
                Some(Token::Forall) => false,
                Some(Token::Ident(word)) if word == "exists" => true,
                Some(Token::Ident(word)) if word == "forall" => false,
                _ => return Err(self.unexpected(spanned)),
            }
        };

        let variable = {
            let spanned = self.next();
            match spanned.map(|s| &s.token) {
                Some(Token::Ident(name)) => {
                    if !name.chars().next().is_some_and(char::is_uppercase) {
                        return Err(ParseError::new(
                            spanned.map(|s| s.position).unwrap_or(self.end),
                            ParseErrorKind::InvalidQuantifierVariable(name.clone()),
                        ));
                    }
                    name.clone()
                }
                _ => return Err(self.unexpected(spanned)),
            }
        };

        let guard = self.parse_iff()?;

        if !self.eat(&Token::RBracket) {
            return Err(ParseError::new(
                open_position,
                ParseErrorKind::UnmatchedBracket,
            ));
        }

        let body = self.parse_unary()?;

        let quantified = match existential {
            true => Formula::rexists(variable, guard, body),
            false => Formula::rforall(variable, guard, body),
        };

        // The tokenizer never yields an empty identifier.
        quantified
            .map_err(|_| ParseError::new(open_position, ParseErrorKind::ExpectedIdentifier))
    }

    fn parse_primary(&mut self) -> Result<Formula, ParseError> {
        let spanned = self.next();
        match spanned.map(|s| (&s.token, s.position)) {
            Some((Token::LParen, position)) => {
                let formula = self.parse_iff()?;
                match self.eat(&Token::RParen) {
                    true => Ok(formula),
                    false => Err(ParseError::new(position, ParseErrorKind::UnmatchedParenthesis)),
                }
            }

            Some((Token::Ident(name), position)) => {
                let args = match self.eat(&Token::LParen) {
                    true => self.parse_arguments(position)?,
                    false => Vec::default(),
                };
                Formula::pred(name.clone(), args)
                    .map_err(|_| ParseError::new(position, ParseErrorKind::ExpectedIdentifier))
            }

            _ => Err(self.unexpected(spanned)),
        }
    }

    /// The argument list of a predicate application, after its `(`.
    fn parse_arguments(&mut self, open_position: usize) -> Result<Vec<Term>, ParseError> {
        let mut args = vec![self.parse_term()?];
        while self.eat(&Token::Comma) {
            args.push(self.parse_term()?);
        }
        match self.eat(&Token::RParen) {
            true => Ok(args),
            false => Err(ParseError::new(
                open_position,
                ParseErrorKind::UnmatchedParenthesis,
            )),
        }
    }

    /// An identifier beginning uppercase is a variable, anything else a constant.
    fn parse_term(&mut self) -> Result<Term, ParseError> {
        let spanned = self.next();
        match spanned.map(|s| (&s.token, s.position)) {
            Some((Token::Ident(name), position)) => {
                let term = match name.chars().next().is_some_and(char::is_uppercase) {
                    true => Term::variable(name.clone()),
                    false => Term::constant(name.clone()),
                };
                term.map_err(|_| ParseError::new(position, ParseErrorKind::ExpectedIdentifier))
            }
            _ => Err(self.unexpected(spanned)),
        }
    }
}
