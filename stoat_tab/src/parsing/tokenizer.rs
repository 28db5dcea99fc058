//! Tokenizing of formula strings.

use crate::types::err::{ParseError, ParseErrorKind};

/// A token of the surface syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// An identifier: a predicate name, a term, or a quantifier keyword.
    Ident(String),

    /// `~` or `¬`.
    Not,

    /// `&` or `∧`.
    And,

    /// `|` or `∨`.
    Or,

    /// `->` or `→`.
    Imp,

    /// `<->` or `↔`.
    Iff,

    /// `∃` (the keyword form `exists` arrives as an identifier).
    Exists,

    /// `∀` (the keyword form `forall` arrives as an identifier).
    Forall,

    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "{name}"),
            Token::Not => write!(f, "~"),
            Token::And => write!(f, "&"),
            Token::Or => write!(f, "|"),
            Token::Imp => write!(f, "->"),
            Token::Iff => write!(f, "<->"),
            Token::Exists => write!(f, "∃"),
            Token::Forall => write!(f, "∀"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
        }
    }
}

/// A token together with the character offset at which it begins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub position: usize,
}

fn begins_identifier(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn continues_identifier(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Process a formula string into tokens.
///
/// Positions count characters, not bytes, so diagnostics line up with what the user typed.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let mut tokens = Vec::default();
    let mut chars = input.chars().enumerate().peekable();

    while let Some((position, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,

            '~' | '¬' => Token::Not,
            '&' | '∧' => Token::And,
            '|' | '∨' => Token::Or,
            '→' => Token::Imp,
            '↔' => Token::Iff,
            '∃' => Token::Exists,
            '∀' => Token::Forall,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,

            '-' => match chars.next_if(|(_, c)| *c == '>') {
                Some(_) => Token::Imp,
                None => {
                    return Err(ParseError::new(
                        position,
                        ParseErrorKind::IncompleteOperator("-".to_owned()),
                    ));
                }
            },

            '<' => {
                let dash = chars.next_if(|(_, c)| *c == '-').is_some();
                let arrow = dash && chars.next_if(|(_, c)| *c == '>').is_some();
                match arrow {
                    true => Token::Iff,
                    false => {
                        let sofar = if dash { "<-" } else { "<" };
                        return Err(ParseError::new(
                            position,
                            ParseErrorKind::IncompleteOperator(sofar.to_owned()),
                        ));
                    }
                }
            }

            c if begins_identifier(c) => {
                let mut name = String::from(c);
                while let Some((_, c)) = chars.next_if(|(_, c)| continues_identifier(*c)) {
                    name.push(c);
                }
                Token::Ident(name)
            }

            c => return Err(ParseError::new(position, ParseErrorKind::UnexpectedCharacter(c))),
        };

        tokens.push(SpannedToken { token, position });
    }

    Ok(tokens)
}
