use model::{Operator, Term};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Atomic term (operator `None` or `Not`).
    Atom(&'a Term),
    And,
    Or,
    Open,
    Close,
    /// Neutral filler for an empty operand slot; reduces to the identity
    /// predicate.
    NoOp,
}

/// Element of a normalized sequence. `position` indexes the originating term;
/// tokens inserted by normalization have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub position: Option<usize>,
}

impl<'a> Token<'a> {
    pub fn from_term(position: usize, term: &'a Term) -> Self {
        let kind = match term.operator {
            Operator::None | Operator::Not => TokenKind::Atom(term),
            Operator::And => TokenKind::And,
            Operator::Or => TokenKind::Or,
            Operator::Open => TokenKind::Open,
            Operator::Close => TokenKind::Close,
        };
        Self {
            kind,
            position: Some(position),
        }
    }

    pub fn implicit(kind: TokenKind<'a>) -> Self {
        Self {
            kind,
            position: None,
        }
    }

    pub fn is_implicit(&self) -> bool {
        self.position.is_none()
    }

    /// The token completes an operand (atom or closing paren).
    pub(crate) fn ends_operand(&self) -> bool {
        matches!(self.kind, TokenKind::Atom(_) | TokenKind::Close)
    }

    /// The token starts an operand (atom or opening paren).
    pub(crate) fn starts_operand(&self) -> bool {
        matches!(self.kind, TokenKind::Atom(_) | TokenKind::Open)
    }

    /// An operand must follow this token.
    pub(crate) fn expects_operand(&self) -> bool {
        matches!(self.kind, TokenKind::Open | TokenKind::And | TokenKind::Or)
    }

    /// An operand must precede this token.
    pub(crate) fn follows_operand(&self) -> bool {
        matches!(self.kind, TokenKind::Close | TokenKind::And | TokenKind::Or)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Atom(term) => write!(f, "{term}"),
            TokenKind::And => write!(f, "AND"),
            TokenKind::Or => write!(f, "OR"),
            TokenKind::Open => write!(f, "("),
            TokenKind::Close => write!(f, ")"),
            TokenKind::NoOp => write!(f, "TRUE"),
        }
    }
}
