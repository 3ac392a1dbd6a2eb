use crate::token::{Token, TokenKind};
use model::Term;

/// Makes every implicit operator of a user-ordered term sequence explicit.
///
/// An operand followed by another operand gets an `AND` between them; an
/// operator slot followed by another operator (or a closing paren) gets a
/// no-op in the empty operand position. Never fails.
pub fn normalize<'a>(terms: impl IntoIterator<Item = &'a Term>) -> Vec<Token<'a>> {
    normalize_tokens(
        terms
            .into_iter()
            .enumerate()
            .map(|(position, term)| Token::from_term(position, term)),
    )
}

/// Normalizes an arbitrary token stream. Applying it to its own output inserts
/// nothing.
pub fn normalize_tokens<'a>(tokens: impl IntoIterator<Item = Token<'a>>) -> Vec<Token<'a>> {
    let tokens = tokens.into_iter();
    let mut normalized = Vec::with_capacity(tokens.size_hint().0 + 1);
    let mut prev: Option<Token<'a>> = None;

    for token in tokens {
        match prev {
            None if token.follows_operand() => {
                normalized.push(Token::implicit(TokenKind::NoOp));
            }
            Some(p) if p.ends_operand() && token.starts_operand() => {
                normalized.push(Token::implicit(TokenKind::And));
            }
            Some(p) if p.expects_operand() && token.follows_operand() => {
                normalized.push(Token::implicit(TokenKind::NoOp));
            }
            _ => {}
        }

        normalized.push(token);
        prev = Some(token);
    }

    // Trailing operator slot, or nothing to evaluate at all.
    if normalized.last().is_none_or(|last| last.expects_operand()) {
        normalized.push(Token::implicit(TokenKind::NoOp));
    }

    normalized
}
