mod atomic;
mod pending;

use crate::{
    builder::PredicateBuilder,
    error::{CompileError, Result, StructuralError},
    token::{Token, TokenKind},
};
use atomic::compile_term;
use pending::Pending;
use tracing::trace;

/// Shunting-yard reduction of a normalized token sequence to one predicate.
///
/// Precedence, tightest first: no-op, `AND`, `OR`. Operators of equal
/// precedence associate to the left; parentheses group.
pub struct Evaluator<'b, B: PredicateBuilder> {
    builder: &'b B,
    operands: Vec<B::Predicate>,
    operators: Vec<Pending>,
}

impl<'b, B: PredicateBuilder> Evaluator<'b, B> {
    pub fn new(builder: &'b B) -> Self {
        Self {
            builder,
            operands: Vec::new(),
            operators: Vec::new(),
        }
    }

    /// Consumes the evaluator; `tokens` are expected to come from
    /// [`normalize`](crate::normalize::normalize).
    pub fn evaluate(mut self, tokens: &[Token<'_>]) -> Result<B::Predicate> {
        self.operands.reserve(tokens.len() / 2 + 1);
        self.operators.reserve(tokens.len() / 2 + 1);

        for (index, token) in tokens.iter().enumerate() {
            let position = token.position.unwrap_or(index);
            match token.kind {
                TokenKind::Atom(term) => {
                    let predicate = compile_term(self.builder, term)
                        .map_err(|source| CompileError::Lookup { position, source })?;
                    self.operands.push(predicate);
                }
                TokenKind::Close => self.close_group(position)?,
                TokenKind::Open => self.operators.push(Pending::Open),
                TokenKind::And => self.push_operator(Pending::And)?,
                TokenKind::Or => self.push_operator(Pending::Or)?,
                TokenKind::NoOp => self.push_operator(Pending::NoOp)?,
            }
        }

        let depth = self
            .operators
            .iter()
            .filter(|op| **op == Pending::Open)
            .count();
        if depth > 0 {
            return Err(StructuralError::UnclosedOpen { depth }.into());
        }

        while let Some(op) = self.operators.pop() {
            self.reduce(op)?;
        }

        let result = self.operands.pop();
        match (result, self.operands.len()) {
            (Some(predicate), 0) => Ok(predicate),
            (None, _) => Err(CompileError::Invariant(
                "no operand left after evaluation".to_string(),
            )),
            (Some(_), rest) => Err(CompileError::Invariant(format!(
                "{} operands left after evaluation, expected 1",
                rest + 1
            ))),
        }
    }

    fn push_operator(&mut self, incoming: Pending) -> Result<()> {
        while let Some(&top) = self.operators.last() {
            if top == Pending::Open || top.precedence() < incoming.precedence() {
                break;
            }
            self.operators.pop();
            self.reduce(top)?;
        }
        self.operators.push(incoming);
        Ok(())
    }

    fn close_group(&mut self, position: usize) -> Result<()> {
        loop {
            match self.operators.pop() {
                Some(Pending::Open) => return Ok(()),
                Some(op) => self.reduce(op)?,
                None => return Err(StructuralError::UnmatchedClose { position }.into()),
            }
        }
    }

    fn reduce(&mut self, op: Pending) -> Result<()> {
        trace!(operator = op.name(), operands = self.operands.len(), "reduce");

        let combined = match op {
            Pending::NoOp => self.builder.true_value(),
            Pending::And | Pending::Or => {
                let (Some(right), Some(left)) = (self.operands.pop(), self.operands.pop()) else {
                    return Err(CompileError::Invariant(format!(
                        "operator {} is missing an operand",
                        op.name()
                    )));
                };
                if op == Pending::And {
                    self.builder.and(left, right)
                } else {
                    self.builder.or(left, right)
                }
            }
            Pending::Open => {
                return Err(CompileError::Invariant(
                    "opening parenthesis cannot be reduced".to_string(),
                ));
            }
        };

        self.operands.push(combined);
        Ok(())
    }
}
