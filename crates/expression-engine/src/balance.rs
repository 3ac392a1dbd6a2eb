use crate::error::StructuralError;
use model::{Operator, Term};

/// Verifies parenthesis nesting over raw, unnormalized terms.
///
/// Terms marked as deleted are skipped. Only the operator column is
/// inspected, so the check runs before any atomic term is compiled.
pub fn check_balance<'a>(terms: impl IntoIterator<Item = &'a Term>) -> Result<(), StructuralError> {
    let mut depth = 0usize;

    for (position, term) in terms.into_iter().enumerate() {
        if term.deleted {
            continue;
        }

        match term.operator {
            Operator::Open => depth += 1,
            Operator::Close => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(StructuralError::UnmatchedClose { position })?;
            }
            Operator::None | Operator::Not | Operator::And | Operator::Or => {}
        }
    }

    if depth > 0 {
        return Err(StructuralError::UnclosedOpen { depth });
    }

    Ok(())
}
