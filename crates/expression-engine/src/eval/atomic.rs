use crate::builder::PredicateBuilder;
use model::{LookupError, Operator, Term};

/// Compiles one atomic term: the OR of its field alternatives, negated as a
/// whole for `NOT` terms.
pub(crate) fn compile_term<B: PredicateBuilder>(
    builder: &B,
    term: &Term,
) -> Result<B::Predicate, LookupError> {
    let mut fields = term.fields.iter();
    let first = fields.next().ok_or(LookupError::MissingField)?;
    let lookup = term.lookup.ok_or(LookupError::MissingLookup)?;
    let value = term.value.as_deref();

    let mut predicate = builder.compile_atomic(first, lookup, value)?;
    for field in fields {
        let alternative = builder.compile_atomic(field, lookup, value)?;
        predicate = builder.or(predicate, alternative);
    }

    Ok(match term.operator {
        Operator::Not => builder.negate(predicate),
        _ => predicate,
    })
}
