use crate::{
    balance::check_balance,
    builder::PredicateBuilder,
    error::Result,
    eval::Evaluator,
    normalize::normalize,
};
use model::{FilterExpr, Term};
use tracing::{debug, warn};

/// Compiles user-ordered terms into a single predicate of builder `B`.
pub struct FilterCompiler<'b, B: PredicateBuilder> {
    builder: &'b B,
}

impl<'b, B: PredicateBuilder> FilterCompiler<'b, B> {
    pub fn new(builder: &'b B) -> Self {
        Self { builder }
    }

    /// Compiles `terms` in the order given. Deleted terms are dropped first, so
    /// error positions index the remaining terms.
    pub fn compile(&self, terms: &[Term]) -> Result<B::Predicate> {
        self.compile_sequence(terms.iter().filter(|t| !t.deleted).collect())
    }

    /// Compiles the terms of a saved filter in their `order`.
    pub fn compile_filter(&self, filter: &FilterExpr) -> Result<B::Predicate> {
        debug!("Compiling filter '{}' on {}", filter.name, filter.model);
        self.compile_sequence(
            filter
                .ordered_terms()
                .into_iter()
                .filter(|t| !t.deleted)
                .collect(),
        )
    }

    fn compile_sequence(&self, live: Vec<&Term>) -> Result<B::Predicate> {
        if let Err(err) = check_balance(live.iter().copied()) {
            warn!("Rejecting filter expression: {}", err);
            return Err(err.into());
        }

        let tokens = normalize(live.iter().copied());
        let implicit = tokens.iter().filter(|t| t.is_implicit()).count();
        debug!(
            terms = live.len(),
            tokens = tokens.len(),
            implicit,
            "Normalized filter expression"
        );

        Evaluator::new(self.builder)
            .evaluate(&tokens)
            .inspect_err(|err| warn!("Failed to compile filter expression: {}", err))
    }
}

/// Shorthand for `FilterCompiler::new(builder).compile(terms)`.
pub fn compile<B: PredicateBuilder>(builder: &B, terms: &[Term]) -> Result<B::Predicate> {
    FilterCompiler::new(builder).compile(terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{CompileError, StructuralError},
        symbolic::SymbolicBuilder,
    };
    use model::{LookupError, LookupKind};

    #[test]
    fn test_deleted_terms_do_not_participate() {
        let terms = vec![
            Term::atomic("a", LookupKind::Equals, Some("1")),
            Term::or().mark_deleted(),
            Term::close().mark_deleted(),
            Term::atomic("b", LookupKind::Equals, Some("2")),
        ];
        assert_eq!(compile(&SymbolicBuilder, &terms).unwrap(), "and(a=1, b=2)");
    }

    #[test]
    fn test_compile_filter_uses_term_order() {
        let filter = FilterExpr::new("f", "shop.Order").with_terms(vec![
            Term::atomic("b", LookupKind::Equals, Some("2")).with_order(2),
            Term::or().with_order(1),
            Term::atomic("a", LookupKind::Equals, Some("1")).with_order(0),
        ]);
        let compiled = FilterCompiler::new(&SymbolicBuilder)
            .compile_filter(&filter)
            .unwrap();
        assert_eq!(compiled, "or(a=1, b=2)");
    }

    #[test]
    fn test_structural_check_runs_before_atoms() {
        // The bad date is never reached.
        let terms = vec![
            Term::close(),
            Term::atomic("due_date", LookupKind::Equals, Some("soon")),
        ];
        let err = compile(&SymbolicBuilder, &terms).unwrap_err();
        assert!(matches!(
            err,
            CompileError::Structural(StructuralError::UnmatchedClose { position: 0 })
        ));
    }

    #[test]
    fn test_missing_lookup_reports_position() {
        let mut incomplete = Term::atomic("status", LookupKind::Equals, Some("open"));
        incomplete.lookup = None;
        let terms = vec![Term::atomic("a", LookupKind::Equals, Some("1")), Term::and(), incomplete];

        let err = compile(&SymbolicBuilder, &terms).unwrap_err();
        assert!(matches!(err, CompileError::Lookup { position: 2, .. }));
        assert_eq!(err.lookup_error(), Some(&LookupError::MissingLookup));
    }
}
