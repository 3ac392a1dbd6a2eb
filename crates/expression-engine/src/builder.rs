use model::{LookupError, LookupKind};

/// Capability supplied by the query layer: compiles one field comparison and
/// combines predicates.
///
/// The compiler never inspects a predicate; it only threads values through
/// these combinators. `compile_atomic` runs synchronously and any error aborts
/// the whole compilation.
pub trait PredicateBuilder {
    type Predicate;

    /// Compiles `field <lookup> value`. `value` is `None` for lookups that take
    /// no value (null and boolean checks) or when the term left it empty.
    fn compile_atomic(
        &self,
        field: &str,
        lookup: LookupKind,
        value: Option<&str>,
    ) -> Result<Self::Predicate, LookupError>;

    fn negate(&self, predicate: Self::Predicate) -> Self::Predicate;

    fn and(&self, left: Self::Predicate, right: Self::Predicate) -> Self::Predicate;

    fn or(&self, left: Self::Predicate, right: Self::Predicate) -> Self::Predicate;

    /// Identity predicate matching every record.
    fn true_value(&self) -> Self::Predicate;
}
