use std::fmt;
use std::marker::PhantomData;

use super::query::QueryFilter;

// ============================================================================
// Specification Pattern
// ============================================================================
//
// A specification is a predicate over an entity that can also describe
// itself as a `QueryFilter`. Repositories that understand query filters
// push the filter down; everything else falls back to `is_satisfied_by`.
// Both forms must select the same entities.
//
// ============================================================================

/// Composable predicate over `T`
pub trait Specification<T>: Send + Sync {
    /// In-memory evaluation
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// Declarative form of the predicate, if it has one
    fn to_query(&self) -> Option<QueryFilter> {
        None
    }
}

impl<T, S> Specification<T> for Box<S>
where
    S: Specification<T> + ?Sized,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (**self).is_satisfied_by(candidate)
    }

    fn to_query(&self) -> Option<QueryFilter> {
        (**self).to_query()
    }
}

impl<T, S> Specification<T> for &S
where
    S: Specification<T> + ?Sized,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (**self).is_satisfied_by(candidate)
    }

    fn to_query(&self) -> Option<QueryFilter> {
        (**self).to_query()
    }
}

/// Combinators available on every sized specification
pub trait SpecificationExt<T>: Specification<T> + Sized {
    /// Logical AND of two specifications
    fn and<S: Specification<T>>(self, other: S) -> And<Self, S> {
        And { left: self, right: other }
    }

    /// Borrowing closure form of `is_satisfied_by`
    fn to_predicate(&self) -> impl Fn(&T) -> bool + '_ {
        move |candidate| self.is_satisfied_by(candidate)
    }

    /// Keep only the items this specification is satisfied by
    fn filter(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().filter(|item| self.is_satisfied_by(item)).collect()
    }
}

impl<T, S: Specification<T>> SpecificationExt<T> for S {}

/// Conjunction of two specifications
#[derive(Debug, Clone)]
pub struct And<A, B> {
    left: A,
    right: B,
}

impl<T, A, B> Specification<T> for And<A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) && self.right.is_satisfied_by(candidate)
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(self.left.to_query()?.and(self.right.to_query()?))
    }
}

/// Conjunction of any number of boxed specifications; empty matches everything
pub struct AllOf<T> {
    parts: Vec<Box<dyn Specification<T>>>,
}

impl<T> AllOf<T> {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn with(mut self, spec: impl Specification<T> + 'static) -> Self {
        self.parts.push(Box::new(spec));
        self
    }

    pub fn push(&mut self, spec: impl Specification<T> + 'static) {
        self.parts.push(Box::new(spec));
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl<T> Default for AllOf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for AllOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllOf").field("parts", &self.parts.len()).finish()
    }
}

impl<T> Specification<T> for AllOf<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.parts.iter().all(|part| part.is_satisfied_by(candidate))
    }

    fn to_query(&self) -> Option<QueryFilter> {
        self.parts
            .iter()
            .try_fold(QueryFilter::And(Vec::new()), |acc, part| Some(acc.and(part.to_query()?)))
    }
}

/// Closure-backed specification; has no query form
pub struct FnSpecification<T, F> {
    predicate: F,
    _phantom: PhantomData<fn(&T)>,
}

impl<T, F> FnSpecification<T, F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            _phantom: PhantomData,
        }
    }
}

impl<T, F> Specification<T> for FnSpecification<T, F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (self.predicate)(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query::{FieldAccess, FieldValue};

    #[derive(Debug, Clone)]
    struct Item {
        colour: &'static str,
        size: i64,
    }

    impl FieldAccess for Item {
        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "colour" => Some(self.colour.into()),
                "size" => Some(self.size.into()),
                _ => None,
            }
        }
    }

    struct Colour(&'static str);

    impl Specification<Item> for Colour {
        fn is_satisfied_by(&self, candidate: &Item) -> bool {
            candidate.colour == self.0
        }

        fn to_query(&self) -> Option<QueryFilter> {
            Some(QueryFilter::equals("colour", self.0))
        }
    }

    struct Large;

    impl Specification<Item> for Large {
        fn is_satisfied_by(&self, candidate: &Item) -> bool {
            candidate.size >= 10
        }

        fn to_query(&self) -> Option<QueryFilter> {
            Some(QueryFilter::compare("size", crate::shared::Operator::Ge, 10i64))
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { colour: "red", size: 12 },
            Item { colour: "red", size: 3 },
            Item { colour: "blue", size: 20 },
            Item { colour: "blue", size: 1 },
        ]
    }

    #[test]
    fn test_and_is_intersection() {
        let spec = Colour("red").and(Large);
        let matched: Vec<_> = spec.filter(items());

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].size, 12);
    }

    #[test]
    fn test_and_commutes() {
        for item in items() {
            assert_eq!(
                Colour("blue").and(Large).is_satisfied_by(&item),
                Large.and(Colour("blue")).is_satisfied_by(&item)
            );
        }
    }

    #[test]
    fn test_query_form_agrees_with_predicate() {
        let spec = Colour("blue").and(Large);
        let query = spec.to_query().unwrap();

        for item in items() {
            assert_eq!(spec.is_satisfied_by(&item), query.matches(&item));
        }
    }

    #[test]
    fn test_closure_spec_has_no_query_form_and_poisons_conjunction() {
        let small = FnSpecification::new(|item: &Item| item.size < 5);
        assert!(small.to_query().is_none());

        let spec = Colour("red").and(small);
        assert!(spec.to_query().is_none());
        assert_eq!(spec.filter(items()).len(), 1);
    }

    #[test]
    fn test_all_of() {
        let empty: AllOf<Item> = AllOf::new();
        assert!(items().iter().all(|item| empty.is_satisfied_by(item)));
        assert_eq!(empty.to_query(), Some(QueryFilter::And(vec![])));

        let spec: AllOf<Item> = AllOf::new().with(Colour("blue")).with(Large);
        assert_eq!(spec.len(), 2);
        let query = spec.to_query().unwrap();
        for item in items() {
            assert_eq!(spec.is_satisfied_by(&item), query.matches(&item));
        }
        assert_eq!(spec.filter(items()).len(), 1);
    }

    #[test]
    fn test_to_predicate() {
        let spec = Colour("red");
        let predicate = spec.to_predicate();
        assert_eq!(items().iter().filter(|item| predicate(item)).count(), 2);
    }

    #[test]
    fn test_boxed_and_borrowed_specs() {
        let boxed: Box<dyn Specification<Item>> = Box::new(Large);
        let borrowed = &boxed;
        assert!(borrowed.is_satisfied_by(&items()[0]));
        assert!(borrowed.to_query().is_some());
    }
}
