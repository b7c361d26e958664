use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Declarative Query Filters
// ============================================================================
//
// A storage-neutral description of a filter: (field, operator, value)
// conditions joined by AND / OR. A repository can translate it into its own
// query language; `QueryFilter::matches` evaluates it in memory with the same
// semantics so both paths can be checked against each other.
//
// A condition on a field the entity does not expose never matches, for every
// operator (SQL NULL semantics).
//
// ============================================================================

/// A typed value of an entity field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Compare two values of the same kind; values of different kinds are unordered
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => Some(a.cmp(b)),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(v) => write!(f, "'{v}'"),
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Uuid(v) => write!(f, "{v}"),
            FieldValue::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

/// Exposes entity fields by name to query filters and sorting
pub trait FieldAccess {
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Comparison operator of a filter condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Case-insensitive substring match; text fields only
    ContainsIgnoreCase,
}

impl Operator {
    fn evaluate(self, actual: &FieldValue, expected: &FieldValue) -> bool {
        match self {
            Operator::Eq => actual == expected,
            Operator::Ne => actual != expected,
            Operator::Lt => actual.compare(expected) == Some(Ordering::Less),
            Operator::Le => matches!(actual.compare(expected), Some(Ordering::Less | Ordering::Equal)),
            Operator::Gt => actual.compare(expected) == Some(Ordering::Greater),
            Operator::Ge => {
                matches!(actual.compare(expected), Some(Ordering::Greater | Ordering::Equal))
            }
            Operator::ContainsIgnoreCase => match (actual, expected) {
                (FieldValue::Text(haystack), FieldValue::Text(needle)) => {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::ContainsIgnoreCase => "ILIKE",
        }
    }
}

/// Storage-neutral filter tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryFilter {
    Compare {
        field: String,
        op: Operator,
        value: FieldValue,
    },
    And(Vec<QueryFilter>),
    Or(Vec<QueryFilter>),
}

impl QueryFilter {
    pub fn compare(field: impl Into<String>, op: Operator, value: impl Into<FieldValue>) -> Self {
        QueryFilter::Compare {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::compare(field, Operator::Eq, value)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::compare(field, Operator::ContainsIgnoreCase, FieldValue::Text(value.into()))
    }

    /// Conjunction that flattens nested `And` nodes
    pub fn and(self, other: QueryFilter) -> Self {
        let mut parts = Vec::new();
        for filter in [self, other] {
            match filter {
                QueryFilter::And(inner) => parts.extend(inner),
                other => parts.push(other),
            }
        }
        QueryFilter::And(parts)
    }

    /// Evaluate the filter against an entity in memory
    ///
    /// An empty `And` matches everything, an empty `Or` matches nothing.
    pub fn matches<T: FieldAccess + ?Sized>(&self, entity: &T) -> bool {
        match self {
            QueryFilter::Compare { field, op, value } => entity
                .field(field)
                .is_some_and(|actual| op.evaluate(&actual, value)),
            QueryFilter::And(parts) => parts.iter().all(|part| part.matches(entity)),
            QueryFilter::Or(parts) => parts.iter().any(|part| part.matches(entity)),
        }
    }
}

impl fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryFilter::Compare { field, op, value } => {
                write!(f, "{field} {} {value}", op.symbol())
            }
            QueryFilter::And(parts) if parts.is_empty() => f.write_str("TRUE"),
            QueryFilter::Or(parts) if parts.is_empty() => f.write_str("FALSE"),
            QueryFilter::And(parts) | QueryFilter::Or(parts) => {
                let joiner = if matches!(self, QueryFilter::And(_)) { " AND " } else { " OR " };
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(joiner)?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        stock: i64,
        active: bool,
    }

    impl FieldAccess for Row {
        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "name" => Some(self.name.into()),
                "stock" => Some(self.stock.into()),
                "active" => Some(self.active.into()),
                _ => None,
            }
        }
    }

    fn row() -> Row {
        Row { name: "Espresso Machine", stock: 4, active: true }
    }

    #[test]
    fn test_compare_operators() {
        let r = row();
        assert!(QueryFilter::equals("stock", 4i64).matches(&r));
        assert!(QueryFilter::compare("stock", Operator::Lt, 5i64).matches(&r));
        assert!(QueryFilter::compare("stock", Operator::Le, 4i64).matches(&r));
        assert!(!QueryFilter::compare("stock", Operator::Gt, 4i64).matches(&r));
        assert!(QueryFilter::compare("stock", Operator::Ge, 4i64).matches(&r));
        assert!(QueryFilter::compare("active", Operator::Ne, false).matches(&r));
    }

    #[test]
    fn test_text_equality_is_case_sensitive() {
        assert!(!QueryFilter::equals("name", "espresso machine").matches(&row()));
        assert!(QueryFilter::contains("name", "ESPRESSO").matches(&row()));
    }

    #[test]
    fn test_missing_field_never_matches() {
        assert!(!QueryFilter::equals("colour", "red").matches(&row()));
        assert!(!QueryFilter::compare("colour", Operator::Ne, "red").matches(&row()));
    }

    #[test]
    fn test_mismatched_kinds_are_unordered() {
        assert!(!QueryFilter::compare("stock", Operator::Lt, "9").matches(&row()));
    }

    #[test]
    fn test_and_flattens_and_or_evaluates() {
        let filter = QueryFilter::equals("active", true)
            .and(QueryFilter::equals("stock", 4i64))
            .and(QueryFilter::Or(vec![
                QueryFilter::contains("name", "grinder"),
                QueryFilter::contains("name", "machine"),
            ]));

        match &filter {
            QueryFilter::And(parts) => assert_eq!(parts.len(), 3),
            other => panic!("expected And, got {other:?}"),
        }
        assert!(filter.matches(&row()));
    }

    #[test]
    fn test_empty_groups() {
        assert!(QueryFilter::And(vec![]).matches(&row()));
        assert!(!QueryFilter::Or(vec![]).matches(&row()));
    }

    #[test]
    fn test_display() {
        let filter = QueryFilter::equals("active", true).and(QueryFilter::contains("name", "mac"));
        assert_eq!(filter.to_string(), "(active = true AND name ILIKE 'mac')");
    }
}
