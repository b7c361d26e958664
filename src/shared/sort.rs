use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::query::FieldAccess;

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Ordering of a result set by one entity field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Stable in-place sort. Entities without the field, or with values of
    /// another kind, keep their relative order after the comparable ones.
    pub fn apply<T: FieldAccess>(&self, items: &mut [T]) {
        items.sort_by(|a, b| {
            let ordering = match (a.field(&self.field), b.field(&self.field)) {
                (Some(x), Some(y)) => match x.compare(&y) {
                    Some(ordering) => ordering,
                    None => return Ordering::Equal,
                },
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => return Ordering::Equal,
            };

            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}
