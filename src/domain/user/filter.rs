use serde::{Deserialize, Serialize};

use super::aggregate::User;
use super::specifications::*;
use crate::config::PaginationConfig;
use crate::domain::value_objects::{Role, ValidationError};
use crate::domain::workflow::{resolve_sort, search_term};
use crate::shared::{AllOf, PageRequest, PaginationError, SortSpec};

pub const USER_SORT_FIELDS: [&str; 6] = [
    "email",
    "first_name",
    "last_name",
    "role",
    "created_at",
    "last_login",
];

// ============================================================================
// User List Filter
// ============================================================================

/// Soft-deleted users are left out unless `include_deleted` is set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub include_deleted: bool,
    pub sort_by: Option<String>,
    pub sort_descending: bool,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl UserFilter {
    pub fn specification(&self) -> AllOf<User> {
        let mut spec = AllOf::new();
        if !self.include_deleted {
            spec.push(NotDeletedUsers);
        }
        if let Some(term) = search_term(self.search.as_deref()) {
            spec.push(UserSearch::new(term));
        }
        if let Some(role) = self.role {
            spec.push(UserByRole(role));
        }
        if let Some(is_active) = self.is_active {
            spec.push(UserByActiveFlag(is_active));
        }
        spec
    }

    pub fn sort(&self) -> Result<SortSpec, ValidationError> {
        resolve_sort(self.sort_by.as_deref(), self.sort_descending, &USER_SORT_FIELDS, "email")
    }

    pub fn page_request(&self, config: &PaginationConfig) -> Result<PageRequest, PaginationError> {
        PageRequest::from_parts(
            self.page_number,
            self.page_size,
            config.default_page_size,
            config.max_page_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deleted_users_hidden_by_default() {
        let filter = UserFilter::default();
        assert_eq!(filter.specification().len(), 1);

        let with_deleted = UserFilter { include_deleted: true, ..Default::default() };
        assert!(with_deleted.specification().is_empty());
    }

    #[test]
    fn test_role_is_case_sensitive() {
        let ok: UserFilter = serde_json::from_str(r#"{"role": "Manager"}"#).unwrap();
        assert_eq!(ok.role, Some(Role::Manager));

        assert!(serde_json::from_str::<UserFilter>(r#"{"role": "manager"}"#).is_err());
    }
}
