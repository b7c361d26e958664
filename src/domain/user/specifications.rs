use super::aggregate::User;
use crate::domain::value_objects::{Email, Role};
use crate::shared::{QueryFilter, Specification};

// ============================================================================
// User Specifications
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct UserByRole(pub Role);

impl Specification<User> for UserByRole {
    fn is_satisfied_by(&self, candidate: &User) -> bool {
        candidate.role() == self.0
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("role", self.0.as_str()))
    }
}

/// Same address, ignoring case
#[derive(Debug, Clone)]
pub struct UserByEmail(pub Email);

impl Specification<User> for UserByEmail {
    fn is_satisfied_by(&self, candidate: &User) -> bool {
        candidate.email() == &self.0
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("normalized_email", self.0.normalized()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotDeletedUsers;

impl Specification<User> for NotDeletedUsers {
    fn is_satisfied_by(&self, candidate: &User) -> bool {
        !candidate.is_deleted()
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("is_deleted", false))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UserByActiveFlag(pub bool);

impl Specification<User> for UserByActiveFlag {
    fn is_satisfied_by(&self, candidate: &User) -> bool {
        candidate.is_active() == self.0
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("is_active", self.0))
    }
}

/// Case-insensitive substring match on first name, last name or email
#[derive(Debug, Clone)]
pub struct UserSearch {
    term: String,
}

impl UserSearch {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }
}

impl Specification<User> for UserSearch {
    fn is_satisfied_by(&self, candidate: &User) -> bool {
        let needle = self.term.to_lowercase();
        [candidate.first_name(), candidate.last_name(), candidate.email().as_str()]
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(&needle))
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::Or(vec![
            QueryFilter::contains("first_name", self.term.as_str()),
            QueryFilter::contains("last_name", self.term.as_str()),
            QueryFilter::contains("email", self.term.as_str()),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::aggregate::tests::{at, register_command};
    use crate::domain::user::UserCommand;
    use crate::shared::{Aggregate, SpecificationExt};

    fn sample() -> Vec<User> {
        let admin = User::create(&register_command("Ada@Example.com", Role::Admin)).unwrap();
        let manager = User::create(&register_command("linus@example.com", Role::Manager)).unwrap();
        let mut deleted = User::create(&register_command("ghost@example.com", Role::User)).unwrap();
        deleted.execute(&UserCommand::Delete { at: at(1) }).unwrap();
        let mut inactive = User::create(&register_command("idle@example.com", Role::User)).unwrap();
        inactive.execute(&UserCommand::Deactivate { at: at(1) }).unwrap();
        vec![admin, manager, deleted, inactive]
    }

    #[test]
    fn test_predicate_and_query_agree() {
        let specs: Vec<Box<dyn Specification<User>>> = vec![
            Box::new(UserByRole(Role::User).and(NotDeletedUsers)),
            Box::new(UserByEmail(Email::parse("ADA@example.COM").unwrap())),
            Box::new(UserByActiveFlag(false)),
            Box::new(UserSearch::new("example.com")),
            Box::new(UserSearch::new("LINUS")),
        ];

        for spec in &specs {
            let query = spec.to_query().unwrap();
            for user in sample() {
                assert_eq!(spec.is_satisfied_by(&user), query.matches(&user), "{query}");
            }
        }
    }

    #[test]
    fn test_email_lookup_ignores_case() {
        let found = UserByEmail(Email::parse("ada@EXAMPLE.com").unwrap()).filter(sample());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].role(), Role::Admin);
    }

    #[test]
    fn test_not_deleted_excludes_soft_deleted() {
        let remaining = NotDeletedUsers.filter(sample());
        assert_eq!(remaining.len(), 3);
        assert!(remaining.iter().all(|u| !u.is_deleted()));
    }
}
