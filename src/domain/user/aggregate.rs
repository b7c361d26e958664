use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::commands::{RegisterUser, UserCommand};
use super::errors::UserError;
use super::events::*;
use super::value_objects::LoginOutcome;
use crate::config::LockoutPolicy;
use crate::domain::value_objects::{required_text, Email, Role};
use crate::shared::{Aggregate, FieldAccess, FieldValue};
use crate::store::Entity;

pub const USER_NAME_MAX_LEN: usize = 100;

// ============================================================================
// User Aggregate - Business Logic
// ============================================================================
//
// Account lifecycle: active ⇄ inactive, and a one-way soft delete. A deleted
// account rejects every command.
//
// Login lockout: each failed attempt increments the counter; the attempt
// that reaches the policy threshold locks the account until
// `at + lockout duration` and resets the counter. While locked, attempts are
// rejected without touching the account.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    user_id: Uuid,
    version: i64,
    email: Email,
    first_name: String,
    last_name: String,
    role: Role,
    failed_login_attempts: u32,
    lockout_end: Option<DateTime<Utc>>,
    last_login: Option<DateTime<Utc>>,
    is_active: bool,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    pub fn create(command: &RegisterUser) -> Result<Self, UserError> {
        let event = UserEvent::Registered(UserRegistered {
            user_id: command.user_id,
            email: command.email.clone(),
            first_name: required_text("first_name", &command.first_name, USER_NAME_MAX_LEN)?,
            last_name: required_text("last_name", &command.last_name, USER_NAME_MAX_LEN)?,
            role: command.role,
            at: command.at,
        });
        Self::apply_first_event(&event)
    }

    /// Record a login attempt made at `at`
    pub fn record_login(
        &mut self,
        success: bool,
        at: DateTime<Utc>,
        policy: LockoutPolicy,
    ) -> Result<LoginOutcome, UserError> {
        let events = self.execute(&UserCommand::RecordLogin { success, at, policy })?;
        LoginOutcome::from_events(&events, &policy).ok_or(UserError::NotInitialized)
    }

    pub fn id(&self) -> Uuid {
        self.user_id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn failed_login_attempts(&self) -> u32 {
        self.failed_login_attempts
    }

    pub fn lockout_end(&self) -> Option<DateTime<Utc>> {
        self.lockout_end
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether a lockout is still running at `at`
    pub fn is_locked_out(&self, at: DateTime<Utc>) -> bool {
        self.lockout_end.is_some_and(|end| end > at)
    }

    fn validate_not_deleted(&self) -> Result<(), UserError> {
        if self.is_deleted {
            Err(UserError::Deleted)
        } else {
            Ok(())
        }
    }

    fn handle_login(
        &self,
        success: bool,
        at: DateTime<Utc>,
        policy: &LockoutPolicy,
    ) -> Result<Vec<UserEvent>, UserError> {
        if !self.is_active {
            return Err(UserError::Inactive);
        }
        if let Some(until) = self.lockout_end.filter(|end| *end > at) {
            return Err(UserError::LockedOut { until });
        }

        if success {
            return Ok(vec![UserEvent::LoginSucceeded(UserLoginSucceeded { at })]);
        }

        let failed_attempts = self.failed_login_attempts.saturating_add(1);
        let mut events = vec![UserEvent::LoginFailed(UserLoginFailed { failed_attempts, at })];
        if failed_attempts >= policy.max_failed_attempts {
            events.push(UserEvent::LockedOut(UserLockedOut {
                until: at + policy.lockout_duration(),
                at,
            }));
        }
        Ok(events)
    }
}

impl Aggregate for User {
    type Event = UserEvent;
    type Command = UserCommand;
    type Error = UserError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            UserEvent::Registered(e) => Ok(Self {
                user_id: e.user_id,
                version: 1,
                email: e.email.clone(),
                first_name: e.first_name.clone(),
                last_name: e.last_name.clone(),
                role: e.role,
                failed_login_attempts: 0,
                lockout_end: None,
                last_login: None,
                is_active: true,
                is_deleted: false,
                created_at: e.at,
                updated_at: e.at,
            }),
            _ => Err(UserError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            UserEvent::Registered(_) => {
                // Already applied in apply_first_event
            }
            UserEvent::LoginSucceeded(e) => {
                self.failed_login_attempts = 0;
                self.lockout_end = None;
                self.last_login = Some(e.at);
            }
            UserEvent::LoginFailed(e) => {
                self.failed_login_attempts = e.failed_attempts;
            }
            UserEvent::LockedOut(e) => {
                self.lockout_end = Some(e.until);
                self.failed_login_attempts = 0;
                self.updated_at = e.at;
            }
            UserEvent::Unlocked(e) => {
                self.lockout_end = None;
                self.failed_login_attempts = 0;
                self.updated_at = e.at;
            }
            UserEvent::ProfileUpdated(e) => {
                self.first_name = e.first_name.clone();
                self.last_name = e.last_name.clone();
                self.updated_at = e.at;
            }
            UserEvent::EmailChanged(e) => {
                self.email = e.new_email.clone();
                self.updated_at = e.at;
            }
            UserEvent::RoleChanged(e) => {
                self.role = e.new_role;
                self.updated_at = e.at;
            }
            UserEvent::Deactivated(e) => {
                self.is_active = false;
                self.updated_at = e.at;
            }
            UserEvent::Reactivated(e) => {
                self.is_active = true;
                self.updated_at = e.at;
            }
            UserEvent::Deleted(e) => {
                self.is_deleted = true;
                self.is_active = false;
                self.updated_at = e.at;
            }
        }

        self.version += 1;
        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        self.validate_not_deleted()?;

        match command {
            UserCommand::RecordLogin { success, at, policy } => self.handle_login(*success, *at, policy),

            UserCommand::Unlock { at } => {
                if self.lockout_end.is_none() && self.failed_login_attempts == 0 {
                    return Ok(vec![]);
                }
                Ok(vec![UserEvent::Unlocked(UserUnlocked { at: *at })])
            }

            UserCommand::UpdateProfile {
                first_name,
                last_name,
                at,
            } => Ok(vec![UserEvent::ProfileUpdated(UserProfileUpdated {
                first_name: required_text("first_name", first_name, USER_NAME_MAX_LEN)?,
                last_name: required_text("last_name", last_name, USER_NAME_MAX_LEN)?,
                at: *at,
            })]),

            UserCommand::ChangeEmail { email, at } => {
                // Equality ignores case, so a re-cased address is still a change of display
                if self.email.as_str() == email.as_str() {
                    return Ok(vec![]);
                }
                Ok(vec![UserEvent::EmailChanged(UserEmailChanged {
                    old_email: self.email.clone(),
                    new_email: email.clone(),
                    at: *at,
                })])
            }

            UserCommand::ChangeRole { role, at } => {
                if self.role == *role {
                    return Ok(vec![]);
                }
                Ok(vec![UserEvent::RoleChanged(UserRoleChanged {
                    old_role: self.role,
                    new_role: *role,
                    at: *at,
                })])
            }

            UserCommand::Deactivate { at } => {
                if !self.is_active {
                    return Ok(vec![]);
                }
                Ok(vec![UserEvent::Deactivated(UserDeactivated { at: *at })])
            }

            UserCommand::Reactivate { at } => {
                if self.is_active {
                    return Ok(vec![]);
                }
                Ok(vec![UserEvent::Reactivated(UserReactivated { at: *at })])
            }

            UserCommand::Delete { at } => Ok(vec![UserEvent::Deleted(UserDeleted { at: *at })]),
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.user_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl FieldAccess for User {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.user_id.into(),
            "email" => self.email.as_str().into(),
            "normalized_email" => self.email.normalized().into(),
            "first_name" => self.first_name.as_str().into(),
            "last_name" => self.last_name.as_str().into(),
            "role" => self.role.as_str().into(),
            "failed_login_attempts" => self.failed_login_attempts.into(),
            "last_login" => self.last_login?.into(),
            "is_active" => self.is_active.into(),
            "is_deleted" => self.is_deleted.into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

impl Entity for User {
    const NAME: &'static str = "User";

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("email", self.email.normalized().to_string())]
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    pub(crate) fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap() + Duration::minutes(minute)
    }

    pub(crate) fn register_command(email: &str, role: Role) -> RegisterUser {
        RegisterUser {
            user_id: Uuid::new_v4(),
            email: Email::parse(email).unwrap(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            role,
            at: at(0),
        }
    }

    pub(crate) fn create_test_user() -> User {
        User::create(&register_command("grace@example.com", Role::User)).unwrap()
    }

    fn policy() -> LockoutPolicy {
        LockoutPolicy {
            max_failed_attempts: 3,
            lockout_minutes: 15,
        }
    }

    #[test]
    fn test_registration() {
        let user = create_test_user();

        assert!(user.is_active());
        assert!(!user.is_deleted());
        assert_eq!(user.failed_login_attempts(), 0);
        assert_eq!(user.last_login(), None);
        assert_eq!(user.unique_keys(), vec![("email", "grace@example.com".to_string())]);
    }

    #[test]
    fn test_successful_login_resets_attempts() {
        let mut user = create_test_user();
        user.record_login(false, at(1), policy()).unwrap();
        assert_eq!(user.failed_login_attempts(), 1);

        let outcome = user.record_login(true, at(2), policy()).unwrap();
        assert_eq!(outcome, LoginOutcome::Succeeded);
        assert_eq!(user.failed_login_attempts(), 0);
        assert_eq!(user.last_login(), Some(at(2)));
        assert_eq!(user.lockout_end(), None);
    }

    #[test]
    fn test_lockout_at_threshold() {
        let mut user = create_test_user();

        assert_eq!(
            user.record_login(false, at(1), policy()).unwrap(),
            LoginOutcome::Failed { remaining_attempts: 2 }
        );
        assert_eq!(
            user.record_login(false, at(2), policy()).unwrap(),
            LoginOutcome::Failed { remaining_attempts: 1 }
        );
        assert_eq!(
            user.record_login(false, at(3), policy()).unwrap(),
            LoginOutcome::LockedOut { until: at(18) }
        );

        assert_eq!(user.lockout_end(), Some(at(18)));
        assert_eq!(user.failed_login_attempts(), 0);
        assert!(user.is_locked_out(at(17)));
        assert!(!user.is_locked_out(at(18)));
    }

    #[test]
    fn test_attempts_while_locked_change_nothing() {
        let mut user = create_test_user();
        for minute in 1..=3 {
            user.record_login(false, at(minute), policy()).unwrap();
        }
        let snapshot = user.clone();

        for success in [true, false] {
            assert_eq!(
                user.record_login(success, at(10), policy()),
                Err(UserError::LockedOut { until: at(18) })
            );
        }
        assert_eq!(user, snapshot);
    }

    #[test]
    fn test_login_allowed_after_lockout_expires() {
        let mut user = create_test_user();
        for minute in 1..=3 {
            user.record_login(false, at(minute), policy()).unwrap();
        }

        let outcome = user.record_login(true, at(18), policy()).unwrap();
        assert_eq!(outcome, LoginOutcome::Succeeded);
        assert_eq!(user.lockout_end(), None);
    }

    #[test]
    fn test_inactive_user_cannot_log_in() {
        let mut user = create_test_user();
        user.execute(&UserCommand::Deactivate { at: at(1) }).unwrap();

        assert_eq!(user.record_login(true, at(2), policy()), Err(UserError::Inactive));
        assert_eq!(user.last_login(), None);
    }

    #[test]
    fn test_deleted_user_rejects_login_and_reactivation() {
        let mut user = create_test_user();
        user.execute(&UserCommand::Delete { at: at(1) }).unwrap();
        let snapshot = user.clone();

        assert_eq!(user.record_login(true, at(2), policy()), Err(UserError::Deleted));
        assert_eq!(
            user.execute(&UserCommand::Reactivate { at: at(2) }),
            Err(UserError::Deleted)
        );
        assert_eq!(user.execute(&UserCommand::Delete { at: at(3) }), Err(UserError::Deleted));
        assert_eq!(
            UserError::Deleted.kind(),
            crate::error::ErrorKind::InvariantViolation
        );
        assert_eq!(user, snapshot);
        assert!(!user.is_active());
    }

    #[test]
    fn test_unlock_clears_lockout() {
        let mut user = create_test_user();
        for minute in 1..=3 {
            user.record_login(false, at(minute), policy()).unwrap();
        }

        user.execute(&UserCommand::Unlock { at: at(4) }).unwrap();
        assert!(!user.is_locked_out(at(4)));

        let events = user.execute(&UserCommand::Unlock { at: at(5) }).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_change_role_and_email() {
        let mut user = create_test_user();
        user.execute(&UserCommand::ChangeRole { role: Role::Manager, at: at(1) }).unwrap();
        assert_eq!(user.role(), Role::Manager);

        let events = user
            .execute(&UserCommand::ChangeRole { role: Role::Manager, at: at(2) })
            .unwrap();
        assert!(events.is_empty());

        user.execute(&UserCommand::ChangeEmail {
            email: Email::parse("g.hopper@navy.mil").unwrap(),
            at: at(3),
        })
        .unwrap();
        assert_eq!(user.email().as_str(), "g.hopper@navy.mil");
        assert_eq!(user.field("normalized_email"), Some(FieldValue::Text("g.hopper@navy.mil".to_string())));
    }
}
