use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::aggregate::User;
use super::commands::{RegisterUser, UserCommand};
use super::errors::UserError;
use super::filter::UserFilter;
use super::value_objects::LoginOutcome;
use crate::config::{LockoutPolicy, PaginationConfig};
use crate::domain::value_objects::{Email, Role};
use crate::domain::workflow::{add_new, execute_and_save, fetch_page, load};
use crate::error::{DomainError, Outcome};
use crate::metrics::Metrics;
use crate::notifications::{EmailMessage, EmailSender};
use crate::shared::PagedResult;
use crate::store::{Entity, Repository};

// ============================================================================
// User Service
// ============================================================================
//
// Email uniqueness is the repository's job: `register` and `change_email`
// surface its conflict unchanged. Notification failures are logged and never
// fail the operation that triggered them.
//
// ============================================================================

/// Raw input for a new user account
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Defaults to `User`
    pub role: Option<String>,
}

pub struct UserService {
    repository: Arc<dyn Repository<User>>,
    email_sender: Arc<dyn EmailSender>,
    metrics: Arc<Metrics>,
    lockout: LockoutPolicy,
    pagination: PaginationConfig,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn Repository<User>>,
        email_sender: Arc<dyn EmailSender>,
        metrics: Arc<Metrics>,
        lockout: LockoutPolicy,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            repository,
            email_sender,
            metrics,
            lockout,
            pagination,
        }
    }

    pub async fn register(&self, input: NewUser) -> Outcome<User> {
        let user = Self::build(input).inspect_err(|e| self.reject(e))?;
        let user = add_new(self.repository.as_ref(), &self.metrics, user, "UserRegistered").await?;

        self.notify(EmailMessage::new(
            user.email().clone(),
            "Welcome",
            format!("Hello {}, your account has been created.", user.first_name()),
        ))
        .await;

        Ok(user)
    }

    pub async fn get(&self, id: Uuid) -> Outcome<User> {
        load(self.repository.as_ref(), id).await
    }

    pub async fn list(&self, filter: &UserFilter) -> Outcome<PagedResult<User>> {
        let (sort, request) = filter
            .sort()
            .map_err(DomainError::from)
            .and_then(|sort| Ok((sort, filter.page_request(&self.pagination)?)))
            .inspect_err(|e| self.reject(e))?;

        let spec = filter.specification();
        fetch_page(self.repository.as_ref(), &self.metrics, &spec, &sort, request).await
    }

    pub async fn record_login(&self, id: Uuid, success: bool) -> Outcome<LoginOutcome> {
        self.record_login_at(id, success, Utc::now()).await
    }

    /// Record a login attempt made at `at`. A lockout triggered by this
    /// attempt sends a notification email to the account.
    pub async fn record_login_at(
        &self,
        id: Uuid,
        success: bool,
        at: DateTime<Utc>,
    ) -> Outcome<LoginOutcome> {
        let command = UserCommand::RecordLogin {
            success,
            at,
            policy: self.lockout,
        };

        let (user, events) =
            match execute_and_save(self.repository.as_ref(), &self.metrics, id, &command).await {
                Ok(result) => result,
                Err(e) => {
                    self.metrics.record_login("rejected");
                    return Err(e);
                }
            };

        let outcome = LoginOutcome::from_events(&events, &self.lockout)
            .ok_or_else(|| DomainError::from(UserError::NotInitialized))?;
        self.metrics.record_login(outcome.label());

        if let LoginOutcome::LockedOut { until } = outcome {
            self.metrics.record_lockout();
            tracing::warn!(user_id = %id, until = %until, "Account locked after failed logins");

            self.notify(EmailMessage::new(
                user.email().clone(),
                "Your account has been locked",
                format!(
                    "Hello {}, after {} failed sign-in attempts your account is locked until {}.",
                    user.first_name(),
                    self.lockout.max_failed_attempts,
                    until.to_rfc3339()
                ),
            ))
            .await;
        }

        Ok(outcome)
    }

    pub async fn change_role(&self, id: Uuid, role: Role) -> Outcome<User> {
        self.execute(id, UserCommand::ChangeRole { role, at: Utc::now() })
            .await
    }

    pub async fn change_email(&self, id: Uuid, email: &str) -> Outcome<User> {
        let email = Email::parse(email)
            .map_err(DomainError::from)
            .inspect_err(|e| self.reject(e))?;
        self.execute(id, UserCommand::ChangeEmail { email, at: Utc::now() })
            .await
    }

    pub async fn update_profile(&self, id: Uuid, first_name: String, last_name: String) -> Outcome<User> {
        self.execute(
            id,
            UserCommand::UpdateProfile {
                first_name,
                last_name,
                at: Utc::now(),
            },
        )
        .await
    }

    pub async fn deactivate(&self, id: Uuid) -> Outcome<User> {
        self.execute(id, UserCommand::Deactivate { at: Utc::now() })
            .await
    }

    pub async fn reactivate(&self, id: Uuid) -> Outcome<User> {
        self.execute(id, UserCommand::Reactivate { at: Utc::now() })
            .await
    }

    /// Soft delete; the account stays stored but rejects every later command
    pub async fn delete(&self, id: Uuid) -> Outcome<User> {
        self.execute(id, UserCommand::Delete { at: Utc::now() })
            .await
    }

    pub async fn unlock(&self, id: Uuid) -> Outcome<User> {
        self.execute(id, UserCommand::Unlock { at: Utc::now() })
            .await
    }

    async fn execute(&self, id: Uuid, command: UserCommand) -> Outcome<User> {
        let (user, _) =
            execute_and_save(self.repository.as_ref(), &self.metrics, id, &command).await?;
        Ok(user)
    }

    async fn notify(&self, message: EmailMessage) {
        let recipient = message.to.clone();
        let subject = message.subject.clone();

        if let Err(e) = self.email_sender.send(message).await {
            tracing::warn!(to = %recipient, subject = %subject, error = %e, "Failed to send email");
        }
    }

    fn build(input: NewUser) -> Outcome<User> {
        let role = match input.role.as_deref() {
            Some(raw) => Role::parse(raw)?,
            None => Role::User,
        };
        let command = RegisterUser {
            user_id: Uuid::new_v4(),
            email: Email::parse(&input.email)?,
            first_name: input.first_name,
            last_name: input.last_name,
            role,
            at: Utc::now(),
        };
        Ok(User::create(&command)?)
    }

    fn reject(&self, error: &DomainError) {
        self.metrics.record_failure(User::NAME, error);
        tracing::warn!(entity = User::NAME, error = %error, "User input rejected");
    }
}
