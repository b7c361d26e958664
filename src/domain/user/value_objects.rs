use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::events::UserEvent;
use crate::config::LockoutPolicy;

// ============================================================================
// User Value Objects
// ============================================================================

/// Result of a recorded login attempt that the account accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginOutcome {
    Succeeded,
    Failed { remaining_attempts: u32 },
    /// This failure reached the threshold and locked the account
    LockedOut { until: DateTime<Utc> },
}

impl LoginOutcome {
    /// Read the outcome of a login from the events it produced
    pub fn from_events(events: &[UserEvent], policy: &LockoutPolicy) -> Option<Self> {
        let mut outcome = None;
        for event in events {
            match event {
                UserEvent::LockedOut(e) => return Some(LoginOutcome::LockedOut { until: e.until }),
                UserEvent::LoginFailed(e) => {
                    outcome = Some(LoginOutcome::Failed {
                        remaining_attempts: policy
                            .max_failed_attempts
                            .saturating_sub(e.failed_attempts),
                    });
                }
                UserEvent::LoginSucceeded(_) => outcome = Some(LoginOutcome::Succeeded),
                _ => {}
            }
        }
        outcome
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoginOutcome::Succeeded => "succeeded",
            LoginOutcome::Failed { .. } => "failed",
            LoginOutcome::LockedOut { .. } => "locked_out",
        }
    }
}
