//! Motion-sensor permission gate.
//!
//! Some platforms require a user-gated grant before motion events flow.
//! The request resolves with unbounded latency; the banner is a pure
//! function of the latest known outcome, so no polling is needed.

use std::future::Future;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPermission {
    /// Platform delivers motion events without asking.
    NotRequired,
    /// Prompt available, not yet answered.
    Unknown,
    Granted,
    Denied,
}

/// Platform side of the permission prompt.
pub trait MotionPermissionProvider {
    /// Whether the platform exposes a permission request at all.
    fn requires_prompt(&self) -> bool;

    /// Ask the user. `Ok(true)` means granted.
    fn request(&self) -> impl Future<Output = Result<bool, CoreError>> + Send;
}

#[derive(Debug, Clone)]
pub struct PermissionGate {
    state: MotionPermission,
}

impl PermissionGate {
    pub fn new(requires_prompt: bool) -> Self {
        let state = if requires_prompt {
            MotionPermission::Unknown
        } else {
            MotionPermission::NotRequired
        };
        Self { state }
    }

    pub fn state(&self) -> MotionPermission {
        self.state
    }

    /// Show the "enable motion" banner.
    pub fn needs_prompt(&self) -> bool {
        matches!(self.state, MotionPermission::Unknown | MotionPermission::Denied)
    }

    /// Record an outcome. Returns an event only when the state changed.
    pub fn record(&mut self, permission: MotionPermission) -> Option<Event> {
        if self.state == permission {
            return None;
        }
        self.state = permission;
        Some(Event::PermissionChanged {
            permission,
            needs_prompt: self.needs_prompt(),
            at: Utc::now(),
        })
    }

    /// Run the provider's prompt. A failed request counts as a denial.
    pub async fn request<P: MotionPermissionProvider>(&mut self, provider: &P) -> Option<Event> {
        if !provider.requires_prompt() {
            return self.record(MotionPermission::NotRequired);
        }
        let outcome = match provider.request().await {
            Ok(true) => MotionPermission::Granted,
            Ok(false) => MotionPermission::Denied,
            Err(e) => {
                tracing::warn!(error = %e, "motion permission request failed");
                MotionPermission::Denied
            }
        };
        self.record(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Prompt {
        answer: Result<bool, String>,
        delay_ms: u64,
    }

    impl MotionPermissionProvider for Prompt {
        fn requires_prompt(&self) -> bool {
            true
        }

        async fn request(&self) -> Result<bool, CoreError> {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            self.answer.clone().map_err(CoreError::Permission)
        }
    }

    struct NoPrompt;

    impl MotionPermissionProvider for NoPrompt {
        fn requires_prompt(&self) -> bool {
            false
        }

        async fn request(&self) -> Result<bool, CoreError> {
            Ok(true)
        }
    }

    #[test]
    fn banner_follows_latest_outcome() {
        let mut gate = PermissionGate::new(true);
        assert!(gate.needs_prompt());
        gate.record(MotionPermission::Granted);
        assert!(!gate.needs_prompt());
        assert!(!PermissionGate::new(false).needs_prompt());
    }

    #[tokio::test]
    async fn grant_hides_banner() {
        let mut gate = PermissionGate::new(true);
        let event = gate
            .request(&Prompt {
                answer: Ok(true),
                delay_ms: 20,
            })
            .await;
        assert!(matches!(
            event,
            Some(Event::PermissionChanged {
                permission: MotionPermission::Granted,
                needs_prompt: false,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn failure_counts_as_denial() {
        let mut gate = PermissionGate::new(true);
        gate.request(&Prompt {
            answer: Err("user gesture required".into()),
            delay_ms: 0,
        })
        .await;
        assert_eq!(gate.state(), MotionPermission::Denied);
        assert!(gate.needs_prompt());
    }

    #[tokio::test]
    async fn platform_without_prompt_never_shows_banner() {
        let mut gate = PermissionGate::new(false);
        assert!(gate.request(&NoPrompt).await.is_none());
        assert_eq!(gate.state(), MotionPermission::NotRequired);
    }
}
