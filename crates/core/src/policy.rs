//! Subscription policy.
//!
//! Whether a user may run paid features is decided by an injected policy
//! rather than a constant, so environments can switch enforcement on or off.

use std::collections::HashSet;

use kasboek_shared::config::BookkeepingConfig;
use kasboek_shared::types::UserId;

/// Decides whether a user has an active subscription.
pub trait SubscriptionPolicy: Send + Sync {
    /// Returns true if the user may use subscription features.
    fn is_active(&self, user: UserId) -> bool;
}

/// Policy backed by configuration: either everyone, or a fixed set of users.
#[derive(Debug, Clone, Default)]
pub struct StaticSubscriptionPolicy {
    enforce: bool,
    subscribers: HashSet<UserId>,
}

impl StaticSubscriptionPolicy {
    /// Every user counts as subscribed.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Only the given users count as subscribed.
    #[must_use]
    pub fn only(subscribers: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            enforce: true,
            subscribers: subscribers.into_iter().collect(),
        }
    }
}

impl From<&BookkeepingConfig> for StaticSubscriptionPolicy {
    fn from(config: &BookkeepingConfig) -> Self {
        if config.enforce_subscription {
            Self::only(config.active_subscribers.iter().copied().map(UserId::from_uuid))
        } else {
            Self::allow_all()
        }
    }
}

impl SubscriptionPolicy for StaticSubscriptionPolicy {
    fn is_active(&self, user: UserId) -> bool {
        !self.enforce || self.subscribers.contains(&user)
    }
}
