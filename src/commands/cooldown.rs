//! Per-command invocation cooldowns.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use poise::serenity_prelude::UserId;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownScope {
    /// Each user has their own window
    PerUser,
    /// One window shared by everyone
    Global,
}

/// One invocation allowed per `per`, bucketed by `scope`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    pub per: Duration,
    pub scope: CooldownScope,
}

impl Cooldown {
    #[must_use]
    pub const fn per_user(per: Duration) -> Self {
        Self {
            per,
            scope: CooldownScope::PerUser,
        }
    }

    #[must_use]
    pub const fn global(per: Duration) -> Self {
        Self {
            per,
            scope: CooldownScope::Global,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CooldownKey {
    command: String,
    user: Option<UserId>,
}

/// Next allowed invocation time per (command, user) bucket.
///
/// Entries whose instant has passed are inert and get overwritten on the
/// next successful acquire.
#[derive(Debug, Default)]
pub struct Cooldowns {
    next_allowed: Mutex<HashMap<CooldownKey, Instant>>,
}

impl Cooldowns {
    /// Claim the bucket for `command` at `now`.
    ///
    /// Returns the remaining wait when the bucket is still cooling down.
    pub fn try_acquire(
        &self,
        command: &str,
        cooldown: Cooldown,
        user: UserId,
        now: Instant,
    ) -> Result<(), Duration> {
        let key = CooldownKey {
            command: command.to_string(),
            user: match cooldown.scope {
                CooldownScope::PerUser => Some(user),
                CooldownScope::Global => None,
            },
        };

        // Check and set under one lock so concurrent invocations cannot both pass.
        let mut next_allowed = self
            .next_allowed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(&until) = next_allowed.get(&key)
            && now < until
        {
            return Err(until - now);
        }
        next_allowed.insert(key, now + cooldown.per);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN: Duration = Duration::from_secs(10);

    #[test]
    fn second_use_inside_window_reports_remaining() {
        let cooldowns = Cooldowns::default();
        let start = Instant::now();
        let user = UserId::new(1);

        assert!(cooldowns.try_acquire("scale", Cooldown::per_user(TEN), user, start).is_ok());
        let remaining = cooldowns
            .try_acquire("scale", Cooldown::per_user(TEN), user, start + Duration::from_secs(4))
            .expect_err("still cooling down");
        assert_eq!(remaining, Duration::from_secs(6));
    }

    #[test]
    fn expired_entries_do_not_block() {
        let cooldowns = Cooldowns::default();
        let start = Instant::now();
        let user = UserId::new(1);

        assert!(cooldowns.try_acquire("scale", Cooldown::per_user(TEN), user, start).is_ok());
        assert!(cooldowns.try_acquire("scale", Cooldown::per_user(TEN), user, start + TEN).is_ok());
        assert!(
            cooldowns
                .try_acquire("scale", Cooldown::per_user(TEN), user, start + TEN + Duration::from_secs(1))
                .is_err()
        );
    }

    #[test]
    fn per_user_buckets_are_independent() {
        let cooldowns = Cooldowns::default();
        let now = Instant::now();

        assert!(cooldowns.try_acquire("scale", Cooldown::per_user(TEN), UserId::new(1), now).is_ok());
        assert!(cooldowns.try_acquire("scale", Cooldown::per_user(TEN), UserId::new(2), now).is_ok());
        assert!(cooldowns.try_acquire("other", Cooldown::per_user(TEN), UserId::new(1), now).is_ok());
    }

    #[test]
    fn global_bucket_is_shared() {
        let cooldowns = Cooldowns::default();
        let now = Instant::now();

        assert!(cooldowns.try_acquire("scale", Cooldown::global(TEN), UserId::new(1), now).is_ok());
        assert!(cooldowns.try_acquire("scale", Cooldown::global(TEN), UserId::new(2), now).is_err());
    }

    #[test]
    fn rejected_attempts_do_not_extend_the_window() {
        let cooldowns = Cooldowns::default();
        let start = Instant::now();
        let user = UserId::new(1);

        assert!(cooldowns.try_acquire("scale", Cooldown::per_user(TEN), user, start).is_ok());
        assert!(
            cooldowns
                .try_acquire("scale", Cooldown::per_user(TEN), user, start + Duration::from_secs(9))
                .is_err()
        );
        assert!(cooldowns.try_acquire("scale", Cooldown::per_user(TEN), user, start + TEN).is_ok());
    }
}
