use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::action_type::ActionType;

/// Limiter state for one (user, action type) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action_type: ActionType,
    pub action_count: i32,
    pub window_start: DateTime<Utc>,
    pub is_blocked: bool,
    pub blocked_until: Option<DateTime<Utc>>,
}

impl RateLimitRecord {
    /// First action of a fresh window
    pub fn start(user_id: Uuid, action_type: ActionType, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            action_type,
            action_count: 1,
            window_start: now,
            is_blocked: false,
            blocked_until: None,
        }
    }

    /// Back to a fresh window, keeping the row identity
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.action_count = 1;
        self.window_start = now;
        self.is_blocked = false;
        self.blocked_until = None;
    }

    pub fn is_blocked_at(&self, now: DateTime<Utc>) -> bool {
        self.is_blocked && self.blocked_until.map_or(false, |until| now < until)
    }

    /// Nothing about this row matters after `before`: an unblocked window
    /// that started earlier, or a block that ended earlier
    pub fn is_stale(&self, before: DateTime<Utc>) -> bool {
        let window_over = !self.is_blocked && self.window_start < before;
        let block_over = self.blocked_until.is_some_and(|until| until < before);
        window_over || block_over
    }
}

/// Read-only view of a user's quota
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitStatus {
    pub action_type: ActionType,
    pub used: i32,
    pub remaining: i32,
    pub is_blocked: bool,
    pub retry_after_minutes: Option<i64>,
    pub window_resets_at: Option<DateTime<Utc>>,
}
