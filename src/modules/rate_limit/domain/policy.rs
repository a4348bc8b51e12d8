//! Sliding window with cool-down, evaluated per (user, action type).
//!
//! Rules, first match wins:
//! 1. no record: start a window with count 1, allow
//! 2. blocked and the block is still running: reject
//! 3. blocked and the block has expired: reset, allow
//! 4. window elapsed: reset, allow
//! 5. quota used up: block for the cool-down, reject
//! 6. otherwise: count + 1, allow

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::action_type::{ActionType, RateLimitRule};
use super::entities::RateLimitRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum RateLimitDecision {
    /// Action allowed; `record` must be persisted
    Allowed { record: RateLimitRecord },
    /// Action rejected; `record` is `Some` when the rejection changed state
    /// (a new block) and must be persisted
    Rejected {
        record: Option<RateLimitRecord>,
        retry_after_minutes: i64,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }

    /// State change to persist, if any
    pub fn record_to_save(&self) -> Option<&RateLimitRecord> {
        match self {
            RateLimitDecision::Allowed { record } => Some(record),
            RateLimitDecision::Rejected { record, .. } => record.as_ref(),
        }
    }
}

/// Whole minutes until `until`, rounded up, never below 1
pub fn minutes_until(until: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (until - now).num_seconds().max(0);
    ((seconds + 59) / 60).max(1)
}

pub fn evaluate(
    existing: Option<&RateLimitRecord>,
    user_id: Uuid,
    action_type: ActionType,
    rule: &RateLimitRule,
    now: DateTime<Utc>,
) -> RateLimitDecision {
    let Some(current) = existing else {
        return RateLimitDecision::Allowed {
            record: RateLimitRecord::start(user_id, action_type, now),
        };
    };

    let mut record = current.clone();

    if record.is_blocked {
        match record.blocked_until {
            Some(until) if now < until => {
                return RateLimitDecision::Rejected {
                    record: None,
                    retry_after_minutes: minutes_until(until, now),
                };
            }
            _ => {
                record.reset(now);
                return RateLimitDecision::Allowed { record };
            }
        }
    }

    if now - record.window_start > Duration::seconds(rule.window_seconds) {
        record.reset(now);
        return RateLimitDecision::Allowed { record };
    }

    if record.action_count >= rule.max_actions {
        let until = now + Duration::seconds(rule.block_seconds);
        record.is_blocked = true;
        record.blocked_until = Some(until);
        return RateLimitDecision::Rejected {
            record: Some(record),
            retry_after_minutes: minutes_until(until, now),
        };
    }

    record.action_count += 1;
    RateLimitDecision::Allowed { record }
}
