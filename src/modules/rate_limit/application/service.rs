use crate::modules::rate_limit::domain::{
    evaluate, policy::minutes_until, ActionType, RateLimitDecision, RateLimitRepository,
    RateLimitRule, RateLimitStatus,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::{log_debug, log_info};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Per-user action limiter backed by the `rate_limits` table
pub struct RateLimiter {
    repo: Arc<dyn RateLimitRepository>,
    rules: HashMap<ActionType, RateLimitRule>,
}

impl RateLimiter {
    pub fn new(repo: Arc<dyn RateLimitRepository>) -> Self {
        let rules = ActionType::ALL
            .iter()
            .map(|action| (*action, action.default_rule()))
            .collect();
        Self { repo, rules }
    }

    /// Replace the quota for one action type
    pub fn with_rule(mut self, action_type: ActionType, rule: RateLimitRule) -> Self {
        self.rules.insert(action_type, rule);
        self
    }

    pub fn rule(&self, action_type: ActionType) -> RateLimitRule {
        self.rules
            .get(&action_type)
            .copied()
            .unwrap_or_else(|| action_type.default_rule())
    }

    /// Records one action; `Err(RateLimitExceeded)` when it is not allowed
    pub async fn check_rate_limit(&self, user_id: &Uuid, action_type: ActionType) -> AppResult<()> {
        self.check_at(user_id, action_type, Utc::now()).await
    }

    pub async fn check_at(
        &self,
        user_id: &Uuid,
        action_type: ActionType,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let rule = self.rule(action_type);
        let existing = self.repo.find(user_id, action_type).await?;
        let decision = evaluate(existing.as_ref(), *user_id, action_type, &rule, now);

        if let Some(record) = decision.record_to_save() {
            self.repo.save(record).await?;
        }

        match decision {
            RateLimitDecision::Allowed { record } => {
                log_debug!(
                    "Rate limit ok: user={} action={} count={}/{}",
                    user_id,
                    action_type,
                    record.action_count,
                    rule.max_actions
                );
                Ok(())
            }
            RateLimitDecision::Rejected {
                record,
                retry_after_minutes,
            } => {
                let details = if record.is_some() {
                    format!("limit of {} reached, blocked", rule.max_actions)
                } else {
                    "attempt while blocked".to_string()
                };
                LogContext::suspicious_activity(
                    &user_id.to_string(),
                    action_type.as_str(),
                    &format!("{} ({} min left)", details, retry_after_minutes),
                );
                Err(AppError::rate_limited(
                    action_type.display_name(),
                    retry_after_minutes,
                ))
            }
        }
    }

    /// Current quota without consuming an action
    pub async fn status(&self, user_id: &Uuid, action_type: ActionType) -> AppResult<RateLimitStatus> {
        self.status_at(user_id, action_type, Utc::now()).await
    }

    pub async fn status_at(
        &self,
        user_id: &Uuid,
        action_type: ActionType,
        now: DateTime<Utc>,
    ) -> AppResult<RateLimitStatus> {
        let rule = self.rule(action_type);
        let record = self.repo.find(user_id, action_type).await?;

        let status = match record {
            Some(record) if record.is_blocked_at(now) => RateLimitStatus {
                action_type,
                used: record.action_count,
                remaining: 0,
                is_blocked: true,
                retry_after_minutes: record.blocked_until.map(|until| minutes_until(until, now)),
                window_resets_at: record.blocked_until,
            },
            Some(record)
                if !record.is_blocked
                    && now - record.window_start <= Duration::seconds(rule.window_seconds) =>
            {
                RateLimitStatus {
                    action_type,
                    used: record.action_count,
                    remaining: (rule.max_actions - record.action_count).max(0),
                    is_blocked: false,
                    retry_after_minutes: None,
                    window_resets_at: Some(
                        record.window_start + Duration::seconds(rule.window_seconds),
                    ),
                }
            }
            // no record, expired window or expired block: the next action starts fresh
            _ => RateLimitStatus {
                action_type,
                used: 0,
                remaining: rule.max_actions,
                is_blocked: false,
                retry_after_minutes: None,
                window_resets_at: None,
            },
        };

        Ok(status)
    }

    /// Clears a user's state for one action type (admin tool)
    pub async fn reset(&self, user_id: &Uuid, action_type: ActionType) -> AppResult<bool> {
        let removed = self.repo.delete(user_id, action_type).await?;
        if removed {
            log_info!("Rate limit reset: user={} action={}", user_id, action_type);
        }
        Ok(removed)
    }

    /// Drops windows and blocks that ended more than a day ago; intended for
    /// periodic cleanup
    pub async fn cleanup(&self) -> AppResult<usize> {
        let cutoff = Utc::now() - Duration::hours(24);
        let removed = self.repo.delete_stale(cutoff).await?;
        log_debug!("Rate limit cleanup removed {} rows", removed);
        Ok(removed)
    }
}
