use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::AppError;

/// Fixed cool-down applied once a window's quota is exhausted
pub const BLOCK_DURATION_SECS: i64 = 60 * 60;

const HOUR_SECS: i64 = 60 * 60;

/// User actions subject to per-user limiting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Comment,
    Rating,
    ProfileUpdate,
    Registration,
}

impl ActionType {
    pub const ALL: [ActionType; 4] = [
        ActionType::Comment,
        ActionType::Rating,
        ActionType::ProfileUpdate,
        ActionType::Registration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Comment => "comment",
            ActionType::Rating => "rating",
            ActionType::ProfileUpdate => "profile_update",
            ActionType::Registration => "registration",
        }
    }

    /// Wording used in user-facing rejection messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ActionType::Comment => "comment",
            ActionType::Rating => "rating",
            ActionType::ProfileUpdate => "profile update",
            ActionType::Registration => "registration",
        }
    }

    pub fn default_rule(&self) -> RateLimitRule {
        match self {
            ActionType::Comment => RateLimitRule::new(30, HOUR_SECS),
            ActionType::Rating => RateLimitRule::new(50, HOUR_SECS),
            ActionType::ProfileUpdate => RateLimitRule::new(10, HOUR_SECS),
            ActionType::Registration => RateLimitRule::new(3, HOUR_SECS),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comment" => Ok(ActionType::Comment),
            "rating" => Ok(ActionType::Rating),
            "profile_update" => Ok(ActionType::ProfileUpdate),
            "registration" => Ok(ActionType::Registration),
            other => Err(AppError::InvalidInput(format!(
                "Unknown action type '{}'",
                other
            ))),
        }
    }
}

/// Quota for one action type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    /// Maximum allowed actions per window
    pub max_actions: i32,
    pub window_seconds: i64,
    pub block_seconds: i64,
}

impl RateLimitRule {
    pub fn new(max_actions: i32, window_seconds: i64) -> Self {
        Self {
            max_actions,
            window_seconds,
            block_seconds: BLOCK_DURATION_SECS,
        }
    }
}
