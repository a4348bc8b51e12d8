use crate::modules::rate_limit::domain::RateLimitRecord;
use crate::schema::rate_limits;
use crate::shared::errors::AppError;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = rate_limits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RateLimitModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action_type: String,
    pub action_count: i32,
    pub window_start: DateTime<Utc>,
    pub is_blocked: bool,
    pub blocked_until: Option<DateTime<Utc>>,
}

impl From<&RateLimitRecord> for RateLimitModel {
    fn from(record: &RateLimitRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            action_type: record.action_type.as_str().to_string(),
            action_count: record.action_count,
            window_start: record.window_start,
            is_blocked: record.is_blocked,
            blocked_until: record.blocked_until,
        }
    }
}

impl TryFrom<RateLimitModel> for RateLimitRecord {
    type Error = AppError;

    fn try_from(model: RateLimitModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            action_type: model.action_type.parse()?,
            action_count: model.action_count,
            window_start: model.window_start,
            is_blocked: model.is_blocked,
            blocked_until: model.blocked_until,
        })
    }
}
