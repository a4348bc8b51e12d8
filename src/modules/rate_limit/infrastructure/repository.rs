/// Diesel-based implementation of RateLimitRepository
use crate::modules::rate_limit::domain::{ActionType, RateLimitRecord, RateLimitRepository};
use crate::modules::rate_limit::infrastructure::models::RateLimitModel;
use crate::schema::rate_limits;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::Database;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use std::sync::Arc;
use uuid::Uuid;

pub struct RateLimitRepositoryImpl {
    db: Arc<Database>,
}

impl RateLimitRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RateLimitRepository for RateLimitRepositoryImpl {
    async fn find(
        &self,
        user_id: &Uuid,
        action_type: ActionType,
    ) -> AppResult<Option<RateLimitRecord>> {
        let user_id = *user_id;

        let model = self
            .db
            .run(move |conn| {
                let row = rate_limits::table
                    .filter(rate_limits::user_id.eq(user_id))
                    .filter(rate_limits::action_type.eq(action_type.as_str()))
                    .select(RateLimitModel::as_select())
                    .first(conn)
                    .optional()?;
                Ok(row)
            })
            .await?;

        model.map(RateLimitRecord::try_from).transpose()
    }

    async fn save(&self, record: &RateLimitRecord) -> AppResult<()> {
        let model = RateLimitModel::from(record);

        self.db
            .run(move |conn| {
                diesel::insert_into(rate_limits::table)
                    .values(&model)
                    .on_conflict((rate_limits::user_id, rate_limits::action_type))
                    .do_update()
                    .set((
                        rate_limits::action_count.eq(excluded(rate_limits::action_count)),
                        rate_limits::window_start.eq(excluded(rate_limits::window_start)),
                        rate_limits::is_blocked.eq(excluded(rate_limits::is_blocked)),
                        rate_limits::blocked_until.eq(excluded(rate_limits::blocked_until)),
                    ))
                    .execute(conn)?;
                Ok(())
            })
            .await
    }

    async fn delete(&self, user_id: &Uuid, action_type: ActionType) -> AppResult<bool> {
        let user_id = *user_id;

        self.db
            .run(move |conn| {
                let removed = diesel::delete(
                    rate_limits::table
                        .filter(rate_limits::user_id.eq(user_id))
                        .filter(rate_limits::action_type.eq(action_type.as_str())),
                )
                .execute(conn)?;
                Ok(removed > 0)
            })
            .await
    }

    async fn delete_stale(&self, before: DateTime<Utc>) -> AppResult<usize> {
        self.db
            .run(move |conn| {
                let removed = diesel::delete(
                    rate_limits::table.filter(
                        rate_limits::is_blocked
                            .eq(false)
                            .and(rate_limits::window_start.lt(before))
                            .or(rate_limits::blocked_until.lt(before)),
                    ),
                )
                .execute(conn)?;
                Ok(removed)
            })
            .await
    }
}
