/// Diesel-based implementation of ModeratorRepository
use crate::modules::moderation::domain::{Moderator, ModeratorRepository, ModeratorRole};
use crate::schema::moderators;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::Database;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = moderators)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct ModeratorModel {
    id: Uuid,
    user_id: String,
    email: String,
    role: ModeratorRole,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<ModeratorModel> for Moderator {
    fn from(model: ModeratorModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            email: model.email,
            role: model.role,
            created_by: model.created_by,
            created_at: model.created_at,
        }
    }
}

impl From<&Moderator> for ModeratorModel {
    fn from(moderator: &Moderator) -> Self {
        Self {
            id: moderator.id,
            user_id: moderator.user_id.clone(),
            email: moderator.email.clone(),
            role: moderator.role,
            created_by: moderator.created_by,
            created_at: moderator.created_at,
        }
    }
}

pub struct ModeratorRepositoryImpl {
    db: Arc<Database>,
}

impl ModeratorRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ModeratorRepository for ModeratorRepositoryImpl {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Moderator>> {
        let user_id = user_id.to_string();

        let row = self
            .db
            .run(move |conn| {
                let row = moderators::table
                    .filter(moderators::user_id.eq(user_id))
                    .select(ModeratorModel::as_select())
                    .first(conn)
                    .optional()?;
                Ok(row)
            })
            .await?;

        Ok(row.map(Moderator::from))
    }

    async fn list(&self) -> AppResult<Vec<Moderator>> {
        let rows = self
            .db
            .run(|conn| {
                let rows = moderators::table
                    .order(moderators::created_at.asc())
                    .select(ModeratorModel::as_select())
                    .load(conn)?;
                Ok(rows)
            })
            .await?;

        Ok(rows.into_iter().map(Moderator::from).collect())
    }

    async fn insert(&self, moderator: &Moderator) -> AppResult<Moderator> {
        let model = ModeratorModel::from(moderator);

        let saved = self
            .db
            .run(move |conn| {
                let row = diesel::insert_into(moderators::table)
                    .values(&model)
                    .on_conflict(moderators::user_id)
                    .do_nothing()
                    .returning(ModeratorModel::as_returning())
                    .get_result(conn)
                    .optional()?;
                Ok(row)
            })
            .await?;

        saved.map(Moderator::from).ok_or_else(|| {
            AppError::ValidationError(format!("{} is already a moderator", moderator.email))
        })
    }

    async fn delete(&self, user_id: &str) -> AppResult<bool> {
        let user_id = user_id.to_string();

        self.db
            .run(move |conn| {
                let removed =
                    diesel::delete(moderators::table.filter(moderators::user_id.eq(user_id)))
                        .execute(conn)?;
                Ok(removed > 0)
            })
            .await
    }
}
