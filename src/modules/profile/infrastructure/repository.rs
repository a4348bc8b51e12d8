/// Diesel-based implementation of ProfileRepository
use crate::modules::profile::domain::{Profile, ProfileRepository};
use crate::modules::profile::infrastructure::models::ProfileModel;
use crate::schema::profiles;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::Database;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use std::sync::Arc;
use uuid::Uuid;

diesel::define_sql_function! {
    fn lower(x: diesel::sql_types::Nullable<diesel::sql_types::Text>) -> diesel::sql_types::Nullable<diesel::sql_types::Text>;
}

pub struct ProfileRepositoryImpl {
    db: Arc<Database>,
}

impl ProfileRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for ProfileRepositoryImpl {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Profile>> {
        let id = *id;

        let row = self
            .db
            .run(move |conn| {
                let row = profiles::table
                    .find(id)
                    .select(ProfileModel::as_select())
                    .first(conn)
                    .optional()?;
                Ok(row)
            })
            .await?;

        Ok(row.map(Profile::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>> {
        let email = email.trim().to_lowercase();

        let row = self
            .db
            .run(move |conn| {
                let row = profiles::table
                    .filter(lower(profiles::email).eq(email))
                    .select(ProfileModel::as_select())
                    .first(conn)
                    .optional()?;
                Ok(row)
            })
            .await?;

        Ok(row.map(Profile::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Profile>> {
        let username = username.to_string();

        let row = self
            .db
            .run(move |conn| {
                let row = profiles::table
                    .filter(profiles::username.eq(username))
                    .select(ProfileModel::as_select())
                    .first(conn)
                    .optional()?;
                Ok(row)
            })
            .await?;

        Ok(row.map(Profile::from))
    }

    async fn save(&self, profile: &Profile) -> AppResult<Profile> {
        let model = ProfileModel::from(profile);

        let saved = self
            .db
            .run(move |conn| {
                let row = diesel::insert_into(profiles::table)
                    .values(&model)
                    .on_conflict(profiles::id)
                    .do_update()
                    .set((
                        profiles::username.eq(excluded(profiles::username)),
                        profiles::bio.eq(excluded(profiles::bio)),
                        profiles::updated_at.eq(excluded(profiles::updated_at)),
                    ))
                    .returning(ProfileModel::as_returning())
                    .get_result(conn)?;
                Ok(row)
            })
            .await?;

        Ok(Profile::from(saved))
    }

    async fn set_avatar_url(
        &self,
        id: &Uuid,
        avatar_url: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Profile>> {
        let id = *id;
        let avatar_url = avatar_url.to_string();

        let row = self
            .db
            .run(move |conn| {
                let row = diesel::update(profiles::table.find(id))
                    .set((
                        profiles::avatar_url.eq(Some(avatar_url)),
                        profiles::updated_at.eq(now),
                    ))
                    .returning(ProfileModel::as_returning())
                    .get_result(conn)
                    .optional()?;
                Ok(row)
            })
            .await?;

        Ok(row.map(Profile::from))
    }
}
