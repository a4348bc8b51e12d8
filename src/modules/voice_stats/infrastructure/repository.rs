use crate::modules::voice_stats::domain::{VoiceSelection, VoiceSelectionRepository};
use crate::schema::voice_stats;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::Database;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = voice_stats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct VoiceSelectionModel {
    id: Uuid,
    user_id: Uuid,
    anime_id: i64,
    voice: String,
    created_at: DateTime<Utc>,
}

impl From<VoiceSelectionModel> for VoiceSelection {
    fn from(model: VoiceSelectionModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            anime_id: model.anime_id,
            voice: model.voice,
            created_at: model.created_at,
        }
    }
}

pub struct VoiceSelectionRepositoryImpl {
    db: Arc<Database>,
}

impl VoiceSelectionRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VoiceSelectionRepository for VoiceSelectionRepositoryImpl {
    async fn find_by_anime(&self, anime_id: i64) -> AppResult<Vec<VoiceSelection>> {
        let rows = self
            .db
            .run(move |conn| {
                let rows = voice_stats::table
                    .filter(voice_stats::anime_id.eq(anime_id))
                    .order((voice_stats::created_at.asc(), voice_stats::id.asc()))
                    .select(VoiceSelectionModel::as_select())
                    .load(conn)?;
                Ok(rows)
            })
            .await?;

        Ok(rows.into_iter().map(VoiceSelection::from).collect())
    }

    async fn upsert(
        &self,
        anime_id: i64,
        user_id: &Uuid,
        voice: &str,
        now: DateTime<Utc>,
    ) -> AppResult<VoiceSelection> {
        let model = VoiceSelectionModel {
            id: Uuid::new_v4(),
            user_id: *user_id,
            anime_id,
            voice: voice.to_string(),
            created_at: now,
        };

        let saved = self
            .db
            .run(move |conn| {
                let row = diesel::insert_into(voice_stats::table)
                    .values(&model)
                    .on_conflict((voice_stats::user_id, voice_stats::anime_id))
                    .do_update()
                    .set(voice_stats::voice.eq(excluded(voice_stats::voice)))
                    .returning(VoiceSelectionModel::as_returning())
                    .get_result(conn)?;
                Ok(row)
            })
            .await?;

        Ok(VoiceSelection::from(saved))
    }
}
