use crate::modules::favorites::domain::{Favorite, WatchStatus};
use crate::schema::favorites;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FavoriteModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub anime_id: i64,
    pub status: WatchStatus,
    pub anime_title: Option<String>,
    pub anime_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FavoriteModel> for Favorite {
    fn from(model: FavoriteModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            anime_id: model.anime_id,
            status: model.status,
            anime_title: model.anime_title,
            anime_image: model.anime_image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Favorite> for FavoriteModel {
    fn from(favorite: &Favorite) -> Self {
        Self {
            id: favorite.id,
            user_id: favorite.user_id,
            anime_id: favorite.anime_id,
            status: favorite.status,
            anime_title: favorite.anime_title.clone(),
            anime_image: favorite.anime_image.clone(),
            created_at: favorite.created_at,
            updated_at: favorite.updated_at,
        }
    }
}
