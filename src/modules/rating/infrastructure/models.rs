use crate::modules::rating::domain::Rating;
use crate::schema::ratings;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RatingModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub anime_id: i64,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RatingModel> for Rating {
    fn from(model: RatingModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            anime_id: model.anime_id,
            rating: model.rating,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Rating> for RatingModel {
    fn from(rating: &Rating) -> Self {
        Self {
            id: rating.id,
            user_id: rating.user_id,
            anime_id: rating.anime_id,
            rating: rating.rating,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}
