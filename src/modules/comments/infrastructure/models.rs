use crate::modules::comments::domain::{Comment, CommentAuthor};
use crate::schema::comments;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub anime_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentModel {
    pub fn into_comment(self, author: Option<(String, Option<String>)>) -> Comment {
        Comment {
            id: self.id,
            user_id: self.user_id,
            anime_id: self.anime_id,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
            author: author.map(|(username, avatar_url)| CommentAuthor {
                username,
                avatar_url,
            }),
        }
    }
}

impl From<&Comment> for CommentModel {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            anime_id: comment.anime_id,
            content: comment.content.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
