use crate::modules::comments::domain::{Comment, CommentRepository};
use crate::modules::moderation::ModerationService;
use crate::modules::rate_limit::{ActionType, RateLimiter};
use crate::shared::application::{PaginatedResult, PaginationParams};
use crate::shared::cache::{mutate_optimistically, QueryCache, QueryOptions};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::http::RetryPolicy;
use crate::shared::utils::Validator;
use crate::{log_debug, log_info};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

fn comments_key(anime_id: i64) -> String {
    format!("comments:{}", anime_id)
}

/// Comment threads, one cached newest-first list per anime
pub struct CommentsService {
    repo: Arc<dyn CommentRepository>,
    rate_limiter: Arc<RateLimiter>,
    moderation: Arc<ModerationService>,
    cache: QueryCache<Vec<Comment>>,
    mutation_policy: RetryPolicy,
}

impl CommentsService {
    pub fn new(
        repo: Arc<dyn CommentRepository>,
        rate_limiter: Arc<RateLimiter>,
        moderation: Arc<ModerationService>,
    ) -> Self {
        Self {
            repo,
            rate_limiter,
            moderation,
            cache: QueryCache::new("comments", QueryOptions::lists()),
            mutation_policy: RetryPolicy::mutations(),
        }
    }

    pub fn with_mutation_policy(mut self, policy: RetryPolicy) -> Self {
        self.mutation_policy = policy;
        self
    }

    pub async fn list_comments(
        &self,
        anime_id: i64,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Comment>> {
        Validator::validate_anime_id(anime_id)?;

        let repo = Arc::clone(&self.repo);
        let all = self
            .cache
            .fetch(&comments_key(anime_id), move || async move {
                repo.find_by_anime(anime_id).await
            })
            .await?;

        Ok(PaginatedResult::from_slice(&all, &pagination))
    }

    /// Validates the text and charges the `comment` quota before writing
    pub async fn add_comment(&self, anime_id: i64, user_id: &Uuid, content: &str) -> AppResult<Comment> {
        Validator::validate_anime_id(anime_id)?;
        let content = Validator::validate_comment(content)?;

        self.rate_limiter
            .check_rate_limit(user_id, ActionType::Comment)
            .await?;

        let comment = Comment::new(*user_id, anime_id, content, Utc::now());
        let optimistic = comment.clone();

        let saved = mutate_optimistically(
            &self.cache,
            &comments_key(anime_id),
            move |list| list.insert(0, optimistic),
            || self.repo.insert(&comment),
            &self.mutation_policy,
            "add comment",
        )
        .await?;

        log_info!("User {} commented on anime {}", user_id, anime_id);
        Ok(saved)
    }

    /// Only the author may edit
    pub async fn update_comment(
        &self,
        comment_id: &Uuid,
        user_id: &Uuid,
        content: &str,
    ) -> AppResult<Comment> {
        let content = Validator::validate_comment(content)?;
        let existing = self.find(comment_id).await?;
        if !existing.is_authored_by(user_id) {
            return Err(AppError::Forbidden(
                "Only the author can edit this comment".to_string(),
            ));
        }

        let now = Utc::now();
        let text = content.as_str();
        let id = *comment_id;

        let updated = mutate_optimistically(
            &self.cache,
            &comments_key(existing.anime_id),
            |list| {
                if let Some(comment) = list.iter_mut().find(|c| c.id == id) {
                    comment.edit(text.to_string(), now);
                }
            },
            move || async move {
                self.repo
                    .update_content(&id, text, now)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", id)))
            },
            &self.mutation_policy,
            "update comment",
        )
        .await?;

        log_debug!("Comment {} edited by {}", comment_id, user_id);
        Ok(updated)
    }

    /// Authors delete their own comments; anyone else needs a moderator role
    pub async fn delete_comment(&self, comment_id: &Uuid, user_id: &Uuid) -> AppResult<bool> {
        let existing = self.find(comment_id).await?;
        let by_author = existing.is_authored_by(user_id);
        if !by_author && !self.moderation.is_moderator(user_id).await? {
            return Err(AppError::Forbidden(
                "Only the author or a moderator can delete this comment".to_string(),
            ));
        }

        let id = *comment_id;
        let removed = mutate_optimistically(
            &self.cache,
            &comments_key(existing.anime_id),
            |list| list.retain(|c| c.id != id),
            move || async move {
                if by_author {
                    self.repo.delete(&id).await
                } else {
                    self.moderation.moderator_delete_comment(&id, user_id).await
                }
            },
            &self.mutation_policy,
            "delete comment",
        )
        .await?;

        log_debug!(
            "Comment {} deleted by {} (author: {})",
            comment_id,
            user_id,
            by_author
        );
        Ok(removed)
    }

    async fn find(&self, comment_id: &Uuid) -> AppResult<Comment> {
        self.repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))
    }
}
