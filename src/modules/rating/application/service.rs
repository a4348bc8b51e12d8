use crate::modules::rate_limit::{ActionType, RateLimiter};
use crate::modules::rating::domain::{
    AnimeRating, Rating, RatingRepository, ScoreCalculator, TopRatedAnime,
};
use crate::shared::cache::{mutate_optimistically, QueryCache, QueryOptions};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::http::RetryPolicy;
use crate::shared::utils::{TimedOperation, Validator};
use crate::{log_debug, log_info};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

fn aggregate_key(anime_id: i64) -> String {
    format!("rating:{}", anime_id)
}

fn user_rating_key(anime_id: i64, user_id: &Uuid) -> String {
    format!("user-rating:{}:{}", anime_id, user_id)
}

fn top_key(limit: usize) -> String {
    format!("top:{}", limit)
}

pub struct RatingService {
    repo: Arc<dyn RatingRepository>,
    rate_limiter: Arc<RateLimiter>,
    calculator: ScoreCalculator,
    aggregates: QueryCache<AnimeRating>,
    user_ratings: QueryCache<Option<Rating>>,
    top_rated: QueryCache<Vec<TopRatedAnime>>,
    mutation_policy: RetryPolicy,
}

impl RatingService {
    pub fn new(repo: Arc<dyn RatingRepository>, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            repo,
            rate_limiter,
            calculator: ScoreCalculator::new(),
            aggregates: QueryCache::new("ratings", QueryOptions::lists()),
            user_ratings: QueryCache::new("user-ratings", QueryOptions::lists()),
            top_rated: QueryCache::new("top-rated", QueryOptions::lists()),
            mutation_policy: RetryPolicy::mutations(),
        }
    }

    pub fn with_mutation_policy(mut self, policy: RetryPolicy) -> Self {
        self.mutation_policy = policy;
        self
    }

    /// Average, weighted score and vote count of one anime
    pub async fn get_rating(&self, anime_id: i64) -> AppResult<AnimeRating> {
        Validator::validate_anime_id(anime_id)?;

        let repo = Arc::clone(&self.repo);
        let calculator = self.calculator.clone();
        self.aggregates
            .fetch(&aggregate_key(anime_id), move || async move {
                let own = repo.find_by_anime(anime_id).await?;
                let all = repo.all_scores().await?;
                let global = calculator.global_average(all.iter().map(|(_, s)| *s));
                Ok(calculator.aggregate(own.iter().map(|r| r.rating), global))
            })
            .await
    }

    pub async fn get_user_rating(&self, anime_id: i64, user_id: &Uuid) -> AppResult<Option<Rating>> {
        let repo = Arc::clone(&self.repo);
        let user_id = *user_id;
        self.user_ratings
            .fetch(&user_rating_key(anime_id, &user_id), move || async move {
                repo.find_user_rating(anime_id, &user_id).await
            })
            .await
    }

    /// Validates, charges the `rating` quota, then upserts by (anime, user)
    pub async fn set_rating(&self, anime_id: i64, rating: i32, user_id: &Uuid) -> AppResult<Rating> {
        Validator::validate_rating(rating)?;
        Validator::validate_anime_id(anime_id)?;

        self.rate_limiter
            .check_rate_limit(user_id, ActionType::Rating)
            .await?;

        let score = rating as i16;
        let now = Utc::now();
        let owner = *user_id;

        let saved = mutate_optimistically(
            &self.user_ratings,
            &user_rating_key(anime_id, user_id),
            |current| {
                if let Some(existing) = current.as_mut() {
                    existing.update_score(score, now);
                } else {
                    *current = Some(Rating::new(owner, anime_id, score, now));
                }
            },
            || self.repo.upsert(anime_id, user_id, score, now),
            &self.mutation_policy,
            "set rating",
        )
        .await?;

        self.invalidate_aggregates(anime_id);
        log_info!(
            "User {} rated anime {} with {}",
            user_id,
            anime_id,
            rating
        );
        Ok(saved)
    }

    /// Removes the caller's own rating; missing ratings are not an error
    pub async fn delete_rating(&self, anime_id: i64, user_id: &Uuid) -> AppResult<bool> {
        let removed = mutate_optimistically(
            &self.user_ratings,
            &user_rating_key(anime_id, user_id),
            |current| *current = None,
            || self.repo.delete(anime_id, user_id),
            &self.mutation_policy,
            "delete rating",
        )
        .await?;

        if removed {
            self.invalidate_aggregates(anime_id);
        }
        log_debug!(
            "Delete rating anime={} user={} removed={}",
            anime_id,
            user_id,
            removed
        );
        Ok(removed)
    }

    /// Highest weighted scores, all computed against one global mean
    pub async fn get_top_rated_anime(&self, limit: usize) -> AppResult<Vec<TopRatedAnime>> {
        if limit == 0 {
            return Err(AppError::ValidationError(
                "Limit must be positive".to_string(),
            ));
        }

        let repo = Arc::clone(&self.repo);
        let calculator = self.calculator.clone();
        self.top_rated
            .fetch(&top_key(limit), move || async move {
                let scores = repo.all_scores().await?;
                let timer = TimedOperation::new("top rated ranking");
                let ranked = calculator.top_rated(&scores, limit);
                timer.finish();
                Ok(ranked)
            })
            .await
    }

    fn invalidate_aggregates(&self, anime_id: i64) {
        // every other anime's weighted score depends on the global mean too
        self.aggregates.invalidate_prefix("rating:");
        self.top_rated.invalidate_prefix("top:");
        log_debug!("Invalidated rating aggregates after change to {}", anime_id);
    }
}
