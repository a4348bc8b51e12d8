use crate::modules::profile::domain::{
    avatar_path, AvatarStorage, Profile, ProfileRepository, ProfileUpdate, AVATAR_BUCKET,
};
use crate::modules::rate_limit::{ActionType, RateLimiter};
use crate::shared::cache::{mutate_optimistically, QueryCache, QueryOptions};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::http::RetryPolicy;
use crate::shared::utils::{TimedOperation, Validator};
use crate::{log_debug, log_info};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

fn profile_key(user_id: &Uuid) -> String {
    format!("profile:{}", user_id)
}

pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
    storage: Arc<dyn AvatarStorage>,
    rate_limiter: Arc<RateLimiter>,
    cache: QueryCache<Option<Profile>>,
    mutation_policy: RetryPolicy,
}

impl ProfileService {
    pub fn new(
        repo: Arc<dyn ProfileRepository>,
        storage: Arc<dyn AvatarStorage>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            repo,
            storage,
            rate_limiter,
            cache: QueryCache::new("profiles", QueryOptions::details()),
            mutation_policy: RetryPolicy::mutations(),
        }
    }

    pub fn with_mutation_policy(mut self, policy: RetryPolicy) -> Self {
        self.mutation_policy = policy;
        self
    }

    pub async fn get_profile(&self, user_id: &Uuid) -> AppResult<Profile> {
        self.find_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user_id)))
    }

    pub async fn find_profile(&self, user_id: &Uuid) -> AppResult<Option<Profile>> {
        let repo = Arc::clone(&self.repo);
        let id = *user_id;
        self.cache
            .fetch(&profile_key(user_id), move || async move {
                repo.find_by_id(&id).await
            })
            .await
    }

    /// Creates the profile row right after registration; returns the
    /// existing one when it is already there
    pub async fn ensure_profile(
        &self,
        user_id: &Uuid,
        username: &str,
        email: Option<&str>,
    ) -> AppResult<Profile> {
        if let Some(existing) = self.repo.find_by_id(user_id).await? {
            return Ok(existing);
        }

        let username = username.trim();
        Validator::validate_username(username)?;
        self.ensure_username_free(username, user_id).await?;

        let profile = Profile::new(
            *user_id,
            username.to_string(),
            email.map(|e| e.trim().to_lowercase()),
            Utc::now(),
        );
        let saved = self.repo.save(&profile).await?;
        self.cache.invalidate(&profile_key(user_id));
        log_info!("Created profile {} for user {}", saved.username, user_id);
        Ok(saved)
    }

    pub async fn update_profile(&self, user_id: &Uuid, update: ProfileUpdate) -> AppResult<Profile> {
        if update.is_empty() {
            return Err(AppError::ValidationError("Nothing to update".to_string()));
        }
        if let Some(username) = &update.username {
            Validator::validate_username(username.trim())?;
        }
        if let Some(bio) = &update.bio {
            Validator::validate_bio(bio.trim())?;
        }

        self.rate_limiter
            .check_rate_limit(user_id, ActionType::ProfileUpdate)
            .await?;

        let mut profile = self.get_profile(user_id).await?;
        if let Some(username) = &update.username {
            self.ensure_username_free(username.trim(), user_id).await?;
        }

        let now = Utc::now();
        update.apply_to(&mut profile, now);

        let saved = mutate_optimistically(
            &self.cache,
            &profile_key(user_id),
            |cached| {
                if let Some(cached) = cached.as_mut() {
                    update.apply_to(cached, now);
                }
            },
            || self.repo.save(&profile),
            &self.mutation_policy,
            "update profile",
        )
        .await?;

        log_info!("Profile {} updated", user_id);
        Ok(saved)
    }

    /// Validates and stores the avatar, then writes its public URL back to
    /// the profile
    pub async fn upload_avatar(
        &self,
        user_id: &Uuid,
        bytes: Vec<u8>,
        content_type: &str,
        access_token: Option<&str>,
    ) -> AppResult<Profile> {
        let extension = Validator::validate_avatar(content_type, bytes.len())?;

        self.rate_limiter
            .check_rate_limit(user_id, ActionType::ProfileUpdate)
            .await?;

        let timer = TimedOperation::new("avatar upload");
        let path = avatar_path(user_id, extension);
        let url = self
            .storage
            .upload(AVATAR_BUCKET, &path, bytes, content_type, access_token)
            .await?;
        timer.finish_with_info(&path);

        let now = Utc::now();
        let public_url = url.as_str();
        let saved = mutate_optimistically(
            &self.cache,
            &profile_key(user_id),
            |cached| {
                if let Some(cached) = cached.as_mut() {
                    cached.avatar_url = Some(public_url.to_string());
                    cached.updated_at = now;
                }
            },
            move || async move {
                self.repo
                    .set_avatar_url(user_id, public_url, now)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user_id)))
            },
            &self.mutation_policy,
            "set avatar url",
        )
        .await?;

        log_debug!("Avatar for {} stored at {}", user_id, url);
        Ok(saved)
    }

    async fn ensure_username_free(&self, username: &str, user_id: &Uuid) -> AppResult<()> {
        match self.repo.find_by_username(username).await? {
            Some(other) if other.id != *user_id => Err(AppError::ValidationError(format!(
                "Username {} is already taken",
                username
            ))),
            _ => Ok(()),
        }
    }
}
