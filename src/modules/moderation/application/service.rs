use crate::modules::comments::CommentRepository;
use crate::modules::moderation::domain::{Moderator, ModeratorRepository, ModeratorRole};
use crate::modules::profile::ProfileRepository;
use crate::shared::cache::{QueryCache, QueryOptions};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_info, log_warn};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

fn role_key(user_id: &Uuid) -> String {
    format!("role:{}", user_id)
}

pub struct ModerationService {
    moderators: Arc<dyn ModeratorRepository>,
    profiles: Arc<dyn ProfileRepository>,
    comments: Arc<dyn CommentRepository>,
    roles: QueryCache<Option<ModeratorRole>>,
}

impl ModerationService {
    pub fn new(
        moderators: Arc<dyn ModeratorRepository>,
        profiles: Arc<dyn ProfileRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            moderators,
            profiles,
            comments,
            roles: QueryCache::new("moderator-roles", QueryOptions::details()),
        }
    }

    /// Role granted to `user_id`. Grants stored under the user's email
    /// (made before the profile existed) are honoured too.
    pub async fn role_of(&self, user_id: &Uuid) -> AppResult<Option<ModeratorRole>> {
        let moderators = Arc::clone(&self.moderators);
        let profiles = Arc::clone(&self.profiles);
        let id = *user_id;

        self.roles
            .fetch(&role_key(user_id), move || async move {
                if let Some(grant) = moderators.find_by_user_id(&id.to_string()).await? {
                    return Ok(Some(grant.role));
                }

                let email = match profiles.find_by_id(&id).await? {
                    Some(profile) => profile.email,
                    None => None,
                };
                match email {
                    Some(email) => Ok(moderators
                        .find_by_user_id(&email.to_lowercase())
                        .await?
                        .map(|grant| grant.role)),
                    None => Ok(None),
                }
            })
            .await
    }

    /// True for moderators and admins
    pub async fn is_moderator(&self, user_id: &Uuid) -> AppResult<bool> {
        Ok(self.role_of(user_id).await?.is_some())
    }

    pub async fn is_admin(&self, user_id: &Uuid) -> AppResult<bool> {
        Ok(self
            .role_of(user_id)
            .await?
            .is_some_and(|role| role.can_manage_moderators()))
    }

    /// Grants `role` to the account registered with `email`. When no
    /// profile has that email yet the email itself becomes the user id.
    pub async fn add_moderator(
        &self,
        email: &str,
        role: ModeratorRole,
        acting_admin: &Uuid,
    ) -> AppResult<Moderator> {
        self.require_admin(acting_admin).await?;

        let email = email.trim().to_lowercase();
        Validator::validate_email(&email)?;

        let user_id = match self.profiles.find_by_email(&email).await? {
            Some(profile) => profile.id.to_string(),
            None => {
                log_warn!(
                    "No profile found for {}, storing moderator grant under the email",
                    email
                );
                email.clone()
            }
        };

        let grant = Moderator::new(user_id, email, role, Some(*acting_admin), Utc::now());
        let saved = self.moderators.insert(&grant).await?;
        self.roles.invalidate_prefix("role:");

        log_info!(
            "{} granted {} role to {} ({})",
            acting_admin,
            saved.role,
            saved.email,
            saved.user_id
        );
        Ok(saved)
    }

    pub async fn remove_moderator(&self, user_id: &str, acting_admin: &Uuid) -> AppResult<bool> {
        self.require_admin(acting_admin).await?;
        if user_id == acting_admin.to_string() {
            return Err(AppError::ValidationError(
                "Admins cannot revoke their own role".to_string(),
            ));
        }

        let removed = self.moderators.delete(user_id).await?;
        self.roles.invalidate_prefix("role:");
        if removed {
            log_info!("{} revoked moderator role of {}", acting_admin, user_id);
        }
        Ok(removed)
    }

    pub async fn list_moderators(&self, acting_user: &Uuid) -> AppResult<Vec<Moderator>> {
        self.require_moderator(acting_user).await?;
        self.moderators.list().await
    }

    /// Deletes any comment; the actor must be a moderator or admin
    pub async fn moderator_delete_comment(&self, comment_id: &Uuid, actor: &Uuid) -> AppResult<bool> {
        self.require_moderator(actor).await?;

        let removed = self.comments.delete(comment_id).await?;
        if removed {
            log_info!("Moderator {} deleted comment {}", actor, comment_id);
        }
        Ok(removed)
    }

    async fn require_moderator(&self, user_id: &Uuid) -> AppResult<()> {
        if self.is_moderator(user_id).await? {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Moderator privileges required".to_string(),
            ))
        }
    }

    async fn require_admin(&self, user_id: &Uuid) -> AppResult<()> {
        if self.is_admin(user_id).await? {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin privileges required".to_string()))
        }
    }
}
