//! Composition root: builds every service with its repositories and clients

use crate::modules::{
    auth::{AuthClient, AuthService, SupabaseAuthClient},
    catalog::{AnimeCatalog, CatalogService, ShikimoriCatalog},
    comments::{CommentRepository, CommentRepositoryImpl, CommentsService, InMemoryCommentRepository},
    favorites::{FavoriteRepository, FavoriteRepositoryImpl, FavoritesService, InMemoryFavoriteRepository},
    moderation::{
        InMemoryModeratorRepository, ModerationService, ModeratorRepository,
        ModeratorRepositoryImpl,
    },
    player::PlayerService,
    profile::{
        AvatarStorage, InMemoryProfileRepository, ProfileRepository, ProfileRepositoryImpl,
        ProfileService, SupabaseAvatarStorage,
    },
    rate_limit::{
        InMemoryRateLimitRepository, RateLimitRepository, RateLimitRepositoryImpl, RateLimiter,
    },
    rating::{InMemoryRatingRepository, RatingRepository, RatingRepositoryImpl, RatingService},
    voice_stats::{
        InMemoryVoiceSelectionRepository, VoiceSelectionRepository,
        VoiceSelectionRepositoryImpl, VoiceStatsService,
    },
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::http::SupabaseClient;
use crate::shared::{AppConfig, Database};
use crate::{log_debug, log_error, log_info};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Repository set shared by both wirings
pub struct Repositories {
    pub rate_limits: Arc<dyn RateLimitRepository>,
    pub ratings: Arc<dyn RatingRepository>,
    pub voice_selections: Arc<dyn VoiceSelectionRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub moderators: Arc<dyn ModeratorRepository>,
}

impl Repositories {
    pub fn postgres(db: Arc<Database>) -> Self {
        Self {
            rate_limits: Arc::new(RateLimitRepositoryImpl::new(Arc::clone(&db))),
            ratings: Arc::new(RatingRepositoryImpl::new(Arc::clone(&db))),
            voice_selections: Arc::new(VoiceSelectionRepositoryImpl::new(Arc::clone(&db))),
            favorites: Arc::new(FavoriteRepositoryImpl::new(Arc::clone(&db))),
            comments: Arc::new(CommentRepositoryImpl::new(Arc::clone(&db))),
            profiles: Arc::new(ProfileRepositoryImpl::new(Arc::clone(&db))),
            moderators: Arc::new(ModeratorRepositoryImpl::new(db)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            rate_limits: Arc::new(InMemoryRateLimitRepository::new()),
            ratings: Arc::new(InMemoryRatingRepository::new()),
            voice_selections: Arc::new(InMemoryVoiceSelectionRepository::new()),
            favorites: Arc::new(InMemoryFavoriteRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            profiles: Arc::new(InMemoryProfileRepository::new()),
            moderators: Arc::new(InMemoryModeratorRepository::new()),
        }
    }
}

/// External ports: identity provider, avatar storage and anime catalog
pub struct Clients {
    pub auth: Arc<dyn AuthClient>,
    pub storage: Arc<dyn AvatarStorage>,
    pub catalog: Arc<dyn AnimeCatalog>,
}

pub struct AppServices {
    pub rate_limiter: Arc<RateLimiter>,
    pub ratings: Arc<RatingService>,
    pub voice_stats: Arc<VoiceStatsService>,
    pub favorites: Arc<FavoritesService>,
    pub comments: Arc<CommentsService>,
    pub profiles: Arc<ProfileService>,
    pub moderation: Arc<ModerationService>,
    pub auth: Arc<AuthService>,
    pub catalog: Arc<CatalogService>,
    pub player: Arc<PlayerService>,
}

impl AppServices {
    pub fn build(repos: Repositories, clients: Clients, player: PlayerService) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(repos.rate_limits));

        let moderation = Arc::new(ModerationService::new(
            repos.moderators,
            Arc::clone(&repos.profiles),
            Arc::clone(&repos.comments),
        ));

        let profiles = Arc::new(ProfileService::new(
            repos.profiles,
            clients.storage,
            Arc::clone(&rate_limiter),
        ));

        Self {
            ratings: Arc::new(RatingService::new(repos.ratings, Arc::clone(&rate_limiter))),
            voice_stats: Arc::new(VoiceStatsService::new(repos.voice_selections)),
            favorites: Arc::new(FavoritesService::new(repos.favorites)),
            comments: Arc::new(CommentsService::new(
                repos.comments,
                Arc::clone(&rate_limiter),
                Arc::clone(&moderation),
            )),
            auth: Arc::new(AuthService::new(
                clients.auth,
                Arc::clone(&rate_limiter),
                Arc::clone(&profiles),
            )),
            catalog: Arc::new(CatalogService::new(clients.catalog)),
            player: Arc::new(player),
            profiles,
            moderation,
            rate_limiter,
        }
    }

    /// Production wiring: Postgres through diesel, Supabase auth and
    /// storage, Shikimori catalog. Runs pending migrations first.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let database_url = config.database_url.as_deref().ok_or_else(|| {
            AppError::InvalidInput("DATABASE_URL environment variable not found".to_string())
        })?;

        let db = Arc::new(Database::new(database_url)?);
        if let Err(e) = db.run_migrations() {
            log_error!("Failed to run database migrations: {}", e);
            return Err(e);
        }

        let supabase = Arc::new(SupabaseClient::from_config(config)?);
        let clients = Clients {
            auth: Arc::new(SupabaseAuthClient::new(Arc::clone(&supabase))),
            storage: Arc::new(SupabaseAvatarStorage::new(supabase)),
            catalog: Arc::new(ShikimoriCatalog::from_config(config)?),
        };

        log_info!("Services initialized against {}", config.supabase_url);
        Ok(Self::build(
            Repositories::postgres(db),
            clients,
            PlayerService::from_config(config),
        ))
    }

    /// Periodic housekeeping: stale limiter rows and expired catalog entries
    pub fn spawn_maintenance(&self, interval: Duration) -> Vec<JoinHandle<()>> {
        let rate_limiter = Arc::clone(&self.rate_limiter);
        let mut handles = self.catalog.spawn_gc(interval);

        handles.push(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match rate_limiter.cleanup().await {
                    Ok(removed) => log_debug!("Maintenance removed {} limiter rows", removed),
                    Err(e) => log_error!("Rate limit cleanup failed: {}", e),
                }
            }
        }));

        handles
    }
}
