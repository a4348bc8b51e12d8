/// Service builders over in-memory repositories
use super::fakes::{FakeCatalog, MemoryStorage, OfflineAuth};
use shikaraka_lib::modules::auth::AuthClient;
use shikaraka_lib::modules::catalog::AnimeCatalog;
use shikaraka_lib::modules::moderation::{InMemoryModeratorRepository, Moderator};
use shikaraka_lib::modules::player::{OriginPolicy, PlayerService};
use shikaraka_lib::modules::profile::{AvatarStorage, Profile, ProfileRepository};
use shikaraka_lib::{AppServices, Clients, Repositories};
use std::sync::Arc;

pub struct TestAppBuilder {
    repos: Repositories,
    moderators: Vec<Moderator>,
    auth: Arc<dyn AuthClient>,
    storage: Arc<dyn AvatarStorage>,
    catalog: Arc<dyn AnimeCatalog>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            repos: Repositories::in_memory(),
            moderators: Vec::new(),
            auth: Arc::new(OfflineAuth),
            storage: Arc::new(MemoryStorage::default()),
            catalog: Arc::new(FakeCatalog::default()),
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moderator(mut self, grant: Moderator) -> Self {
        self.moderators.push(grant);
        self
    }

    pub fn auth(mut self, auth: Arc<dyn AuthClient>) -> Self {
        self.auth = auth;
        self
    }

    pub fn storage(mut self, storage: Arc<dyn AvatarStorage>) -> Self {
        self.storage = storage;
        self
    }

    pub fn catalog(mut self, catalog: Arc<dyn AnimeCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn profiles(&self) -> Arc<dyn ProfileRepository> {
        Arc::clone(&self.repos.profiles)
    }

    pub fn build(mut self) -> AppServices {
        let moderators = self
            .moderators
            .into_iter()
            .fold(InMemoryModeratorRepository::new(), |repo, grant| {
                repo.with_moderator(grant)
            });
        self.repos.moderators = Arc::new(moderators);

        AppServices::build(
            self.repos,
            Clients {
                auth: self.auth,
                storage: self.storage,
                catalog: self.catalog,
            },
            PlayerService::new(OriginPolicy::new(["kodik.info"])),
        )
    }
}

/// Plain in-memory services with offline upstreams
pub fn build_test_services() -> AppServices {
    TestAppBuilder::new().build()
}

/// Stores a profile straight through the repository
pub async fn seed_profile(profiles: &Arc<dyn ProfileRepository>, profile: &Profile) {
    profiles
        .save(profile)
        .await
        .expect("profile should be stored");
}
