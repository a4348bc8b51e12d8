pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::service::CatalogService;
pub use domain::{
    AnimeCatalog, AnimeDetails, AnimeKind, AnimeStatus, AnimeSummary, Genre, RelatedAnime,
    SearchCriteria, SearchOrder,
};
pub use infrastructure::ShikimoriCatalog;
