pub mod catalog;
pub mod entities;
pub mod search_criteria;
pub mod value_objects;

pub use catalog::AnimeCatalog;
pub use entities::{AnimeDetails, AnimeSummary, Genre, RelatedAnime};
pub use search_criteria::{SearchCriteria, MAX_PAGE_LIMIT};
pub use value_objects::{AnimeKind, AnimeStatus, SearchOrder};
