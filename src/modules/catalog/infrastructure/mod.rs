pub mod shikimori;

pub use shikimori::ShikimoriCatalog;
