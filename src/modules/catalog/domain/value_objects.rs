use crate::shared::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generates `as_str`, `Display` and a `FromStr` accepting the wire names
macro_rules! wire_enum {
    ($name:ident, $label:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| AppError::ValidationError(format!("Unknown {}: {}", $label, s)))
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimeKind {
    Tv,
    Movie,
    Ova,
    Ona,
    Special,
    TvSpecial,
    Music,
    Pv,
    Cm,
}

wire_enum!(AnimeKind, "anime kind", {
    Tv => "tv",
    Movie => "movie",
    Ova => "ova",
    Ona => "ona",
    Special => "special",
    TvSpecial => "tv_special",
    Music => "music",
    Pv => "pv",
    Cm => "cm",
});

/// Airing status as Shikimori names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimeStatus {
    Anons,
    Ongoing,
    Released,
}

wire_enum!(AnimeStatus, "anime status", {
    Anons => "anons",
    Ongoing => "ongoing",
    Released => "released",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrder {
    Id,
    Ranked,
    Kind,
    #[default]
    Popularity,
    Name,
    AiredOn,
    Episodes,
    Status,
    Random,
}

wire_enum!(SearchOrder, "order", {
    Id => "id",
    Ranked => "ranked",
    Kind => "kind",
    Popularity => "popularity",
    Name => "name",
    AiredOn => "aired_on",
    Episodes => "episodes",
    Status => "status",
    Random => "random",
});
