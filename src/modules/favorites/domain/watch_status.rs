use crate::shared::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Watch status of a favorited anime, stored as the `watch_status` enum
#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::WatchStatus"]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    Watching,
    Completed,
    Planned,
    OnHold,
    Dropped,
}

impl WatchStatus {
    pub const ALL: [WatchStatus; 5] = [
        WatchStatus::Watching,
        WatchStatus::Completed,
        WatchStatus::Planned,
        WatchStatus::OnHold,
        WatchStatus::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Watching => "watching",
            WatchStatus::Completed => "completed",
            WatchStatus::Planned => "planned",
            WatchStatus::OnHold => "on_hold",
            WatchStatus::Dropped => "dropped",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WatchStatus::Watching => "Смотрю",
            WatchStatus::Completed => "Просмотрено",
            WatchStatus::Planned => "Запланировано",
            WatchStatus::OnHold => "Отложено",
            WatchStatus::Dropped => "Брошено",
        }
    }
}

impl Default for WatchStatus {
    fn default() -> Self {
        WatchStatus::Planned
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WatchStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| AppError::ValidationError(format!("Unknown watch status: {}", s)))
    }
}
