//! Orderings over records, used by the priority selector and sorted listings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Record;

/// The record field an ordering ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Rank counter.
    PlayCount,
    /// Release year.
    Year,
    /// Duration in seconds.
    Duration,
    /// Title, byte-wise.
    Title,
    /// Record identifier.
    Id,
}

impl SortKey {
    /// Return a human-readable name for this key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlayCount => "plays",
            Self::Year => "year",
            Self::Duration => "duration",
            Self::Title => "title",
            Self::Id => "id",
        }
    }

    /// Parse a key from a string name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "plays" | "play_count" | "playcount" => Some(Self::PlayCount),
            "year" => Some(Self::Year),
            "duration" | "duration_secs" => Some(Self::Duration),
            "title" => Some(Self::Title),
            "id" => Some(Self::Id),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which end of the key comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A total order over records: a key, a direction, and ascending id as tiebreak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl RecordOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Highest play count first.
    pub fn most_played() -> Self {
        Self::new(SortKey::PlayCount, SortDirection::Descending)
    }

    /// Lowest play count first.
    pub fn least_played() -> Self {
        Self::new(SortKey::PlayCount, SortDirection::Ascending)
    }

    /// Most recent year first.
    pub fn newest() -> Self {
        Self::new(SortKey::Year, SortDirection::Descending)
    }

    /// Alphabetical by title.
    pub fn by_title() -> Self {
        Self::new(SortKey::Title, SortDirection::Ascending)
    }

    /// Compare two records. `Less` means `a` ranks before `b`.
    ///
    /// Records equal on the key are ordered by ascending id regardless of
    /// direction, so the order is total for records with distinct ids.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let by_key = match self.key {
            SortKey::PlayCount => a.play_count.cmp(&b.play_count),
            SortKey::Year => a.year.cmp(&b.year),
            SortKey::Duration => a.duration_secs.cmp(&b.duration_secs),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Id => a.id.cmp(&b.id),
        };
        let by_key = match self.direction {
            SortDirection::Ascending => by_key,
            SortDirection::Descending => by_key.reverse(),
        };
        by_key.then_with(|| a.id.cmp(&b.id))
    }
}

impl Default for RecordOrder {
    fn default() -> Self {
        Self::least_played()
    }
}
