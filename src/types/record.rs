//! The catalog record and its builder.

use serde::{Deserialize, Serialize};

/// A single catalog entry, the unit every index and the affinity graph refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, immutable after creation.
    pub id: u64,
    /// Display title. Keys the prefix and hash indexes.
    pub title: String,
    /// Who made it (artist, author, ...).
    #[serde(default)]
    pub creator: String,
    /// The collection it belongs to (album, series, ...).
    #[serde(default)]
    pub collection: String,
    /// Release year.
    #[serde(default)]
    pub year: i32,
    /// Duration in whole seconds.
    #[serde(default)]
    pub duration_secs: u32,
    /// Ordered categories. Shared tags connect records in the affinity graph.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Rank counter. Only ever grows, through [`Record::increment_play`].
    #[serde(default)]
    pub play_count: u64,
    /// Where the underlying media lives. Opaque to the catalog.
    #[serde(default)]
    pub file_path: String,
}

impl Record {
    /// Bump the rank counter by one.
    pub fn increment_play(&mut self) {
        self.play_count = self.play_count.saturating_add(1);
    }

    /// Number of tags this record shares with `other`.
    ///
    /// Counts matching (tag, tag) pairs, so a tag repeated on one side counts
    /// once per repetition.
    pub fn shared_tag_count(&self, other: &Record) -> usize {
        self.tags
            .iter()
            .map(|t| other.tags.iter().filter(|o| *o == t).count())
            .sum()
    }

    /// Whether a non-empty creator is shared with `other`.
    pub fn same_creator(&self, other: &Record) -> bool {
        !self.creator.is_empty() && self.creator == other.creator
    }
}

/// Builder for constructing [`Record`] instances ergonomically.
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Create a new builder with the required fields.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            record: Record {
                id,
                title: title.into(),
                creator: String::new(),
                collection: String::new(),
                year: 0,
                duration_secs: 0,
                tags: Vec::new(),
                play_count: 0,
                file_path: String::new(),
            },
        }
    }

    /// Set the creator.
    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.record.creator = creator.into();
        self
    }

    /// Set the collection.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.record.collection = collection.into();
        self
    }

    /// Set the release year.
    pub fn year(mut self, year: i32) -> Self {
        self.record.year = year;
        self
    }

    /// Set the duration in seconds.
    pub fn duration_secs(mut self, secs: u32) -> Self {
        self.record.duration_secs = secs;
        self
    }

    /// Append one tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.record.tags.push(tag.into());
        self
    }

    /// Replace all tags.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the starting play count.
    pub fn play_count(mut self, count: u64) -> Self {
        self.record.play_count = count;
        self
    }

    /// Set the media path.
    pub fn file_path(mut self, path: impl Into<String>) -> Self {
        self.record.file_path = path.into();
        self
    }

    /// Build the Record.
    pub fn build(self) -> Record {
        self.record
    }
}
