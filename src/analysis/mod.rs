use serde::{Deserialize, Serialize};

pub mod aggregator;

pub use aggregator::Aggregator;

/// Running totals for one resolved identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorTotals {
    pub key: String,
    pub commits: u64,
    pub files_changed: u64,
    pub insertions: u64,
    pub deletions: u64,
}

impl AuthorTotals {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn total_changes(&self) -> u64 {
        self.insertions + self.deletions
    }
}
