use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub mod command;
pub mod parser;
pub mod walker;

pub use command::{GitCli, GitRunner};
pub use parser::{CommitParser, ParsedCommit};
pub use walker::RepositoryWalker;

/// One non-merge commit as reported by `git show --stat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub timestamp: DateTime<FixedOffset>,
    pub files_changed: u64,
    pub insertions: u64,
    pub deletions: u64,
}

impl fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} <{}> @ {}: {} +{} -{}",
            self.id,
            self.author_name,
            self.author_email,
            self.timestamp,
            self.files_changed,
            self.insertions,
            self.deletions
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

/// Everything collected from the walked repositories.
#[derive(Debug, Default)]
pub struct History {
    pub commits: Vec<CommitRecord>,
    pub authors: Vec<Author>,
    seen: HashSet<Author>,
}

impl History {
    pub fn push(&mut self, commit: CommitRecord) {
        let author = Author {
            name: commit.author_name.clone(),
            email: commit.author_email.clone(),
        };
        if self.seen.insert(author.clone()) {
            self.authors.push(author);
        }
        self.commits.push(commit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(id: &str, name: &str, email: &str) -> CommitRecord {
        CommitRecord {
            id: id.to_string(),
            author_name: name.to_string(),
            author_email: email.to_string(),
            timestamp: DateTime::parse_from_rfc3339("2024-01-09T14:32:10-05:00").unwrap(),
            files_changed: 2,
            insertions: 10,
            deletions: 3,
        }
    }

    #[test]
    fn history_keeps_distinct_authors_in_first_seen_order() {
        let mut history = History::default();
        history.push(commit("c1", "Ann", "ann@x.com"));
        history.push(commit("c2", "Bob", "bob@x.com"));
        history.push(commit("c3", "Ann", "ann@x.com"));
        history.push(commit("c4", "Ann B.", "ann@x.com"));

        assert_eq!(history.commits.len(), 4);
        let authors: Vec<_> = history
            .authors
            .iter()
            .map(|a| (a.name.as_str(), a.email.as_str()))
            .collect();
        assert_eq!(
            authors,
            vec![
                ("Ann", "ann@x.com"),
                ("Bob", "bob@x.com"),
                ("Ann B.", "ann@x.com"),
            ]
        );
    }

    #[test]
    fn display_is_one_line_summary() {
        let line = commit("abc123", "Ann", "ann@x.com").to_string();
        assert_eq!(line, "abc123: Ann <ann@x.com> @ 2024-01-09 14:32:10 -05:00: 2 +10 -3");
    }
}
