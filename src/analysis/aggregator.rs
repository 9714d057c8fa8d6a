use super::*;
use crate::git::CommitRecord;
use crate::identity::IdentityResolver;
use std::collections::HashMap;
use tracing::debug;

/// Folds commit records into per-identity totals, keeping the order in which
/// identities were first seen.
pub struct Aggregator<'a> {
    resolver: &'a IdentityResolver,
    totals: Vec<AuthorTotals>,
    index: HashMap<String, usize>,
}

impl<'a> Aggregator<'a> {
    pub fn new(resolver: &'a IdentityResolver) -> Self {
        Self {
            resolver,
            totals: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn add(&mut self, commit: &CommitRecord) {
        let resolver = self.resolver;
        let key = resolver.resolve(&commit.author_email);

        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                debug!("New identity {}", key);
                self.totals.push(AuthorTotals::new(key));
                self.index.insert(key.to_string(), self.totals.len() - 1);
                self.totals.len() - 1
            }
        };

        let totals = &mut self.totals[slot];
        totals.commits += 1;
        totals.files_changed += commit.files_changed;
        totals.insertions += commit.insertions;
        totals.deletions += commit.deletions;
    }

    pub fn extend<'c>(&mut self, commits: impl IntoIterator<Item = &'c CommitRecord>) {
        for commit in commits {
            self.add(commit);
        }
    }

    pub fn finish(self) -> Vec<AuthorTotals> {
        self.totals
    }

    /// Convenience wrapper: aggregate `commits` in one go.
    pub fn aggregate(resolver: &IdentityResolver, commits: &[CommitRecord]) -> Vec<AuthorTotals> {
        let mut aggregator = Aggregator::new(resolver);
        aggregator.extend(commits);
        aggregator.finish()
    }
}
