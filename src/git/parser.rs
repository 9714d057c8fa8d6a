use super::CommitRecord;
use crate::error::{GraderError, Result};
use chrono::DateTime;
use regex::Regex;

/// Format of the `Date:` line printed by `git show --date=default`.
pub const DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

const MERGE_PATTERN: &str = r"(?m)^Merge:\s+[0-9a-f]{7,}\s+[0-9a-f]{7,}";
const AUTHOR_PATTERN: &str = r"(?m)^Author:[ \t](.+)[ \t]<(.+)>$";
const DATE_PATTERN: &str = r"(?m)^Date:[ \t]+(.+?)[ \t]*$";
// The whole summary line, anchored at both ends. Message lines are indented
// by four spaces and per-file lines end in `| <count> ...`, so neither can
// match. Git prints the summary last.
const SUMMARY_PATTERN: &str =
    r"(?m)^ ?(\d+) files? changed(?:, (\d+) insertions?\(\+\))?(?:, (\d+) deletions?\(-\))?$";

/// Counts from the `N files changed, ...` line; absent clauses are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub files_changed: u64,
    pub insertions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedCommit {
    Merge,
    Commit(CommitRecord),
}

pub struct CommitParser {
    merge: Regex,
    author: Regex,
    date: Regex,
    summary: Regex,
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| GraderError::Pattern { name, source })
}

impl CommitParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            merge: compile("merge", MERGE_PATTERN)?,
            author: compile("author", AUTHOR_PATTERN)?,
            date: compile("date", DATE_PATTERN)?,
            summary: compile("summary", SUMMARY_PATTERN)?,
        })
    }

    /// Parses the `git show --stat` output of commit `id`.
    ///
    /// Merge commits are reported as [`ParsedCommit::Merge`] without looking
    /// at any other field. A missing author or date line is an error; missing
    /// summary clauses count as zero.
    pub fn parse(&self, id: &str, block: &str) -> Result<ParsedCommit> {
        if self.is_merge(block) {
            return Ok(ParsedCommit::Merge);
        }

        let (author_name, author_email) =
            self.author(block).ok_or_else(|| GraderError::MissingAuthor {
                commit: id.to_string(),
            })?;
        let raw_date = self.date(block).ok_or_else(|| GraderError::MissingDate {
            commit: id.to_string(),
        })?;
        let timestamp = DateTime::parse_from_str(raw_date, DATE_FORMAT).map_err(|source| {
            GraderError::InvalidDate {
                commit: id.to_string(),
                value: raw_date.to_string(),
                source,
            }
        })?;

        let summary = self.summary(block);

        Ok(ParsedCommit::Commit(CommitRecord {
            id: id.to_string(),
            author_name: author_name.to_string(),
            author_email: author_email.to_string(),
            timestamp,
            files_changed: summary.files_changed,
            insertions: summary.insertions,
            deletions: summary.deletions,
        }))
    }

    pub fn is_merge(&self, block: &str) -> bool {
        self.merge.is_match(block)
    }

    pub fn author<'a>(&self, block: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.author.captures(block)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }

    pub fn date<'a>(&self, block: &'a str) -> Option<&'a str> {
        Some(self.date.captures(block)?.get(1)?.as_str())
    }

    /// Counts from the last summary line in `block`, all zero when there is
    /// none (empty commits).
    pub fn summary(&self, block: &str) -> ChangeSummary {
        let Some(caps) = self.summary.captures_iter(block).last() else {
            return ChangeSummary::default();
        };
        let count = |group: usize| {
            caps.get(group)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };
        ChangeSummary {
            files_changed: count(1),
            insertions: count(2),
            deletions: count(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn block(summary: &str) -> String {
        format!(
            "commit 1f0c5a2e9d\n\
             Author: Ann Example <ann@x.com>\n\
             Date:   Tue Jan 9 14:32:10 2024 -0500\n\
             \n    Add parser\n\n\
             {summary}\n"
        )
    }

    fn counts(files_changed: u64, insertions: u64, deletions: u64) -> ChangeSummary {
        ChangeSummary {
            files_changed,
            insertions,
            deletions,
        }
    }

    fn parse(text: &str) -> ParsedCommit {
        CommitParser::new().unwrap().parse("1f0c5a2e9d", text).unwrap()
    }

    fn record(text: &str) -> CommitRecord {
        match parse(text) {
            ParsedCommit::Commit(record) => record,
            ParsedCommit::Merge => panic!("unexpected merge"),
        }
    }

    #[test]
    fn full_stat_line() {
        let c = record(&block(
            " src/lib.rs | 9 ++++++---\n 2 files changed, 3 insertions(+), 1 deletion(-)",
        ));
        assert_eq!(c.author_name, "Ann Example");
        assert_eq!(c.author_email, "ann@x.com");
        assert_eq!((c.files_changed, c.insertions, c.deletions), (2, 3, 1));
    }

    #[test]
    fn insertions_only() {
        let c = record(&block(" 1 file changed, 5 insertions(+)"));
        assert_eq!((c.files_changed, c.insertions, c.deletions), (1, 5, 0));
    }

    #[test]
    fn deletions_only() {
        let c = record(&block(" 1 file changed, 1 deletion(-)"));
        assert_eq!((c.files_changed, c.insertions, c.deletions), (1, 0, 1));
    }

    #[test]
    fn singular_and_plural_forms() {
        let parser = CommitParser::new().unwrap();
        let singular = " 1 file changed, 1 insertion(+), 1 deletion(-)";
        let plural = " 12 files changed, 340 insertions(+), 27 deletions(-)";

        assert_eq!(parser.summary(singular), counts(1, 1, 1));
        assert_eq!(parser.summary(plural), counts(12, 340, 27));
    }

    #[test]
    fn stat_line_without_leading_space() {
        let parser = CommitParser::new().unwrap();
        let line = "2 files changed, 3 insertions(+), 1 deletion(-)";
        assert_eq!(parser.summary(line), counts(2, 3, 1));
    }

    #[test]
    fn multi_digit_file_count() {
        let c = record(&block(" 137 files changed, 9001 insertions(+), 4096 deletions(-)"));
        assert_eq!((c.files_changed, c.insertions, c.deletions), (137, 9001, 4096));
    }

    #[test]
    fn empty_commit_has_zero_counts() {
        let c = record(&block(""));
        assert_eq!((c.files_changed, c.insertions, c.deletions), (0, 0, 0));
    }

    #[test]
    fn message_text_does_not_count() {
        let text = "commit 1f0c5a2e9d\n\
                    Author: Ann <ann@x.com>\n\
                    Date:   Tue Jan 9 14:32:10 2024 -0500\n\
                    \n    Revert: 4 files changed, 80 insertions(+), 2 deletions(-)\n\n\
                    \x20a.txt | 1 -\n\
                    \x201 file changed, 1 deletion(-)\n";
        let c = record(text);
        assert_eq!((c.files_changed, c.insertions, c.deletions), (1, 0, 1));
    }

    #[test]
    fn file_named_like_a_summary_does_not_count() {
        let c = record(&block(
            " 7 files changed | 1 +\n 1 file changed, 1 insertion(+)",
        ));
        assert_eq!((c.files_changed, c.insertions, c.deletions), (1, 1, 0));

        let c = record(&block(
            " 1 file changed, 500 insertions(+), 40 deletions(-) | 1 +\n \
             1 file changed, 1 insertion(+)",
        ));
        assert_eq!((c.files_changed, c.insertions, c.deletions), (1, 1, 0));
    }

    #[test]
    fn last_summary_line_wins() {
        let parser = CommitParser::new().unwrap();
        let text = " 2 files changed, 9 insertions(+)\n a | 1 +\n 1 file changed, 1 insertion(+)\n";
        assert_eq!(parser.summary(text), counts(1, 1, 0));
    }

    #[test]
    fn timestamp_keeps_offset() {
        let c = record(&block(" 1 file changed, 5 insertions(+)"));
        assert_eq!(c.timestamp.year(), 2024);
        assert_eq!(c.timestamp.day(), 9);
        assert_eq!(c.timestamp.hour(), 14);
        assert_eq!(c.timestamp.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn merge_commits_are_skipped() {
        let text = "commit 9a8b7c6d5e\n\
                    Merge: 1a2b3c4 5d6e7f8\n\
                    Author: Ann <ann@x.com>\n\
                    Date:   Mon Jan 1 10:00:00 2024 +0000\n\
                    \n    Merge branch 'dev'\n";
        assert_eq!(parse(text), ParsedCommit::Merge);
    }

    #[test]
    fn merge_without_author_is_still_skipped() {
        assert_eq!(parse("commit abc\nMerge: 1a2b3c4 5d6e7f8\n"), ParsedCommit::Merge);
    }

    #[test]
    fn missing_author_is_error() {
        let parser = CommitParser::new().unwrap();
        let err = parser
            .parse("deadbeef", "commit deadbeef\nDate:   Mon Jan 1 10:00:00 2024 +0000\n")
            .unwrap_err();
        assert!(matches!(err, GraderError::MissingAuthor { ref commit } if commit == "deadbeef"));
    }

    #[test]
    fn missing_date_is_error() {
        let parser = CommitParser::new().unwrap();
        let err = parser
            .parse("deadbeef", "commit deadbeef\nAuthor: Ann <ann@x.com>\n")
            .unwrap_err();
        assert!(matches!(err, GraderError::MissingDate { .. }));
    }

    #[test]
    fn malformed_date_is_error() {
        let parser = CommitParser::new().unwrap();
        let err = parser
            .parse(
                "deadbeef",
                "commit deadbeef\nAuthor: Ann <ann@x.com>\nDate:   2024-01-01T10:00:00Z\n",
            )
            .unwrap_err();
        assert!(matches!(err, GraderError::InvalidDate { .. }));
    }
}
