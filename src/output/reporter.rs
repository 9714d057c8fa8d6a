use super::*;
use crate::analysis::AuthorTotals;
use crate::config::OutputConfig;
use crate::git::Author;
use colored::*;

const KEY_TITLE: &str = "Email";
const LISTING_RULE_WIDTH: usize = 40;
const NUMERIC_COLUMNS: [Column; 5] = [
    Column::new("Commits", 7, Align::Right),
    Column::new("Files", 5, Align::Right),
    Column::new("Inserts", 7, Align::Right),
    Column::new("Deletes", 7, Align::Right),
    Column::new("Total", 7, Align::Right),
];

pub struct Reporter {
    name_width: usize,
    gap: String,
}

impl Reporter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            name_width: config.name_width,
            gap: " ".repeat(config.column_gap),
        }
    }

    /// Prints the identity listing (only when no mapping is in effect) and
    /// the totals table.
    pub fn print(&self, authors: &[Author], totals: &[AuthorTotals], mapped: bool) {
        if !mapped {
            print!("{}", self.render_authors(authors));
        }
        let table = self.render_table(totals);
        let (header, body) = table.split_once('\n').unwrap_or((table.as_str(), ""));
        println!("{}", header.bold());
        print!("{body}");
    }

    pub fn render_authors(&self, authors: &[Author]) -> String {
        let mut out = String::from("Authors\n");
        out.push_str(&"-".repeat(LISTING_RULE_WIDTH));
        out.push('\n');
        for author in authors {
            out.push_str(&format!(
                "{:<width$} {}\n",
                author.name,
                author.email,
                width = self.name_width
            ));
        }
        out.push('\n');
        out
    }

    pub fn render_table(&self, totals: &[AuthorTotals]) -> String {
        let mut out = self.table_lines(totals).join("\n");
        out.push('\n');
        out
    }

    fn table_lines(&self, totals: &[AuthorTotals]) -> Vec<String> {
        let key_width = totals
            .iter()
            .map(|t| t.key.chars().count())
            .max()
            .unwrap_or(0)
            .max(KEY_TITLE.len());

        let mut columns = vec![Column::new(KEY_TITLE, key_width, Align::Left)];
        columns.extend(NUMERIC_COLUMNS);

        let mut lines = Vec::with_capacity(totals.len() + 2);
        lines.push(self.join(columns.iter().map(|c| c.pad(c.title))));
        lines.push(self.join(columns.iter().map(Column::rule)));

        for row in totals {
            let cells = [
                row.key.clone(),
                row.commits.to_string(),
                row.files_changed.to_string(),
                row.insertions.to_string(),
                row.deletions.to_string(),
                row.total_changes().to_string(),
            ];
            lines.push(self.join(columns.iter().zip(&cells).map(|(c, v)| c.pad(v))));
        }

        lines
    }

    fn join(&self, cells: impl Iterator<Item = String>) -> String {
        cells
            .collect::<Vec<_>>()
            .join(&self.gap)
            .trim_end()
            .to_string()
    }
}
