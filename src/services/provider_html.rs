// SPDX-License-Identifier: MIT

//! HTML-table provider adapter.
//!
//! Some timing providers answer a bib lookup with a full HTML page whose
//! first `<table>` lists one row per checkpoint. Column order contract:
//! column 0 = checkpoint label/code, column 1 = elapsed time, column 2 =
//! pass time, column 3 = pace. Missing cells default to empty strings and
//! one bad row never aborts the parse.

use crate::models::CheckpointRecord;
use crate::services::provider::{ProviderAdapter, ProviderFeed};
use regex::Regex;

pub struct HtmlTableAdapter {
    table_re: Regex,
    row_re: Regex,
    cell_re: Regex,
    header_cell_re: Regex,
    tag_re: Regex,
    name_re: Regex,
}

impl HtmlTableAdapter {
    pub fn new() -> Self {
        Self {
            table_re: Regex::new(r"(?is)<table[^>]*>(.*?)</table>").expect("valid regex"),
            row_re: Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("valid regex"),
            cell_re: Regex::new(r"(?is)<t[dh][^>]*>(.*?)</t[dh]>").expect("valid regex"),
            header_cell_re: Regex::new(r"(?i)<th[\s>]").expect("valid regex"),
            tag_re: Regex::new(r"(?is)<[^>]*>").expect("valid regex"),
            name_re: Regex::new(
                r#"(?is)class\s*=\s*"[^"]*\b(?:runner-)?name\b[^"]*"[^>]*>(.*?)</"#,
            )
            .expect("valid regex"),
        }
    }

    /// Strip markup and collapse entity spaces out of a cell.
    fn cell_text(&self, raw: &str) -> String {
        self.tag_re
            .replace_all(raw, "")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .trim()
            .to_string()
    }
}

impl Default for HtmlTableAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for HtmlTableAdapter {
    fn parse(&self, body: &str) -> ProviderFeed {
        let runner_name = self
            .name_re
            .captures(body)
            .map(|c| self.cell_text(&c[1]))
            .filter(|n| !n.is_empty());

        let Some(table) = self.table_re.captures(body) else {
            tracing::debug!("No table element in provider response");
            return ProviderFeed {
                runner_name,
                records: Vec::new(),
            };
        };

        let mut records = Vec::new();
        for row in self.row_re.captures_iter(&table[1]) {
            let row_html = &row[1];

            // Header rows carry <th> cells
            if self.header_cell_re.is_match(row_html) {
                continue;
            }

            let cells: Vec<String> = self
                .cell_re
                .captures_iter(row_html)
                .map(|c| self.cell_text(&c[1]))
                .collect();
            if cells.is_empty() {
                continue;
            }

            let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
            let point = cell(0);
            let time = cell(1);

            records.push(CheckpointRecord {
                code: point.clone(),
                label: point,
                raw_time: time,
            });
        }

        ProviderFeed {
            runner_name,
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_data_row() {
        let adapter = HtmlTableAdapter::new();
        let html = "<html><body><table>\
            <tr><th>POINT</th><th>TIME</th><th>PASS TIME</th><th>PACE</th></tr>\
            <tr><td>5km</td><td>00:25:00</td><td>09:25:00</td><td>05:00</td></tr>\
            </table></body></html>";

        let feed = adapter.parse(html);
        assert_eq!(feed.records.len(), 1);
        assert_eq!(feed.records[0].label, "5km");
        assert_eq!(feed.records[0].raw_time, "00:25:00");
    }

    #[test]
    fn test_missing_cells_default_to_empty() {
        let adapter = HtmlTableAdapter::new();
        let html = "<table><tr><td>10km</td></tr></table>";

        let feed = adapter.parse(html);
        assert_eq!(feed.records.len(), 1);
        assert_eq!(feed.records[0].raw_time, "");
    }

    #[test]
    fn test_no_table_yields_empty_feed() {
        let adapter = HtmlTableAdapter::new();
        let feed = adapter.parse("<html><body>not found</body></html>");
        assert!(feed.records.is_empty());
    }

    #[test]
    fn test_scrapes_runner_name() {
        let adapter = HtmlTableAdapter::new();
        let html = r#"<div class="runner-name">Hong Gildong</div><table></table>"#;
        let feed = adapter.parse(html);
        assert_eq!(feed.runner_name.as_deref(), Some("Hong Gildong"));
    }
}
