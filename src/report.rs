//! Public-facing formatted output.
//!
//! A [`Report`] is the stable view of an [`Analysis`]: numbered ranks, each
//! with its relevance and keyword list. It renders as a fixed-width text
//! table for the console or as JSON.

use std::fmt::Write as _;

use serde::Serialize;

use crate::pipeline::Analysis;

/// Printed when nothing scored above the relevance floor.
pub const NO_KEYWORDS: &str = "No keywords found.";

const FOOTER: &[&str] = &[
    "- Higher the rank, the most relevant is the keyword",
    "- Relevance is relative",
    "- The list of keywords are comma separated",
];

/// One ranked line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    /// 1-based rank
    pub rank: usize,
    pub relevance: f64,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub url: String,
    /// Distinct phrases seen across all fragments
    pub phrase_count: usize,
    pub fragment_count: usize,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let entries = analysis
            .ranking
            .iter()
            .enumerate()
            .map(|(i, group)| ReportEntry {
                rank: i + 1,
                relevance: group.score,
                keywords: group.phrases.clone(),
            })
            .collect();

        Self {
            url: analysis.url.clone(),
            phrase_count: analysis.scores.len(),
            fragment_count: analysis.fragments,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the fixed-width console table.
    pub fn render_table(&self) -> String {
        if self.is_empty() {
            return format!("{NO_KEYWORDS}\n");
        }

        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "{:<6}{:<12}{}", "Rank", "Relevance", "Keywords");
        let _ = writeln!(out, "{:<6}{:<12}{}", "----", "---------", "--------");
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "{:<6}{:<12}{}",
                entry.rank,
                format!("{:.3}", entry.relevance),
                entry.keywords.join(", ")
            );
        }
        out.push('\n');
        for line in FOOTER {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
