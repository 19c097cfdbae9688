//! ngram-density: weighted n-gram keyword density for web pages
//!
//! Finds the multi-word phrases that best characterize a page. Every text
//! fragment of the page (URL path, title, meta description, headings, body)
//! is split into n-grams; each occurrence earns the fragment's source weight,
//! totals are summed across fragments, and the highest totals are reported.
//!
//! # Architecture
//!
//! ```text
//! DocumentSource → PhraseExtractor → ScoreAggregator → Ranker → Report
//!   (per fragment)   (n-gram map)       (global map)    (top N)
//! ```
//!
//! # Example
//!
//! ```
//! use ngram_density::{analyze_document, DensityConfig, StaticDocument};
//!
//! let doc = StaticDocument::new()
//!     .with_title("Rust Ownership Explained")
//!     .with_heading(1, "Rust ownership");
//! let analysis = analyze_document("https://example.com/rust", &doc, &DensityConfig::default());
//! assert_eq!(analysis.ranking[0].phrases, vec!["rust ownership"]);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod nlp;
pub mod phrase;
pub mod pipeline;
pub mod progress;
pub mod ranking;
pub mod report;
pub mod scoring;
pub mod source;
pub mod types;

pub use config::{DensityConfig, SourceWeights};
pub use error::{DensityError, Result};
pub use phrase::{extract, PhraseExtractor};
pub use pipeline::{Analysis, DocumentSource, NoopObserver, Pipeline, StaticDocument};
pub use ranking::{rank, Ranker, RankingMode};
pub use report::Report;
pub use scoring::{merge, ScoreAggregator};
pub use source::HtmlDocument;
pub use types::{ScoreGroup, ScoreMap, Source};

/// Analyse an already-loaded document.
pub fn analyze_document<D>(url: &str, doc: &D, config: &DensityConfig) -> Analysis
where
    D: DocumentSource + ?Sized,
{
    Pipeline::from_config(config).run(url, doc, &mut NoopObserver)
}

/// Fetch `url` and analyse it.
///
/// Fails only if the page cannot be fetched; a page without qualifying
/// phrases yields an empty ranking.
pub fn analyze_url(url: &str, config: &DensityConfig) -> Result<Analysis> {
    let doc = HtmlDocument::fetch(url, config.fetch_timeout())?;
    Ok(analyze_document(url, &doc, config))
}
