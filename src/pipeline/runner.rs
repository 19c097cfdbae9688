//! Pipeline runner: orchestrates extraction, aggregation and ranking.
//!
//! A [`Pipeline`] reads every fragment of a document in a fixed order
//! (URL, title, metadata, headings h1..h4 in document order, body), extracts
//! weighted phrases from each, folds them into one [`ScoreAggregator`], and
//! ranks the result. The fixed order makes the floating-point totals, and
//! therefore the exact-score grouping, reproducible.

use crate::config::{DensityConfig, SourceWeights};
use crate::phrase::PhraseExtractor;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReport, STAGE_EXTRACT, STAGE_RANK,
};
use crate::pipeline::traits::DocumentSource;
use crate::pipeline::url_slice::url_fragment;
use crate::ranking::Ranker;
use crate::scoring::ScoreAggregator;
use crate::types::{ScoreGroup, ScoreMap, Source};

/// Enter a tracing span for a pipeline stage (with the `stage-spans`
/// feature). Without it this expands to nothing.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "stage-spans")]
        let _span =
            tracing::info_span!(crate::logging::span_names::PIPELINE_STAGE, stage = $name).entered();
    };
}

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// The analysed URL
    pub url: String,
    /// Global phrase totals in first-insertion order
    pub scores: ScoreMap,
    /// Top-N ranks, highest score first
    pub ranking: Vec<ScoreGroup>,
    /// Number of fragments merged
    pub fragments: usize,
}

impl Analysis {
    /// `true` when no phrase scored above the relevance floor
    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }
}

/// Extraction, weighting and ranking stages for one configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub extractor: PhraseExtractor,
    pub weights: SourceWeights,
    pub ranker: Ranker,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_config(&DensityConfig::default())
    }
}

impl Pipeline {
    /// Build a pipeline with the default weights, 4-word phrases, floor
    /// 1.0 and top 5 grouped ranks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DensityConfig) -> Self {
        Self {
            extractor: config.extractor(),
            weights: config.weights.clone(),
            ranker: config.ranker(),
        }
    }

    /// Run every stage and return the analysis.
    pub fn run<D>(&self, url: &str, doc: &D, observer: &mut impl PipelineObserver) -> Analysis
    where
        D: DocumentSource + ?Sized,
    {
        // Stage 1: extract + aggregate
        let aggregator = {
            trace_stage!(STAGE_EXTRACT);
            observer.on_stage_start(STAGE_EXTRACT);
            let clock = StageClock::start();
            let aggregator = self.accumulate(url, doc, observer);
            let report = StageReport::new(clock.elapsed(), aggregator.phrase_count());
            observer.on_stage_end(STAGE_EXTRACT, &report);
            tracing::info!(
                fragments = aggregator.fragment_count(),
                phrases = aggregator.phrase_count(),
                "accumulated phrase scores"
            );
            aggregator
        };

        // Stage 2: rank
        let ranking = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let ranking = self.ranker.rank(aggregator.scores());
            let report = StageReport::new(clock.elapsed(), ranking.len());
            observer.on_stage_end(STAGE_RANK, &report);
            observer.on_ranking(&ranking);
            ranking
        };

        let fragments = aggregator.fragment_count();
        Analysis {
            url: url.to_string(),
            scores: aggregator.into_scores(),
            ranking,
            fragments,
        }
    }

    /// Extract and merge every fragment of the document, in merge order.
    pub fn accumulate<D>(
        &self,
        url: &str,
        doc: &D,
        observer: &mut impl PipelineObserver,
    ) -> ScoreAggregator
    where
        D: DocumentSource + ?Sized,
    {
        let mut aggregator = ScoreAggregator::new();

        let path = match url_fragment(url) {
            Some(path) => path,
            None => {
                tracing::warn!(url, "url has no path segment; skipping url phrases");
                ""
            }
        };
        self.ingest(&mut aggregator, Source::Url, path, observer);

        self.ingest(&mut aggregator, Source::Title, &doc.title(), observer);
        self.ingest(&mut aggregator, Source::Metadata, &doc.meta_description(), observer);

        for level in Source::HEADING_LEVELS {
            for heading in doc.headings(level) {
                self.ingest(&mut aggregator, Source::Heading(level), &heading, observer);
            }
        }

        self.ingest(&mut aggregator, Source::Body, &doc.body(), observer);

        aggregator
    }

    fn ingest(
        &self,
        aggregator: &mut ScoreAggregator,
        source: Source,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) {
        let weight = self.weights.weight_for(source);
        let fragment = self.extractor.extract(text, weight);
        observer.on_fragment(source, &fragment);
        aggregator.merge_from(source, &fragment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::observer::NoopObserver;
    use crate::pipeline::traits::StaticDocument;

    #[derive(Default)]
    struct Recorder {
        stages: Vec<(&'static str, bool)>,
        sources: Vec<Source>,
        ranks: usize,
    }

    impl PipelineObserver for Recorder {
        fn on_stage_start(&mut self, stage: &'static str) {
            self.stages.push((stage, true));
        }

        fn on_stage_end(&mut self, stage: &'static str, _report: &StageReport) {
            self.stages.push((stage, false));
        }

        fn on_fragment(&mut self, source: Source, _phrases: &ScoreMap) {
            self.sources.push(source);
        }

        fn on_ranking(&mut self, groups: &[ScoreGroup]) {
            self.ranks = groups.len();
        }
    }

    fn sample_doc() -> StaticDocument {
        StaticDocument::new()
            .with_title("Rust Ownership Explained")
            .with_meta_description("A guide to rust ownership and borrowing")
            .with_heading(1, "Rust ownership")
            .with_heading(2, "Borrowing rules")
            .with_heading(4, "Further reading")
            .with_body("Rust ownership is the core idea. Borrowing rules follow from it.")
    }

    #[test]
    fn test_fragments_visited_in_merge_order() {
        let mut rec = Recorder::default();
        let analysis = Pipeline::new().run("https://example.com/rust/ownership", &sample_doc(), &mut rec);

        assert_eq!(
            rec.sources,
            vec![
                Source::Url,
                Source::Title,
                Source::Metadata,
                Source::Heading(1),
                Source::Heading(2),
                Source::Heading(4),
                Source::Body,
            ]
        );
        assert_eq!(analysis.fragments, 7);
        assert_eq!(
            rec.stages,
            vec![
                (STAGE_EXTRACT, true),
                (STAGE_EXTRACT, false),
                (STAGE_RANK, true),
                (STAGE_RANK, false),
            ]
        );
        assert_eq!(rec.ranks, analysis.ranking.len());
    }

    #[test]
    fn test_weighted_totals() {
        let analysis = Pipeline::new().run("https://example.com/rust/ownership", &sample_doc(), &mut NoopObserver);

        // url 2.0 + title 3.5 + metadata 3.0 + h1 1.0 + body 0.01
        let expected = 2.0 + 3.5 + 3.0 + 1.0 + 0.01;
        assert_eq!(analysis.scores.get("rust ownership"), Some(expected));
        assert_eq!(analysis.ranking[0].score, expected);
        assert_eq!(analysis.ranking[0].phrases, vec!["rust ownership"]);

        // h2 0.5 + body 0.01 stays below the floor
        assert_eq!(analysis.scores.get("borrowing rules"), Some(0.5 + 0.01));
        assert!(analysis
            .ranking
            .iter()
            .all(|g| !g.phrases.iter().any(|p| p == "borrowing rules")));
    }

    #[test]
    fn test_url_without_path_contributes_nothing() {
        let doc = StaticDocument::new();
        let agg = Pipeline::new().accumulate("http://example.com", &doc, &mut NoopObserver);

        assert!(agg.is_empty());
        // url, title, metadata, body
        assert_eq!(agg.fragment_count(), 4);
    }

    #[test]
    fn test_url_phrases_weighted() {
        let doc = StaticDocument::new();
        let agg = Pipeline::new().accumulate(
            "http://example.com/deep-learning/intro?page=2",
            &doc,
            &mut NoopObserver,
        );

        assert_eq!(agg.scores().get("deep learning"), Some(2.0));
        assert_eq!(agg.scores().get("learning intro"), Some(2.0));
        assert_eq!(agg.scores().get("deep learning intro"), Some(2.0));
        assert!(!agg.scores().contains("intro page"));
    }

    #[test]
    fn test_empty_document_yields_empty_ranking() {
        let analysis = Pipeline::new().run("not a url", &StaticDocument::new(), &mut NoopObserver);
        assert!(analysis.is_empty());
        assert!(analysis.scores.is_empty());
    }

    #[test]
    fn test_dyn_document_source() {
        let doc: Box<dyn DocumentSource> = Box::new(sample_doc());
        let analysis = Pipeline::new().run("https://example.com/", doc.as_ref(), &mut NoopObserver);
        assert!(!analysis.is_empty());
    }

    #[cfg(feature = "stage-spans")]
    #[test]
    fn test_stage_spans_wrap_stage_events() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            Pipeline::new().run("https://example.com/rust/ownership", &sample_doc(), &mut NoopObserver);
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("pipeline_stage"), "{output}");
        assert!(output.contains("accumulated phrase scores"), "{output}");
    }

    #[test]
    fn test_run_is_idempotent() {
        let pipeline = Pipeline::new();
        let doc = sample_doc();
        let a = pipeline.run("https://example.com/rust/ownership", &doc, &mut NoopObserver);
        let b = pipeline.run("https://example.com/rust/ownership", &doc, &mut NoopObserver);
        assert_eq!(a, b);
    }
}
