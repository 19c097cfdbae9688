//! HTML document source
//!
//! Parses a page with `scraper` and exposes the fragments the pipeline
//! weights: title, meta description, headings h1..h4 and body text. Text is
//! whitespace-normalized the way a browser would render it inline.

use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{DensityError, Result};
use crate::pipeline::traits::DocumentSource;

/// Elements whose text is never rendered
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that break the flow of text; their content never runs into a
/// neighbour's
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// A fetched or parsed HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlDocument {
    title: String,
    meta_description: String,
    /// Index 0 holds h1, index 3 holds h4
    headings: [Vec<String>; 4],
    body: String,
}

impl HtmlDocument {
    /// Extract fragments from an HTML string
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        let title = select_first_text(&document, "title").unwrap_or_default();

        let meta_description = select(&document, "meta[name=\"description\"]")
            .iter()
            .filter_map(|el| el.value().attr("content"))
            .collect::<Vec<_>>()
            .join(" ");

        let headings = [1u8, 2, 3, 4].map(|level| {
            select(&document, &format!("h{level}"))
                .iter()
                .map(visible_text)
                .collect::<Vec<String>>()
        });

        let body = select(&document, "body")
            .first()
            .map(visible_text)
            .unwrap_or_default();

        Self {
            title,
            meta_description,
            headings,
            body,
        }
    }

    /// Fetch `url` and parse the response body
    ///
    /// Only `http` and `https` URLs are accepted. Transport errors, non-2xx
    /// statuses and timeouts all surface as
    /// [`DensityError::SourceUnavailable`].
    pub fn fetch(url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| DensityError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DensityError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ngram-density/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DensityError::source_unavailable(url, e))?;

        tracing::debug!(url, timeout_ms = timeout.as_millis() as u64, "fetching document");
        let html = client
            .get(parsed)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| DensityError::source_unavailable(url, e))?;
        tracing::info!(url, bytes = html.len(), "fetched document");

        Ok(Self::parse(&html))
    }
}

impl DocumentSource for HtmlDocument {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn meta_description(&self) -> String {
        self.meta_description.clone()
    }

    fn headings(&self, level: u8) -> Vec<String> {
        match level {
            1..=4 => self.headings[usize::from(level) - 1].clone(),
            _ => Vec::new(),
        }
    }

    fn body(&self) -> String {
        self.body.clone()
    }
}

fn select<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(e) => {
            tracing::error!(css, error = ?e, "invalid selector");
            Vec::new()
        }
    }
}

fn select_first_text(document: &Html, css: &str) -> Option<String> {
    select(document, css).first().map(|el| normalize(el.text()))
}

/// Concatenate text nodes, then collapse whitespace runs to single spaces
///
/// Inline markup never splits a word: `Ow<em>n</em>ership` reads as
/// `Ownership`.
fn normalize<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    collapse_whitespace(&parts.collect::<String>())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rendered text of an element, skipping script/style content
///
/// Block-level elements start and end a word; inline elements do not.
fn visible_text(root: &ElementRef<'_>) -> String {
    let mut text = String::new();
    push_visible(*root, &mut text);
    collapse_whitespace(&text)
}

fn push_visible(element: ElementRef<'_>, out: &mut String) {
    let block = BLOCK_ELEMENTS.contains(&element.value().name());
    if block {
        out.push(' ');
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            if !HIDDEN_ELEMENTS.contains(&child.value().name()) {
                push_visible(child, out);
            }
        }
    }
    if block {
        out.push(' ');
    }
}
