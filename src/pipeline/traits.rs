//! Document source boundary.
//!
//! The pipeline never fetches or parses anything itself. It reads the text
//! fragments it weights from a [`DocumentSource`], which is implemented by
//! the HTML collaborator ([`crate::source::HtmlDocument`]) and by the
//! in-memory [`StaticDocument`] used for tests and embedding.

/// Text fragments of one document, in the shape the pipeline weights them.
///
/// # Contract
///
/// - `title`: the document title, empty if absent.
/// - `meta_description`: every `<meta name="description">` `content` value,
///   space-joined.
/// - `headings(level)`: text of each heading at `level` (1..=4) in document
///   order; empty for levels outside that range.
/// - `body`: the visible body text.
pub trait DocumentSource {
    fn title(&self) -> String;

    fn meta_description(&self) -> String;

    fn headings(&self, level: u8) -> Vec<String>;

    fn body(&self) -> String;
}

/// In-memory document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticDocument {
    pub title: String,
    pub meta_description: String,
    /// Index 0 holds h1, index 3 holds h4.
    pub headings: [Vec<String>; 4],
    pub body: String,
}

impl StaticDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = description.into();
        self
    }

    /// Append a heading at `level` (1..=4). Other levels are ignored.
    pub fn with_heading(mut self, level: u8, text: impl Into<String>) -> Self {
        if let Some(slot) = heading_slot(level) {
            self.headings[slot].push(text.into());
        }
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

impl DocumentSource for StaticDocument {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn meta_description(&self) -> String {
        self.meta_description.clone()
    }

    fn headings(&self, level: u8) -> Vec<String> {
        heading_slot(level)
            .map(|slot| self.headings[slot].clone())
            .unwrap_or_default()
    }

    fn body(&self) -> String {
        self.body.clone()
    }
}

fn heading_slot(level: u8) -> Option<usize> {
    match level {
        1..=4 => Some(usize::from(level) - 1),
        _ => None,
    }
}
