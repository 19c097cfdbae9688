//! Document sources
//!
//! Concrete [`DocumentSource`](crate::pipeline::DocumentSource)
//! implementations backed by real documents.

pub mod html;

pub use html::HtmlDocument;
