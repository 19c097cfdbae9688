//! Analysis pipeline
//!
//! Composes extraction, aggregation and ranking over a [`DocumentSource`].

pub mod observer;
pub mod runner;
pub mod traits;
pub mod url_slice;

pub use observer::{NoopObserver, PipelineObserver};
pub use runner::{Analysis, Pipeline};
pub use traits::{DocumentSource, StaticDocument};
pub use url_slice::{nth_index_of, url_fragment};
