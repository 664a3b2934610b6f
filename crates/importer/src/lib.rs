pub mod batch;
pub mod catalog;
pub mod error;
pub mod notes;
pub mod pipeline;

pub use error::{ImporterError, Result};
pub use pipeline::{IngestReport, RawPredictionProcessor};
