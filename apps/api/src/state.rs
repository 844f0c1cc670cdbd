use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::storage::{ObjectStore, Repository};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Typed collections over the configured key-value backend.
    pub repo: Repository,
    /// Pluggable document-to-text extractor. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
    /// Retains uploaded files when `S3_BUCKET` is configured.
    pub objects: Option<Arc<dyn ObjectStore>>,
    pub config: Config,
}
