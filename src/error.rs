use std::path::PathBuf;

use crate::model::DocumentId;

#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    #[error("NotFound: no document named {0}")]
    NotFound(String),
    #[error("InvalidPage: page {logical} of {document} with offset {offset} is before the first page")]
    InvalidPage {
        document: DocumentId,
        logical: u32,
        offset: i32,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content payload {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse content payload")]
    Parse(#[from] serde_json::Error),
}
