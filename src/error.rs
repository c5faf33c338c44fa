use thiserror::Error;

use crate::parse::ParseError;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Couldn't get the URL for {0}")]
    ResourceNotFound(String),

    #[error("Invalid document URL {fragment:?}: {source}")]
    InvalidDocumentUrl {
        fragment: String,
        source: url::ParseError,
    },

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode PDF: {0}")]
    Decode(#[from] lopdf::Error),

    #[error("Page {0} not found in document")]
    PageNotFound(u32),

    #[error("Menu parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, MenuError>;
