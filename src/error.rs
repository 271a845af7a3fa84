use thiserror::Error;

use crate::models::Category;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Rejected locally, nothing was sent.
    #[error("{message}")]
    Validation { message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}{}", fmt_detail(.detail))]
    Server { status: u16, detail: Option<String> },

    #[error("failed to load glyph for {category}: {reason}")]
    AssetLoad { category: Category, reason: String },

    #[error("a sync request is already in flight")]
    Busy,

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Server-provided detail text, if the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Error::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

fn fmt_detail(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}
