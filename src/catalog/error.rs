//! Error handling for catalog requests.

use thiserror::Error;

/// Every way a catalog request can fail.
///
/// The gallery does not distinguish between these: any failure is logged and
/// the request is treated as having produced nothing.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("catalog responded with {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode catalog response")]
    Decode(#[source] serde_json::Error),
    #[error("invalid access key header")]
    InvalidHeader(#[source] reqwest::header::InvalidHeaderValue),
}
