//! Wire records returned by the catalog API.
//!
//! Every field is optional so that one malformed record never fails a whole
//! page. Normalization into [`crate::state::data::Image`] happens later, on
//! the ingestion path that needs it.

use serde::Deserialize;

use super::error::CatalogError;

/// A photo as the catalog describes it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub urls: Option<ImageUrls>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<CategoryTag>>,
}

/// The rendition URLs of a photo. Only `regular` is used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageUrls {
    #[serde(default)]
    pub regular: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategoryTag {
    #[serde(default)]
    pub title: String,
}

impl RawImage {
    /// URL of the regular-sized rendition, if the record carries one.
    pub fn regular_url(&self) -> Option<&str> {
        self.urls.as_ref()?.regular.as_deref()
    }

    /// Title of the first category, if the record has a non-empty category list.
    pub fn first_category(&self) -> Option<&str> {
        self.categories
            .as_ref()?
            .first()
            .map(|tag| tag.title.as_str())
    }
}

/// Envelope of a search response. Only the first page of `results` is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<RawImage>,
}

/// Decode the body of a browse request (a bare JSON array).
pub fn parse_page(body: &str) -> Result<Vec<RawImage>, CatalogError> {
    serde_json::from_str(body).map_err(CatalogError::Decode)
}

/// Decode the body of a search request and unwrap its `results`.
pub fn parse_search(body: &str) -> Result<Vec<RawImage>, CatalogError> {
    serde_json::from_str::<SearchResponse>(body)
        .map(|response| response.results)
        .map_err(CatalogError::Decode)
}
