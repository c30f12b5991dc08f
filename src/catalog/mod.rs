/// Remote photo catalog
///
/// This module talks to the Unsplash REST API:
/// - Browsing the editorial feed one page at a time (client.rs)
/// - Searching photos by free text (client.rs)
/// - Wire records as returned by the API (types.rs)
/// - A single error type for every failure kind (error.rs)

pub mod client;
pub mod error;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use types::RawImage;
