use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;

use super::error::CatalogError;
use super::types::{self, RawImage};
use crate::config::GalleryConfig;

/// Client for the remote photo catalog.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted, so
/// each background task gets its own handle.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    api_base: String,
    per_page: u32,
}

impl CatalogClient {
    /// Build a client whose requests all carry the configured access key.
    pub fn new(config: &GalleryConfig) -> Result<Self, CatalogError> {
        let http = build_http_client(config.access_key.as_deref())?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            per_page: config.per_page,
        })
    }

    /// Fetch one page of the editorial feed.
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<RawImage>, CatalogError> {
        let url = format!("{}/photos", self.api_base);
        let request = self.http.get(&url).query(&[
            ("page", page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]);

        let body = send(request, &url).await?;
        let images = types::parse_page(&body)?;
        debug!(page, count = images.len(), "fetched catalog page");
        Ok(images)
    }

    /// Fetch one page of search results for `term`.
    pub async fn fetch_search(&self, term: &str, page: u32) -> Result<Vec<RawImage>, CatalogError> {
        let url = format!("{}/search/photos", self.api_base);
        let request = self
            .http
            .get(&url)
            .query(&[("page", page.to_string()), ("query", term.to_string())]);

        let body = send(request, &url).await?;
        let images = types::parse_search(&body)?;
        debug!(term, page, count = images.len(), "fetched search results");
        Ok(images)
    }

    /// Download the raw bytes of an image asset.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| CatalogError::Request { url: url.to_string(), source })?;
        let response = check_status(response, url)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|source| CatalogError::Request { url: url.to_string(), source })?;
        Ok(bytes.to_vec())
    }
}

async fn send(request: reqwest::RequestBuilder, url: &str) -> Result<String, CatalogError> {
    let response = request
        .send()
        .await
        .map_err(|source| CatalogError::Request { url: url.to_string(), source })?;
    let response = check_status(response, url)?;

    response
        .text()
        .await
        .map_err(|source| CatalogError::Request { url: url.to_string(), source })
}

fn check_status(response: reqwest::Response, url: &str) -> Result<reqwest::Response, CatalogError> {
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status { url: url.to_string(), status });
    }
    Ok(response)
}

fn build_http_client(access_key: Option<&str>) -> Result<reqwest::Client, CatalogError> {
    let mut headers = HeaderMap::new();
    headers.insert("accept-version", HeaderValue::from_static("v1"));

    if let Some(key) = access_key {
        headers.insert(
            header::AUTHORIZATION,
            authorization_header(key)?,
        );
    }

    debug!(
        authenticated = access_key.is_some(),
        "building catalog http client"
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|source| CatalogError::Request { url: String::new(), source })
}

fn authorization_header(access_key: &str) -> Result<HeaderValue, CatalogError> {
    let mut value = HeaderValue::from_str(&format!("Client-ID {access_key}"))
        .map_err(CatalogError::InvalidHeader)?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer) -> CatalogClient {
        let config = GalleryConfig {
            access_key: Some("test-key".to_string()),
            api_base: server.base_url(),
            ..GalleryConfig::default()
        };
        CatalogClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_page_sends_paging_and_auth() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/photos")
                    .query_param("page", "2")
                    .query_param("per_page", "10")
                    .header("authorization", "Client-ID test-key")
                    .header("accept-version", "v1");
                then.status(200).json_body(json!([
                    {
                        "urls": { "regular": "https://images.example/fox.jpg" },
                        "description": "Red Fox",
                        "categories": [{ "title": "Nature" }]
                    },
                    {}
                ]));
            })
            .await;

        let images = client_for(&server).fetch_page(2).await.unwrap();

        mock.assert_async().await;
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].regular_url(), Some("https://images.example/fox.jpg"));
        assert_eq!(images[0].first_category(), Some("Nature"));
        assert_eq!(images[1].regular_url(), None);
    }

    #[tokio::test]
    async fn test_fetch_search_unwraps_results() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search/photos")
                    .query_param("page", "1")
                    .query_param("query", "red fox")
                    .header("authorization", "Client-ID test-key");
                then.status(200).json_body(json!({
                    "total": 1,
                    "total_pages": 1,
                    "results": [{ "urls": { "regular": "https://images.example/fox.jpg" } }]
                }));
            })
            .await;

        let images = client_for(&server).fetch_search("red fox", 1).await.unwrap();

        mock.assert_async().await;
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].regular_url(), Some("https://images.example/fox.jpg"));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/photos");
                then.status(401).body("OAuth error: The access token is invalid");
            })
            .await;

        let result = client_for(&server).fetch_page(1).await;

        match result {
            Err(CatalogError::Status { status, url }) => {
                assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
                assert!(url.ends_with("/photos"));
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/photos");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let result = client_for(&server).fetch_page(1).await;

        assert!(matches!(result, Err(CatalogError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_bytes_returns_body_and_checks_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/fox.jpg");
                then.status(200).body([1u8, 2, 3]);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing.jpg");
                then.status(404);
            })
            .await;

        let client = client_for(&server);

        assert_eq!(client.fetch_bytes(&server.url("/fox.jpg")).await.unwrap(), [1u8, 2, 3]);
        assert!(matches!(
            client.fetch_bytes(&server.url("/missing.jpg")).await,
            Err(CatalogError::Status { .. })
        ));
    }

    #[test]
    fn test_authorization_header_format() {
        let value = authorization_header("abc123").unwrap();
        assert_eq!(value.to_str().unwrap(), "Client-ID abc123");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_authorization_header_rejects_newlines() {
        let result = authorization_header("abc\n123");
        assert!(matches!(result, Err(CatalogError::InvalidHeader(_))));
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let config = GalleryConfig {
            api_base: "https://api.example.com/".to_string(),
            ..GalleryConfig::default()
        };

        let client = CatalogClient::new(&config).unwrap();

        assert_eq!(client.api_base, "https://api.example.com");
        assert_eq!(client.per_page, 10);
    }
}
