use super::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Title used when the API returns an image without a description
const DEFAULT_TITLE: &str = "Beautiful Stock Photo";

/// Asset renditions in preference order, largest first
const ASSET_SIZES: [&str; 5] = ["huge", "large", "medium", "small", "preview"];

/// Shutterstock provider implementation
pub struct ShutterstockProvider {
    base_url: String,
    access_token: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl ShutterstockProvider {
    /// Create a new Shutterstock provider with the given base URL and token
    pub fn new(base_url: String, access_token: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        Self {
            base_url,
            access_token,
            timeout,
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchImage>,
}

#[derive(Debug, Deserialize)]
struct SearchImage {
    #[serde(default)]
    id: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    assets: HashMap<String, AssetUrl>,
    #[serde(default)]
    contributor: Option<Contributor>,
}

#[derive(Debug, Deserialize)]
struct AssetUrl {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Contributor {
    #[serde(default)]
    display_name: Option<String>,
}

impl SearchImage {
    /// Collapse the assets map to the largest rendition that carries a URL
    fn into_photo(self) -> ImageResult<StockPhoto> {
        let url = ASSET_SIZES
            .iter()
            .find_map(|size| self.assets.get(*size).and_then(|asset| asset.url.clone()))
            .ok_or_else(|| ImageError::ParseError("no usable asset URL".to_string()))?;

        let title = self
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Ok(StockPhoto {
            id: self.id,
            url,
            title,
            contributor: self.contributor.and_then(|c| c.display_name),
        })
    }
}

#[async_trait]
impl ImageProvider for ShutterstockProvider {
    async fn fetch_random(&self, search_term: &str) -> ImageResult<StockPhoto> {
        let url = format!("{}/images/search", self.base_url);

        let request = self
            .client
            .get(&url)
            .query(&[
                ("query", search_term),
                ("sort", "random"),
                ("per_page", "1"),
                ("view", "full"),
            ])
            .bearer_auth(&self.access_token)
            .send();

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| ImageError::Timeout(self.timeout))?
            .map_err(|e| ImageError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ImageError::ApiError(format!(
                "Shutterstock API returned status: {}",
                response.status()
            )));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| ImageError::ParseError(e.to_string()))?;

        let image = search.data.into_iter().next().ok_or(ImageError::NoResults)?;
        let photo = image.into_photo()?;

        tracing::debug!(
            "Shutterstock image {} fetched for term {:?}",
            photo.id,
            search_term
        );

        Ok(photo)
    }

    fn name(&self) -> &str {
        "shutterstock"
    }
}
