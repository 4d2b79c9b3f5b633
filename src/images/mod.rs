mod shutterstock;

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use std::sync::Arc;
use std::time::Duration;

pub use shutterstock::ShutterstockProvider;

/// Result type for image provider operations
pub type ImageResult<T> = Result<T, ImageError>;

/// Errors that can occur while fetching stock photos
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Search returned no images")]
    NoResults,

    #[error("Response parsing failed: {0}")]
    ParseError(String),
}

/// A stock photo as returned by a provider, before any game processing
#[derive(Debug, Clone)]
pub struct StockPhoto {
    /// Provider-side image ID
    pub id: String,
    /// URL of the largest asset the provider offered
    pub url: String,
    /// Photo title, used as the word pool for a round
    pub title: String,
    /// Credited photographer, when the provider exposes one
    pub contributor: Option<String>,
}

/// Trait that all stock photo providers must implement
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Fetch one random photo matching the given search term
    async fn fetch_random(&self, search_term: &str) -> ImageResult<StockPhoto>;

    /// Get the name of this provider
    fn name(&self) -> &str;
}

/// Search terms a round's photo is drawn from
pub const SEARCH_TERMS: &[&str] = &[
    "nature",
    "city",
    "technology",
    "business",
    "people",
    "food",
    "travel",
    "architecture",
    "abstract",
    "landscape",
    "portrait",
    "lifestyle",
    "sports",
    "animals",
    "flowers",
    "ocean",
    "mountains",
    "sunset",
    "art",
    "design",
];

/// Pick one search term at random
pub fn random_search_term<R: rand::Rng + ?Sized>(rng: &mut R) -> &'static str {
    SEARCH_TERMS[rng.random_range(0..SEARCH_TERMS.len())]
}

/// How many title words the easy variant pre-reveals as blanks
pub const EASY_MODE_HIDDEN_WORDS: usize = 3;

/// Sample the words to hide in easy mode. Titles with fewer than three
/// guessable words hide nothing and play like hard mode.
pub fn sample_hidden_words<R: rand::Rng + ?Sized>(
    rng: &mut R,
    title_words: &[String],
) -> Vec<String> {
    if title_words.len() < EASY_MODE_HIDDEN_WORDS {
        return Vec::new();
    }
    title_words
        .choose_multiple(rng, EASY_MODE_HIDDEN_WORDS)
        .cloned()
        .collect()
}

/// Configuration for the stock photo provider
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// Shutterstock access token
    pub access_token: Option<String>,
    /// Shutterstock API base URL
    pub base_url: String,
    /// Timeout for image search requests
    pub timeout: Duration,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: "https://api.shutterstock.com/v2".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ImageConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let access_token = std::env::var("SHUTTERSTOCK_ACCESS_TOKEN")
            .ok()
            .and_then(|token| {
                let trimmed = token.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            });

        let base_url = std::env::var("SHUTTERSTOCK_BASE_URL")
            .ok()
            .and_then(|url| {
                let trimmed = url.trim().trim_end_matches('/');
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| "https://api.shutterstock.com/v2".to_string());

        Self {
            access_token,
            base_url,
            timeout: std::env::var("IMAGE_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(10)),
        }
    }

    /// Build the provider, or None when no access token is configured
    pub fn build_provider(&self) -> Option<Arc<dyn ImageProvider>> {
        self.access_token.as_ref().map(|token| {
            Arc::new(ShutterstockProvider::new(
                self.base_url.clone(),
                token.clone(),
                self.timeout,
            )) as Arc<dyn ImageProvider>
        })
    }
}
