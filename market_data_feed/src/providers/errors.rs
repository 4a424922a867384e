use thiserror::Error;

/// Errors that can occur while fetching bars from a provider.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An error during the API request itself (network failure, timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider's API returned an error response (e.g., invalid API key).
    #[error("API error: {0}")]
    Api(String),
}

/// Errors that can occur while constructing a provider.
#[derive(Debug, Error)]
pub enum FeedInitError {
    /// A credential contained bytes that cannot be sent as an HTTP header.
    #[error("API credential is not a valid header value")]
    InvalidCredential(#[from] reqwest::header::InvalidHeaderValue),

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
