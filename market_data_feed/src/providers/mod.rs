//! Provider abstraction for daily bar sources.
//!
//! [`BarFeed`] is the single seam between the archive and any market-data
//! vendor. Concrete implementations (currently [`alpaca_rest`]) handle
//! vendor-specific endpoints, authentication, and pagination, and hand back
//! unvalidated [`RawBar`]s. The trait supports dynamic dispatch
//! (`dyn BarFeed`) so the vendor can be selected at runtime.

pub mod alpaca_rest;
pub mod errors;

use async_trait::async_trait;

pub use errors::{FeedInitError, FetchError};

use crate::models::{raw_bar::RawBar, request::FetchRequest};

#[async_trait]
pub trait BarFeed: Send + Sync {
    /// Fetches daily bars for the request's symbol and window.
    ///
    /// Implementations make no promises about ordering or record validity;
    /// callers must validate every returned bar.
    async fn fetch_daily(&self, request: &FetchRequest) -> Result<Vec<RawBar>, FetchError>;
}
