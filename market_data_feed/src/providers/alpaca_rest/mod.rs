//! Alpaca Market Data REST provider for daily stock bars.

mod params;
mod response;

use async_trait::async_trait;
use reqwest::{Client, header};
use secrecy::ExposeSecret;

use crate::{
    credentials::AlpacaCredentials,
    models::{raw_bar::RawBar, request::FetchRequest},
    providers::{BarFeed, FeedInitError, FetchError},
};

use params::construct_params;
use response::AlpacaResponse;

const BASE_URL: &str = "https://data.alpaca.markets/v2/stocks/bars";

/// Daily-bar feed backed by Alpaca's historical stock bars endpoint.
pub struct AlpacaFeed {
    client: Client,
}

impl AlpacaFeed {
    /// Creates a new Alpaca feed authenticated with the given credentials.
    ///
    /// The API keys are baked into the client's default headers; every
    /// request made through this feed carries them.
    pub fn new(credentials: &AlpacaCredentials) -> Result<Self, FeedInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            header::HeaderValue::from_str(credentials.api_key.expose_secret())?,
        );
        headers.insert(
            "APCA-API-SECRET-KEY",
            header::HeaderValue::from_str(credentials.secret_key.expose_secret())?,
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl BarFeed for AlpacaFeed {
    async fn fetch_daily(&self, request: &FetchRequest) -> Result<Vec<RawBar>, FetchError> {
        let mut raw_bars = Vec::new();
        let mut next_page_token: Option<String> = None;

        loop {
            let mut query_params = construct_params(request);
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            let response = self
                .client
                .get(BASE_URL)
                .query(&query_params)
                .send()
                .await?;

            if !response.status().is_success() {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return Err(FetchError::Api(error_msg));
            }

            let alpaca_response = response.json::<AlpacaResponse>().await?;

            for (symbol, bars) in alpaca_response.bars {
                raw_bars.extend(bars.into_iter().map(|ab| RawBar {
                    symbol: symbol.clone(),
                    date: ab.timestamp.date_naive().format("%Y-%m-%d").to_string(),
                    open: ab.open,
                    high: ab.high,
                    low: ab.low,
                    close: ab.close,
                    volume: ab.volume,
                }));
            }

            // Follow the pagination token until the last page.
            if let Some(token) = alpaca_response.next_page_token {
                next_page_token = Some(token);
            } else {
                break;
            }
        }

        Ok(raw_bars)
    }
}
