use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;

/// One bar as Alpaca's v2 bars endpoint encodes it (single-letter keys).
#[derive(Deserialize, Debug)]
pub(crate) struct AlpacaBar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: f64,
}

#[derive(Deserialize, Debug)]
pub(crate) struct AlpacaResponse {
    // Alpaca omits the map entirely for windows with no trading days.
    #[serde(default)]
    pub bars: IndexMap<String, Vec<AlpacaBar>>,
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_bars_payload() {
        let body = r#"{
            "bars": {
                "AAPL": [
                    {"t": "2024-01-02T05:00:00Z", "o": 187.15, "h": 188.44,
                     "l": 183.88, "c": 185.64, "v": 82488674.0, "n": 1009068, "vw": 185.93}
                ]
            },
            "next_page_token": null
        }"#;

        let response: AlpacaResponse = serde_json::from_str(body).unwrap();
        assert!(response.next_page_token.is_none());
        let bars = &response.bars["AAPL"];
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].timestamp.date_naive().to_string(), "2024-01-02");
        assert_eq!(bars[0].close, 185.64);
        assert_eq!(bars[0].volume, 82488674.0);
    }

    #[test]
    fn deserializes_empty_window() {
        let body = r#"{"next_page_token": null}"#;
        let response: AlpacaResponse = serde_json::from_str(body).unwrap();
        assert!(response.bars.is_empty());
    }
}
