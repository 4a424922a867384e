use crate::models::request::FetchRequest;

/// Maximum bars per page; daily windows never come close, so pagination is
/// effectively a safety net.
const PAGE_LIMIT: &str = "10000";

/// Builds the query string for Alpaca's v2 stock bars endpoint.
pub(crate) fn construct_params(request: &FetchRequest) -> Vec<(String, String)> {
    vec![
        ("symbols".to_string(), request.symbol.clone()),
        ("timeframe".to_string(), "1Day".to_string()),
        ("start".to_string(), request.start.format("%Y-%m-%d").to_string()),
        ("end".to_string(), request.end.format("%Y-%m-%d").to_string()),
        ("adjustment".to_string(), "raw".to_string()),
        ("limit".to_string(), PAGE_LIMIT.to_string()),
        ("sort".to_string(), "asc".to_string()),
    ]
}
