//! Shared HTTP response checks for listing sources.

use crate::error::SourceError;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Pass a successful response through, or classify the failure.
///
/// 429 becomes [`SourceError::RateLimited`] using `Retry-After` (60 s when
/// absent or unparseable). Any other non-success status becomes
/// [`SourceError::Api`] carrying the response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(SourceError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
