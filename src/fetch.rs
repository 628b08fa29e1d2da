//! Downloads the current feed payload for a city from the WAQI API.

use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use serde_json::Value;

const BASE_URL: &str = "https://api.waqi.info";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Performs the feed request and returns the validated `data` object.
///
/// Non-2xx statuses and timeouts propagate as transport errors before any
/// parsing takes place.
pub async fn fetch_feed(city: &str, token: &str) -> Result<Value> {
    let url = format!("{}/feed/{}/?token={}", BASE_URL, city, token);

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let body: Value = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    validate(body)
}

// The API reports its own errors with a 200 status and a non-"ok" status
// field, so the raw payload is kept in the error for diagnosis.
fn validate(body: Value) -> Result<Value> {
    match body.get("status").and_then(Value::as_str) {
        Some("ok") => body
            .get("data")
            .cloned()
            .ok_or_else(|| anyhow!("API error: no data object in {}", body)),
        _ => bail!("API error: {}", body),
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_unwrap_data_when_status_ok() {
        let body = json!({"status": "ok", "data": {"aqi": 42}});
        let data = validate(body).unwrap();

        assert_eq!(data, json!({"aqi": 42}));
    }

    #[test]
    fn should_fail_with_payload_when_status_not_ok() {
        let body = json!({"status": "error", "data": "Invalid key"});
        let err = validate(body).unwrap_err();

        assert!(err.to_string().contains("Invalid key"));
        assert!(err.to_string().contains("error"));
    }

    #[test]
    fn should_fail_when_status_missing() {
        let body = json!({"data": {"aqi": 42}});
        assert!(validate(body).is_err());
    }

    #[test]
    fn should_fail_when_data_missing() {
        let body = json!({"status": "ok"});
        assert!(validate(body).is_err());
    }
}
