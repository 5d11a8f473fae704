//! One-shot validation round-trip made before a race starts.

use serde::{Deserialize, Serialize};

use rabbithole::RaceError;

#[derive(Debug, Serialize)]
struct ValidateRequest<'a> {
    start_url: &'a str,
    target_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    valid: bool,
    #[serde(default)]
    message: String,
}

/// POST the start/target pair to the backend's validation endpoint.
///
/// A transport failure is a connectivity error; a well-formed negative
/// answer carries the backend's message verbatim.
pub async fn check_pair(
    api_base: &str,
    start_url: &str,
    target_url: &str,
) -> Result<(), RaceError> {
    let url = format!("{}/validate", api_base.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&url)
        .json(&ValidateRequest {
            start_url,
            target_url,
        })
        .send()
        .await
        .map_err(|e| RaceError::Connectivity(format!("validation request: {e}")))?;

    let body: ValidateResponse = response
        .json()
        .await
        .map_err(|e| RaceError::Connectivity(format!("validation response: {e}")))?;

    if body.valid {
        Ok(())
    } else {
        Err(RaceError::Validation(body.message))
    }
}
