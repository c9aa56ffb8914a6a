use serde::de::DeserializeOwned;

use super::error::{FirebaseError, Service};

/// Decode a JSON response, turning non-2xx bodies into `FirebaseError::Api`
pub(crate) async fn read_json<R>(
    response: reqwest::Response,
    service: Service,
) -> Result<R, FirebaseError>
where
    R: DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(FirebaseError::from_error_body(
            status.as_u16(),
            &body,
            service,
        ));
    }

    let body = if body.trim().is_empty() { "{}" } else { &body };
    Ok(serde_json::from_str(body)?)
}
