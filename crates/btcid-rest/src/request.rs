//! Request builders and response decoding shared by the endpoint groups

use crate::error::{RestError, RestResult};
use crate::types::{PrivateMethod, PrivateResponse, PublicError};
use btcid_auth::{Credentials, RequestSigner};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

/// Path prefix of the public market data API
pub const PUBLIC_API_PATH: &str = "/api";
/// Path of the private trade API
pub const PRIVATE_API_PATH: &str = "/tapi";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// `GET {domain}/api{endpoint}` and return the raw body
///
/// The HTTP status is not checked here; error bodies are left to the decoder.
pub(crate) async fn public_get(client: &Client, domain: &str, endpoint: &str) -> RestResult<Vec<u8>> {
    let url = format!("{}{}{}", domain, PUBLIC_API_PATH, endpoint);
    debug!("GET {}", url);

    let response = client.get(&url).send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    trace!(%status, bytes = body.len(), "Public response received");
    Ok(body.to_vec())
}

/// Signed `POST {domain}/tapi` and return the raw body
pub(crate) async fn private_post(
    client: &Client,
    domain: &str,
    credentials: &Credentials,
    method: PrivateMethod,
    params: &[(&str, &str)],
) -> RestResult<Vec<u8>> {
    let signer = RequestSigner::new(credentials, method.as_str());
    let body = signer.encode_body(params)?;
    let signature = signer.sign(&body);
    let url = format!("{}{}", domain, PRIVATE_API_PATH);

    debug!(method = %method, nonce = signer.nonce(), "Making authenticated request");

    let response = client
        .post(&url)
        .header("Key", signer.api_key())
        .header("Sign", signature)
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(body)
        .send()
        .await?;
    let status = response.status();
    let body = response.bytes().await?;

    trace!(%status, bytes = body.len(), "Private response received");
    Ok(body.to_vec())
}

/// Decode a public endpoint body
///
/// A body matching the public error shape becomes [`RestError::Exchange`]
/// before `T` is tried, so payloads with defaulted fields cannot swallow it.
pub(crate) fn decode_public<T: DeserializeOwned>(body: &[u8]) -> RestResult<T> {
    if let Ok(public_error) = serde_json::from_slice::<PublicError>(body) {
        warn!(code = %public_error.error, "Public endpoint returned an error");
        return Err(public_error.into());
    }

    Ok(serde_json::from_slice(body)?)
}

/// Decode a private endpoint body, checking the `success` flag first
pub(crate) fn decode_private<T: DeserializeOwned>(body: &[u8]) -> RestResult<T> {
    let envelope: PrivateResponse<serde_json::Value> = serde_json::from_slice(body)?;

    let payload = envelope.into_result().map_err(|err| {
        warn!(error = %err, "Private endpoint returned an error");
        err
    })?;

    Ok(serde_json::from_value(payload)?)
}
