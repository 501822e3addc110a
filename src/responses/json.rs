use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use serde::Serialize;

/// Serialize `value` as the response body. The browser front end is served
/// from another origin, so every JSON response allows any origin.
pub fn json_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|e| ServerError::Internal(e.to_string()))?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::from(body))
        .map_err(|e| ServerError::Internal(e.to_string()))
}
