use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};

/// Convert a ServerError into a JSON error response
pub fn error_response(err: ServerError) -> Response {
    let status = err.status();
    if status >= 500 {
        log::error!("{err}");
    }

    let body = serde_json::json!({ "error": err.to_string() }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
