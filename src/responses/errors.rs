use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a JSON error response
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status_code();
    match &err {
        ServerError::NotFound | ServerError::BadRequest(_) => {
            tracing::debug!(status, error = %err, "request rejected")
        }
        ServerError::DbError(_) | ServerError::InternalError => {
            tracing::error!(status, error = %err, "request failed")
        }
    }

    let body = json!({ "status": status, "error": err.to_string() }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
