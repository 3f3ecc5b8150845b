use astra::{Body, Response, ResponseBuilder};

use crate::errors::ServerError;
use crate::templates::components::error_page;

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into the HTML page the user sees.
pub fn error_to_response(err: ServerError) -> Response {
    let (status, message) = match &err {
        ServerError::NotFound => (404, "No encontrado".to_string()),
        ServerError::BadRequest(msg) => (400, msg.clone()),
        ServerError::Unauthorized(msg) => (401, msg.clone()),
        ServerError::DbError(_) | ServerError::XlsxError(_) | ServerError::InternalError => (
            500,
            "Ocurrió un error. Intentá de nuevo en un momento.".to_string(),
        ),
    };

    let html = error_page(status, &message).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(html))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
