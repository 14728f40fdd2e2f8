//! Consistent JSON response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::app::dto::{DataBody, ErrorBody, MessageBody};

/// `{"error": message}` with the given status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// `200 {"data": value}`.
pub fn json_data<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(DataBody { data })).into_response()
}

/// `200 {"message": message}`.
pub fn json_message(message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(MessageBody {
            message: message.into(),
        }),
    )
        .into_response()
}
