//! HTTP mapping for domain errors.
//!
//! Keeps the domain error type transport agnostic while giving every handler
//! the same JSON error body, status mapping, and trace header.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Challenge sent with every `401` response.
pub const BASIC_CHALLENGE: &str = r#"Basic realm="bonds""#;

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::UpstreamFailure => StatusCode::BAD_GATEWAY,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Replace internal and unavailable messages with generic text, keeping the
/// trace id so operators can correlate the logged cause.
pub(crate) fn redact(error: &Error) -> Error {
    let generic = match error.code() {
        ErrorCode::InternalError => Error::internal("Internal server error"),
        ErrorCode::ServiceUnavailable => {
            Error::service_unavailable("Service temporarily unavailable")
        }
        _ => return error.clone(),
    };
    match error.trace_id() {
        Some(id) => generic.with_trace_id(id.to_owned()),
        None => generic,
    }
}

/// Start a response with the mapped status and shared headers.
pub(crate) fn response_builder(error: &Error) -> actix_web::HttpResponseBuilder {
    let status = status_for(error.code());
    if status.is_server_error() {
        error!(code = ?error.code(), message = error.message(), trace_id = ?error.trace_id(), "request failed");
    } else {
        warn!(code = ?error.code(), message = error.message(), "request rejected");
    }

    let mut builder = HttpResponse::build(status);
    if let Some(id) = error.trace_id() {
        builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
    }
    if error.code() == ErrorCode::Unauthorized {
        builder.insert_header((
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static(BASIC_CHALLENGE),
        ));
    }
    builder
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        response_builder(self).json(redact(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
