//! Account signup handler.
//!
//! ```text
//! POST /signup {"username":"alice","password":"pw123"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ApiResult, Credentials, Error, SignupError};
use crate::inbound::http::state::HttpState;

/// Signup request body. Both fields are required; they are optional here so
/// a missing field is reported by name instead of as a decode failure.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignupRequest {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "pw123")]
    pub password: Option<String>,
}

/// Successful signup echoing the stored username.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignupResponse {
    #[schema(example = "alice")]
    pub username: String,
}

/// Create an account holding a salted hash of the password.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = SignupResponse),
        (status = 400, description = "Missing or invalid field", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 503, description = "Account store unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<SignupResponse>> {
    let SignupRequest { username, password } = payload.into_inner();
    let credentials = Credentials::try_from_optional(username.as_deref(), password.as_deref())
        .map_err(|err| Error::from(SignupError::from(err)))?;
    let account = state.credentials.create_account(&credentials).await?;
    Ok(web::Json(SignupResponse {
        username: account.username().to_string(),
    }))
}
