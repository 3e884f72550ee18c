//! Bond handlers behind the access gate.
//!
//! Both methods share one resource wrapped by [`require_basic_auth`], so
//! credentials are checked before the body or query string is read.
//!
//! ```text
//! POST /bonds {"isin":"XS0000000001","lei":"5493001KJTIIGC8Y1R12","size":"100.00","currency":"USD","maturity":"2030-01-01"}
//! GET  /bonds?legal_name=AcmeBank
//! ```

use actix_web::middleware::from_fn;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{BondPayload, ListBondsRequest, RegisterBondRequest};
use crate::domain::{ApiResult, Error, ErrorCode};
use crate::inbound::http::auth::{AuthenticatedAccount, require_basic_auth};
use crate::inbound::http::error::{redact, response_builder};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// Notional as clients send it: a decimal string or a bare JSON number.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SizeInput {
    Text(String),
    Number(serde_json::Number),
}

impl SizeInput {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Registration body for `POST /bonds`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterBondBody {
    #[schema(example = "XS0000000001")]
    pub isin: Option<String>,
    #[schema(example = "5493001KJTIIGC8Y1R12")]
    pub lei: Option<String>,
    #[schema(value_type = String, example = "100.00")]
    pub size: Option<SizeInput>,
    #[schema(example = "USD")]
    pub currency: Option<String>,
    #[schema(example = "2030-01-01")]
    pub maturity: Option<String>,
}

impl RegisterBondBody {
    fn into_request(self, account: &AuthenticatedAccount) -> Result<RegisterBondRequest, Error> {
        Ok(RegisterBondRequest {
            owner: account.id(),
            isin: require(self.isin, FieldName::new("isin"))?,
            lei: require(self.lei, FieldName::new("lei"))?,
            size: require(self.size, FieldName::new("size"))?.into_text(),
            currency: require(self.currency, FieldName::new("currency"))?,
            maturity: require(self.maturity, FieldName::new("maturity"))?,
        })
    }
}

/// Outcome envelope for `POST /bonds`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBondOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "bond has already been added")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "duplicate_bond")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl RegisterBondOutcome {
    fn accepted() -> Self {
        Self {
            success: true,
            error: None,
            code: None,
            trace_id: None,
        }
    }

    /// Failure envelope; `code` names the taxonomy entry when the error
    /// carries one and falls back to the error category.
    fn rejected(error: &Error) -> Self {
        let code = error
            .details()
            .and_then(|details| details.get("code"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .or_else(|| category(error.code()));
        Self {
            success: false,
            error: Some(error.message().to_owned()),
            code,
            trace_id: error.trace_id().map(str::to_owned),
        }
    }
}

fn category(code: ErrorCode) -> Option<String> {
    serde_json::to_value(code)
        .ok()
        .and_then(|value| value.as_str().map(str::to_owned))
}

/// Query parameters for `GET /bonds`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBondsQuery {
    /// Exact legal name to filter on. Blank values are ignored.
    pub legal_name: Option<String>,
}

/// Register a bond for the authenticated account, enriched with the legal
/// name of its issuer.
#[utoipa::path(
    post,
    path = "/bonds",
    request_body = RegisterBondBody,
    responses(
        (status = 200, description = "Bond registered", body = RegisterBondOutcome),
        (status = 400, description = "Missing or invalid field", body = RegisterBondOutcome),
        (status = 401, description = "Missing or invalid credentials", body = Error),
        (status = 409, description = "Bond already registered", body = RegisterBondOutcome),
        (status = 502, description = "Legal name lookup failed", body = RegisterBondOutcome),
        (status = 503, description = "Store unavailable", body = RegisterBondOutcome)
    ),
    tags = ["bonds"],
    operation_id = "registerBond",
    security(("BasicAuth" = []))
)]
pub async fn register_bond(
    state: web::Data<HttpState>,
    account: AuthenticatedAccount,
    payload: web::Json<RegisterBondBody>,
) -> HttpResponse {
    let outcome = match payload.into_inner().into_request(&account) {
        Ok(request) => state.bonds.register(request).await.map(|_| ()),
        Err(error) => Err(error),
    };
    match outcome {
        Ok(()) => HttpResponse::Ok().json(RegisterBondOutcome::accepted()),
        Err(error) => response_builder(&error).json(RegisterBondOutcome::rejected(&redact(&error))),
    }
}

/// List the authenticated account's bonds in registration order.
#[utoipa::path(
    get,
    path = "/bonds",
    params(ListBondsQuery),
    responses(
        (status = 200, description = "Bonds owned by the caller", body = [BondPayload]),
        (status = 401, description = "Missing or invalid credentials", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["bonds"],
    operation_id = "listBonds",
    security(("BasicAuth" = []))
)]
pub async fn list_bonds(
    state: web::Data<HttpState>,
    account: AuthenticatedAccount,
    query: web::Query<ListBondsQuery>,
) -> ApiResult<web::Json<Vec<BondPayload>>> {
    let response = state
        .bonds_query
        .list(ListBondsRequest {
            owner: account.id(),
            legal_name: query.into_inner().legal_name,
        })
        .await?;
    Ok(web::Json(response.bonds))
}

/// Mount `POST /bonds` and `GET /bonds` behind the access gate.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/bonds")
            .route(web::post().to(register_bond))
            .route(web::get().to(list_bonds))
            .wrap(from_fn(require_basic_auth)),
    );
}

#[cfg(test)]
#[path = "bonds_tests.rs"]
mod tests;
