//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request, response, and error schemas they use. Bond endpoints
//! declare the HTTP Basic security scheme; signup and health probes opt out.
//!
//! Served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::BondPayload;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::accounts::{SignupRequest, SignupResponse};
use crate::inbound::http::bonds::{RegisterBondBody, RegisterBondOutcome};

/// Add the HTTP Basic security scheme to the generated document.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BasicAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bondbook API",
        description = "Per-user bond register with legal-entity enrichment."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BasicAuth" = [])),
    paths(
        crate::inbound::http::accounts::signup,
        crate::inbound::http::bonds::register_bond,
        crate::inbound::http::bonds::list_bonds,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        BondPayload,
        SignupRequest,
        SignupResponse,
        RegisterBondBody,
        RegisterBondOutcome
    )),
    tags(
        (name = "accounts", description = "Account signup"),
        (name = "bonds", description = "Bond registration and listing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("Error", "traceId")]
    #[case("BondPayload", "legal_name")]
    #[case("BondPayload", "size")]
    #[case("RegisterBondOutcome", "success")]
    fn schemas_expose_their_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/signup")]
    #[case("/bonds")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn endpoints_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn basic_auth_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BasicAuth"));
    }
}
