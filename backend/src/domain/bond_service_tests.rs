//! Tests for the bond registration and listing services.

use std::sync::Arc;

use chrono::NaiveDate;
use mockall::Sequence;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockBondRepository, MockLeiRecordSource};
use crate::domain::{AccountId, CurrencyCode, ErrorCode, Isin, Lei};

fn request(owner: AccountId) -> RegisterBondRequest {
    RegisterBondRequest {
        owner,
        isin: "US1234567890".to_owned(),
        lei: "5493001KJTIIGC8Y1R12".to_owned(),
        size: "100.00".to_owned(),
        currency: "usd".to_owned(),
        maturity: "2030-01-01".to_owned(),
    }
}

fn command(
    repo: MockBondRepository,
    registry: MockLeiRecordSource,
) -> BondCommandService<MockBondRepository, MockLeiRecordSource> {
    BondCommandService::new(Arc::new(repo), Arc::new(registry))
}

fn detail_code(error: &Error) -> Option<&str> {
    error
        .details()
        .and_then(|details| details.get("code"))
        .and_then(|code| code.as_str())
}

fn stored_record(owner: AccountId, isin: &str, legal_name: &str) -> BondRecord {
    BondRecord {
        id: crate::domain::BondId::random(),
        owner,
        isin: Isin::new(isin).expect("isin"),
        notional: "250.5".parse().expect("notional"),
        currency: CurrencyCode::new("EUR").expect("currency"),
        maturity: NaiveDate::from_ymd_opt(2031, 6, 30).expect("date"),
        lei: Lei::new("LEI0001").expect("lei"),
        legal_name: LegalName::new(legal_name).expect("legal name"),
    }
}

#[tokio::test]
async fn register_checks_then_enriches_then_inserts() {
    let owner = AccountId::random();
    let mut seq = Sequence::new();
    let mut repo = MockBondRepository::new();
    let mut registry = MockLeiRecordSource::new();

    repo.expect_exists()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(false));
    registry
        .expect_legal_name()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok("Example Corp".to_owned()));
    repo.expect_insert()
        .times(1)
        .in_sequence(&mut seq)
        .withf(move |record| {
            record.owner == owner
                && record.legal_name.as_str() == "ExampleCorp"
                && record.currency.as_str() == "USD"
        })
        .returning(|_| Ok(()));

    let response = command(repo, registry)
        .register(request(owner))
        .await
        .expect("registration succeeds");

    assert_eq!(response.bond.legal_name, "ExampleCorp");
    assert_eq!(response.bond.size, "100.00");
}

#[tokio::test]
async fn register_rejects_duplicates_before_any_lookup() {
    let mut repo = MockBondRepository::new();
    repo.expect_exists().returning(|_, _| Ok(true));
    repo.expect_insert().times(0);
    let mut registry = MockLeiRecordSource::new();
    registry.expect_legal_name().times(0);

    let error = command(repo, registry)
        .register(request(AccountId::random()))
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(detail_code(&error), Some("duplicate_bond"));
}

#[rstest]
#[case(LeiLookupError::transport("reset"))]
#[case(LeiLookupError::timeout("10s"))]
#[case(LeiLookupError::status(404_u16, "missing"))]
#[case(LeiLookupError::decode("not json"))]
#[case(LeiLookupError::not_found("5493001KJTIIGC8Y1R12"))]
#[tokio::test]
async fn lookup_failures_collapse_to_upstream_failure_without_insert(
    #[case] failure: LeiLookupError,
) {
    let kind = failure.kind();
    let mut repo = MockBondRepository::new();
    repo.expect_exists().returning(|_, _| Ok(false));
    repo.expect_insert().times(0);
    let mut registry = MockLeiRecordSource::new();
    registry
        .expect_legal_name()
        .return_once(move |_| Err(failure));

    let error = command(repo, registry)
        .register(request(AccountId::random()))
        .await
        .expect_err("lookup failure");

    assert_eq!(error.code(), ErrorCode::UpstreamFailure);
    assert_eq!(detail_code(&error), Some("lookup_failure"));
    assert_eq!(
        error.details().and_then(|d| d.get("kind")).and_then(|k| k.as_str()),
        Some(kind)
    );
}

#[rstest]
#[case(" \t\n".to_owned())]
#[case("x".repeat(crate::domain::LEGAL_NAME_MAX + 1))]
#[tokio::test]
async fn unusable_registry_names_are_lookup_failures(#[case] raw: String) {
    let mut repo = MockBondRepository::new();
    repo.expect_exists().returning(|_, _| Ok(false));
    repo.expect_insert().times(0);
    let mut registry = MockLeiRecordSource::new();
    registry
        .expect_legal_name()
        .returning(move |_| Ok(raw.clone()));

    let error = command(repo, registry)
        .register(request(AccountId::random()))
        .await
        .expect_err("unusable name");

    assert_eq!(error.code(), ErrorCode::UpstreamFailure);
}

fn with_field(field: &str, value: &str) -> RegisterBondRequest {
    let mut bad = request(AccountId::random());
    match field {
        "size" => bad.size = value.to_owned(),
        "maturity" => bad.maturity = value.to_owned(),
        "isin" => bad.isin = value.to_owned(),
        "currency" => bad.currency = value.to_owned(),
        "lei" => bad.lei = value.to_owned(),
        other => panic!("unexpected field {other}"),
    }
    bad
}

fn assert_validation_error(error: &Error, field: &str) {
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(detail_code(error), Some("validation_error"));
    assert_eq!(
        error.details().and_then(|d| d.get("field")).and_then(|f| f.as_str()),
        Some(field)
    );
}

#[rstest]
#[case("size", "abc")]
#[case("size", "1.234")]
#[case("maturity", "2030-13-01")]
#[case("currency", "DOLLARS")]
#[tokio::test]
async fn malformed_terms_fail_validation_after_lookup_without_insert(
    #[case] field: &str,
    #[case] value: &str,
) {
    let mut seq = Sequence::new();
    let mut repo = MockBondRepository::new();
    let mut registry = MockLeiRecordSource::new();
    repo.expect_exists()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(false));
    registry
        .expect_legal_name()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok("Example Corp".to_owned()));
    repo.expect_insert().times(0);

    let error = command(repo, registry)
        .register(with_field(field, value))
        .await
        .expect_err("validation failure");

    assert_validation_error(&error, field);
}

#[rstest]
#[case("size", "abc")]
#[case("maturity", "not-a-date")]
#[case("currency", "DOLLARS")]
#[case("lei", "bad-lei")]
#[tokio::test]
async fn duplicates_win_over_malformed_terms(#[case] field: &str, #[case] value: &str) {
    let mut repo = MockBondRepository::new();
    repo.expect_exists().returning(|_, _| Ok(true));
    repo.expect_insert().times(0);
    let mut registry = MockLeiRecordSource::new();
    registry.expect_legal_name().times(0);

    let error = command(repo, registry)
        .register(with_field(field, value))
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(detail_code(&error), Some("duplicate_bond"));
}

#[tokio::test]
async fn malformed_isin_skips_the_duplicate_check_but_still_looks_up() {
    let mut repo = MockBondRepository::new();
    repo.expect_exists().times(0);
    repo.expect_insert().times(0);
    let mut registry = MockLeiRecordSource::new();
    registry
        .expect_legal_name()
        .times(1)
        .returning(|_| Ok("Example Corp".to_owned()));

    let error = command(repo, registry)
        .register(with_field("isin", "US-1234"))
        .await
        .expect_err("validation failure");

    assert_validation_error(&error, "isin");
}

#[tokio::test]
async fn malformed_lei_fails_validation_without_a_registry_call() {
    let mut repo = MockBondRepository::new();
    repo.expect_exists().times(1).returning(|_, _| Ok(false));
    repo.expect_insert().times(0);
    let mut registry = MockLeiRecordSource::new();
    registry.expect_legal_name().times(0);

    let error = command(repo, registry)
        .register(with_field("lei", "bad-lei"))
        .await
        .expect_err("validation failure");

    assert_validation_error(&error, "lei");
}

#[rstest]
#[case("size", "abc")]
#[case("maturity", "2030-02-30")]
#[tokio::test]
async fn lookup_failures_win_over_malformed_terms(#[case] field: &str, #[case] value: &str) {
    let mut repo = MockBondRepository::new();
    repo.expect_exists().returning(|_, _| Ok(false));
    repo.expect_insert().times(0);
    let mut registry = MockLeiRecordSource::new();
    registry
        .expect_legal_name()
        .returning(|_| Err(LeiLookupError::timeout("10s")));

    let error = command(repo, registry)
        .register(with_field(field, value))
        .await
        .expect_err("lookup failure");

    assert_eq!(error.code(), ErrorCode::UpstreamFailure);
}

#[tokio::test]
async fn storage_level_duplicates_surface_as_duplicate_bond() {
    let mut repo = MockBondRepository::new();
    repo.expect_exists().returning(|_, _| Ok(false));
    repo.expect_insert()
        .returning(|record| Err(BondRepositoryError::duplicate(record.isin.as_str())));
    let mut registry = MockLeiRecordSource::new();
    registry
        .expect_legal_name()
        .returning(|_| Ok("Example Corp".to_owned()));

    let error = command(repo, registry)
        .register(request(AccountId::random()))
        .await
        .expect_err("race lost");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(detail_code(&error), Some("duplicate_bond"));
}

#[tokio::test]
async fn repository_outage_maps_to_service_unavailable() {
    let mut repo = MockBondRepository::new();
    repo.expect_exists()
        .returning(|_, _| Err(BondRepositoryError::connection("pool timed out")));
    let mut registry = MockLeiRecordSource::new();
    registry.expect_legal_name().times(0);

    let error = command(repo, registry)
        .register(request(AccountId::random()))
        .await
        .expect_err("outage");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn list_renders_two_decimal_sizes() {
    let owner = AccountId::random();
    let mut repo = MockBondRepository::new();
    repo.expect_list_by_owner()
        .withf(move |requested, filter| *requested == owner && filter.is_none())
        .returning(move |owner, _| Ok(vec![stored_record(owner, "XS0000000001", "AcmeBank")]));

    let response = BondQueryService::new(Arc::new(repo))
        .list(ListBondsRequest {
            owner,
            legal_name: None,
        })
        .await
        .expect("listing succeeds");

    assert_eq!(response.bonds.len(), 1);
    assert_eq!(response.bonds[0].size, "250.50");
    assert_eq!(response.bonds[0].maturity.to_string(), "2031-06-30");
}

#[rstest]
#[case(Some("AcmeBank"), Some("AcmeBank"))]
#[case(Some(""), None)]
#[case(None, None)]
#[tokio::test]
async fn list_passes_the_legal_name_filter_through(
    #[case] raw: Option<&'static str>,
    #[case] expected: Option<&'static str>,
) {
    let mut repo = MockBondRepository::new();
    repo.expect_list_by_owner()
        .withf(move |_, filter| filter.as_ref().map(LegalName::as_str) == expected)
        .returning(|_, _| Ok(Vec::new()));

    let response = BondQueryService::new(Arc::new(repo))
        .list(ListBondsRequest {
            owner: AccountId::random(),
            legal_name: raw.map(str::to_owned),
        })
        .await
        .expect("listing succeeds");

    assert!(response.bonds.is_empty());
}

#[tokio::test]
async fn list_short_circuits_oversized_filters() {
    let mut repo = MockBondRepository::new();
    repo.expect_list_by_owner().times(0);

    let response = BondQueryService::new(Arc::new(repo))
        .list(ListBondsRequest {
            owner: AccountId::random(),
            legal_name: Some("x".repeat(crate::domain::LEGAL_NAME_MAX + 1)),
        })
        .await
        .expect("listing succeeds");

    assert!(response.bonds.is_empty());
}
