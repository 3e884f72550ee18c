//! Behaviour tests for recording bonds through the domain services.
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bondbook::domain::ports::{
    BondCommand, BondQuery, CredentialStore, LeiLookupError, LeiRecordSource, ListBondsRequest,
    ListBondsResponse, RegisterBondRequest,
};
use bondbook::domain::{
    AccountId, BondCommandService, BondQueryService, CredentialService, Credentials, Error,
    ErrorCode, Lei,
};
use bondbook::outbound::memory::{InMemoryAccountRepository, InMemoryBondRepository};
use bondbook::outbound::password::Argon2PasswordHasher;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

struct AcmeRegistry;

#[async_trait]
impl LeiRecordSource for AcmeRegistry {
    async fn legal_name(&self, _lei: &Lei) -> Result<String, LeiLookupError> {
        Ok("Acme Bank".to_owned())
    }
}

struct RegisterWorld {
    runtime: Runtime,
    bonds: Arc<InMemoryBondRepository>,
    credentials: Option<CredentialService<InMemoryAccountRepository, Argon2PasswordHasher>>,
    command: Option<BondCommandService<InMemoryBondRepository, AcmeRegistry>>,
    owner: Option<AccountId>,
    last_outcome: Option<Result<(), Error>>,
}

impl std::fmt::Debug for RegisterWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterWorld")
            .field("owner", &self.owner)
            .field("last_outcome", &self.last_outcome)
            .finish()
    }
}

impl RegisterWorld {
    fn owner(&self) -> AccountId {
        self.owner.expect("account holder signed up")
    }

    fn submit(&mut self) {
        let owner = self.owner();
        let command = self.command.as_ref().expect("registry configured");
        let outcome = self.runtime.block_on(command.register(RegisterBondRequest {
            owner,
            isin: "XS0000000001".to_owned(),
            lei: "5493001KJTIIGC8Y1R12".to_owned(),
            size: "100.00".to_owned(),
            currency: "USD".to_owned(),
            maturity: "2030-01-01".to_owned(),
        }));
        self.last_outcome = Some(outcome.map(|_| ()));
    }

    fn listing(&self) -> ListBondsResponse {
        let query = BondQueryService::new(Arc::clone(&self.bonds));
        self.runtime
            .block_on(query.list(ListBondsRequest {
                owner: self.owner(),
                legal_name: None,
            }))
            .expect("listing succeeds")
    }
}

#[fixture]
fn world() -> Mutex<RegisterWorld> {
    Mutex::new(RegisterWorld {
        runtime: Runtime::new().expect("tokio runtime"),
        bonds: Arc::new(InMemoryBondRepository::new()),
        credentials: None,
        command: None,
        owner: None,
        last_outcome: None,
    })
}

#[given("a signed-up account holder")]
fn signed_up_holder(world: &Mutex<RegisterWorld>) {
    let mut world = world.lock().expect("world lock");
    let service = CredentialService::new(
        Arc::new(InMemoryAccountRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
    );
    let credentials = Credentials::try_from_parts("alice", "pw123").expect("credentials");
    let account = world
        .runtime
        .block_on(service.create_account(&credentials))
        .expect("signup succeeds");
    world.owner = Some(account.id());
    world.credentials = Some(service);
}

#[given("a registry that names the issuer Acme Bank")]
fn registry_names_acme(world: &Mutex<RegisterWorld>) {
    let mut world = world.lock().expect("world lock");
    let bonds = Arc::clone(&world.bonds);
    world.command = Some(BondCommandService::new(bonds, Arc::new(AcmeRegistry)));
}

#[when("the holder records bond XS0000000001")]
fn holder_records_bond(world: &Mutex<RegisterWorld>) {
    let mut world = world.lock().expect("world lock");
    world.submit();
    let outcome = world.last_outcome.as_ref().expect("submitted");
    assert!(outcome.is_ok(), "first submission succeeds: {outcome:?}");
}

#[when("the holder submits the same bond again")]
fn holder_resubmits(world: &Mutex<RegisterWorld>) {
    world.lock().expect("world lock").submit();
}

#[then("the register lists XS0000000001 under AcmeBank")]
fn register_lists_acme(world: &Mutex<RegisterWorld>) {
    let world = world.lock().expect("world lock");
    let listing = world.listing();
    let bond = listing.bonds.first().expect("one bond listed");
    assert_eq!(bond.isin, "XS0000000001");
    assert_eq!(bond.legal_name, "AcmeBank");
}

#[then("the second submission is rejected as a duplicate")]
fn second_submission_rejected(world: &Mutex<RegisterWorld>) {
    let world = world.lock().expect("world lock");
    let outcome = world.last_outcome.as_ref().expect("submitted");
    let error = outcome.as_ref().expect_err("duplicate rejected");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[then("the register still lists exactly one bond")]
fn register_lists_one(world: &Mutex<RegisterWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.listing().bonds.len(), 1);
    let credentials = world.credentials.as_ref().expect("signed up");
    let verified = world
        .runtime
        .block_on(credentials.verify(
            &Credentials::try_from_parts("alice", "pw123").expect("credentials"),
        ))
        .expect("verification runs");
    assert_eq!(verified.map(|account| account.id()), world.owner);
}

#[scenario(path = "tests/features/bond_register.feature")]
fn bond_register(world: Mutex<RegisterWorld>) {
    drop(world);
}
