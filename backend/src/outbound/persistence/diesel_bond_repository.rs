//! PostgreSQL-backed `BondRepository`.
//!
//! Every query filters on `owner_account_id`. The `(owner_account_id, isin)`
//! unique index closes the gap between `exists` and `insert`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BondRepository, BondRepositoryError};
use crate::domain::{
    AccountId, BondId, BondRecord, CurrencyCode, Isin, LegalName, Lei, Notional,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BondRecordRow, NewBondRecordRow};
use super::pool::DbPool;
use super::schema::bond_records;

/// Diesel implementation of the bond repository port.
#[derive(Clone)]
pub struct DieselBondRepository {
    pool: DbPool,
}

impl DieselBondRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn query_error(err: diesel::result::Error) -> BondRepositoryError {
    map_diesel_error(
        err,
        BondRepositoryError::query,
        BondRepositoryError::connection,
        || BondRepositoryError::query("unexpected unique violation"),
    )
}

fn row_to_record(row: BondRecordRow) -> Result<BondRecord, BondRepositoryError> {
    let corrupt = |field: &str, err: &dyn std::fmt::Display| {
        BondRepositoryError::query(format!("stored {field} invalid: {err}"))
    };
    Ok(BondRecord {
        id: BondId::from_uuid(row.id),
        owner: AccountId::from_uuid(row.owner_account_id),
        isin: Isin::new(&row.isin).map_err(|err| corrupt("isin", &err))?,
        notional: Notional::new(row.size).map_err(|err| corrupt("size", &err))?,
        currency: CurrencyCode::new(&row.currency).map_err(|err| corrupt("currency", &err))?,
        maturity: row.maturity,
        lei: Lei::new(&row.lei).map_err(|err| corrupt("lei", &err))?,
        legal_name: LegalName::new(row.legal_name).map_err(|err| corrupt("legal_name", &err))?,
    })
}

#[async_trait]
impl BondRepository for DieselBondRepository {
    async fn exists(&self, owner: AccountId, isin: &Isin) -> Result<bool, BondRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BondRepositoryError::connection))?;

        diesel::select(exists(
            bond_records::table
                .filter(bond_records::owner_account_id.eq(owner.as_uuid()))
                .filter(bond_records::isin.eq(isin.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(query_error)
    }

    async fn insert(&self, record: &BondRecord) -> Result<(), BondRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BondRepositoryError::connection))?;

        let row = NewBondRecordRow {
            id: *record.id.as_uuid(),
            owner_account_id: *record.owner.as_uuid(),
            isin: record.isin.as_str(),
            size: record.notional.value(),
            currency: record.currency.as_str(),
            maturity: record.maturity,
            lei: record.lei.as_str(),
            legal_name: record.legal_name.as_str(),
        };
        diesel::insert_into(bond_records::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                map_diesel_error(
                    err,
                    BondRepositoryError::query,
                    BondRepositoryError::connection,
                    || BondRepositoryError::duplicate(record.isin.as_str()),
                )
            })
    }

    async fn list_by_owner(
        &self,
        owner: AccountId,
        legal_name: Option<LegalName>,
    ) -> Result<Vec<BondRecord>, BondRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BondRepositoryError::connection))?;

        let mut query = bond_records::table
            .filter(bond_records::owner_account_id.eq(*owner.as_uuid()))
            .select(BondRecordRow::as_select())
            .order((bond_records::created_at.asc(), bond_records::id.asc()))
            .into_boxed();
        if let Some(name) = legal_name {
            query = query.filter(bond_records::legal_name.eq(name.as_str().to_owned()));
        }

        let rows: Vec<BondRecordRow> = query.load(&mut conn).await.map_err(query_error)?;
        rows.into_iter().map(row_to_record).collect()
    }
}
