//! PostgreSQL-backed `AccountRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountId, PasswordHash, Username};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::DbPool;
use super::schema::accounts;

/// Diesel implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let username = Username::new(row.username)
        .map_err(|err| AccountRepositoryError::query(format!("stored username invalid: {err}")))?;
    let password_hash = PasswordHash::new(row.password_hash)
        .map_err(|err| AccountRepositoryError::query(format!("stored hash invalid: {err}")))?;
    Ok(Account::new(
        AccountId::from_uuid(row.id),
        username,
        password_hash,
    ))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountRepositoryError::connection))?;

        let row = NewAccountRow {
            id: *account.id().as_uuid(),
            username: account.username().as_str(),
            password_hash: account.password_hash().as_str(),
        };
        diesel::insert_into(accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                map_diesel_error(
                    err,
                    AccountRepositoryError::query,
                    AccountRepositoryError::connection,
                    || AccountRepositoryError::duplicate_username(account.username().as_str()),
                )
            })
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountRepositoryError::connection))?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::username.eq(username.as_str()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                map_diesel_error(
                    err,
                    AccountRepositoryError::query,
                    AccountRepositoryError::connection,
                    || AccountRepositoryError::query("unexpected unique violation"),
                )
            })?;

        row.map(row_to_account).transpose()
    }
}
