//! Internal Diesel row structs. Never exposed outside the persistence layer.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::schema::{accounts, bond_records};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bond_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BondRecordRow {
    pub id: Uuid,
    pub owner_account_id: Uuid,
    pub isin: String,
    pub size: Decimal,
    pub currency: String,
    pub maturity: NaiveDate,
    pub lei: String,
    pub legal_name: String,
}

/// `created_at` is left to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bond_records)]
pub(crate) struct NewBondRecordRow<'a> {
    pub id: Uuid,
    pub owner_account_id: Uuid,
    pub isin: &'a str,
    pub size: Decimal,
    pub currency: &'a str,
    pub maturity: NaiveDate,
    pub lei: &'a str,
    pub legal_name: &'a str,
}
