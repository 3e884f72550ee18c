//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `username` carries a unique index.
    accounts (id) {
        id -> Uuid,
        #[max_length = 32]
        username -> Varchar,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bond records, unique per `(owner_account_id, isin)`.
    bond_records (id) {
        id -> Uuid,
        owner_account_id -> Uuid,
        #[max_length = 12]
        isin -> Varchar,
        size -> Numeric,
        #[max_length = 3]
        currency -> Varchar,
        maturity -> Date,
        #[max_length = 20]
        lei -> Varchar,
        #[max_length = 100]
        legal_name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(bond_records -> accounts (owner_account_id));
diesel::allow_tables_to_appear_in_same_query!(accounts, bond_records);
