//! In-process repositories.
//!
//! Used when no database URL is configured and as realistic doubles in HTTP
//! tests. State lives behind a `Mutex`, so each uniqueness check and insert is
//! atomic just like the unique indexes on the PostgreSQL tables.

mod accounts;
mod bonds;

pub use accounts::InMemoryAccountRepository;
pub use bonds::InMemoryBondRepository;

use std::sync::{Mutex, MutexGuard};

/// Lock `mutex`, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
