//! `ledgerbook-infra` — persistence and application services.
//!
//! The key-value snapshot layer, the append-only journal store and the
//! [`Books`](books::Books) service that ties the domain crate to storage.

pub mod books;
pub mod journal;
pub mod kv;
pub mod seed;

pub use books::{Books, NewAccount, StoreError};
pub use journal::JournalStore;
pub use kv::{InMemoryKeyValueStore, JsonFileStore, KeyValueStore};
