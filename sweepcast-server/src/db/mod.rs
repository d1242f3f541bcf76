//! Per-entity database operations
//!
//! Plain async functions over an injected `SqlitePool`; no module-level
//! storage singleton. Uniqueness (emails, slugs) and vote increments are
//! enforced at the storage layer so the invariants hold under concurrent
//! requests.

pub mod blog;
pub mod comments;
pub mod episodes;
pub mod subscribers;
