//! Room snapshot codec and persistence gateway.
//!
//! Persistence is best-effort and eventually consistent: the in-memory
//! room is the source of truth for all live connections, and a failed
//! save is logged, never surfaced to players.
//!
//! ## Codec
//!
//! - [`Snapshot`] — Complete serializable state of one room
//!
//! ## Gateway
//!
//! - [`Store`] — Async load/save trait at the persistence boundary
//! - [`Postgres`] — JSONB upsert keyed by room id
//! - [`Memory`] — In-process store for tests and `DB_URL`-less runs
mod snapshot;
mod store;

pub use snapshot::*;
pub use store::*;
