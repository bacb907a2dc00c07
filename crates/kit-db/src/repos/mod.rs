//! Repository modules implementing all Kitlog store operations.
//!
//! Each module adds methods to `KitService` via `impl KitService` blocks:
//! - `user` — the identity store (read-mostly directory)
//! - `asset` — registrar, field editor, retirer, and asset reads
//! - `lifecycle` — the transition engine (asset update + history append,
//!   atomically)
//! - `history` — read side of the append-only ledger
//! - `dashboard` — pure counting aggregates

pub mod asset;
pub mod dashboard;
pub mod history;
pub mod lifecycle;
pub mod user;
