//! Update builder types for partial mutations.
//!
//! Each builder produces a patch struct with presence-tracking fields:
//! `Option<T>` for required columns, `Option<Option<T>>` for nullable
//! ones. Absence means "leave unchanged"; `Some(None)` means "clear to
//! NULL". Only present fields generate SET clauses in the dynamic
//! UPDATE SQL.

pub mod asset;
