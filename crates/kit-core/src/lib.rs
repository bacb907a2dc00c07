//! # kit-core
//!
//! Core types for Kitlog, the physical asset tracker.
//!
//! This crate provides the types shared across all Kitlog crates:
//! - Entity structs for users, assets, and history entries
//! - Status, category, and role enums with stable string forms
//! - ID prefix constants
//! - Read-side view types (asset joined with owner, history joined
//!   with the users it references, dashboard aggregates)
//!
//! No storage or I/O lives here; kit-db owns persistence.

pub mod entities;
pub mod enums;
pub mod ids;
pub mod views;
