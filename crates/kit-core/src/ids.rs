//! ID prefix constants and helpers.
//!
//! Every row gets a prefixed random hex ID generated in SQL
//! (see `KitDb::generate_id`), e.g. `"ast-a3f8b2c1"`.

/// Prefix for user IDs.
pub const PREFIX_USER: &str = "usr";

/// Prefix for asset IDs.
pub const PREFIX_ASSET: &str = "ast";

/// Prefix for asset history entry IDs.
pub const PREFIX_HISTORY: &str = "hst";

/// All known prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_USER, PREFIX_ASSET, PREFIX_HISTORY];
