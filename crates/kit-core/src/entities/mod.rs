//! Entity structs for all Kitlog domain objects.

mod asset;
mod history;
mod user;

pub use asset::{Asset, NewAsset};
pub use history::HistoryEntry;
pub use user::User;
