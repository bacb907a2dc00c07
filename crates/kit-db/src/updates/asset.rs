//! Asset update builder.
//!
//! Note: `status` and `owner_id` edits through this patch bypass the
//! lifecycle engine and write NO history entry. That audit gap is a
//! deliberate part of the design; route changes through
//! `KitService::transition_asset` when a trail is wanted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use kit_core::enums::{AssetCategory, AssetStatus};

/// Patch for `KitService::update_asset`. Absent fields are untouched;
/// `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<AssetCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Option<Decimal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

impl AssetUpdate {
    /// True when no field is present (the UPDATE will only refresh
    /// `updated_at`).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.serial_number.is_none()
            && self.model.is_none()
            && self.brand.is_none()
            && self.purchase_date.is_none()
            && self.purchase_price.is_none()
            && self.status.is_none()
            && self.owner_id.is_none()
            && self.notes.is_none()
    }
}

pub struct AssetUpdateBuilder(AssetUpdate);

impl AssetUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AssetUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: AssetCategory) -> Self {
        self.0.category = Some(category);
        self
    }

    #[must_use]
    pub fn serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.0.serial_number = Some(serial_number.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: Option<String>) -> Self {
        self.0.model = Some(model);
        self
    }

    #[must_use]
    pub fn brand(mut self, brand: Option<String>) -> Self {
        self.0.brand = Some(brand);
        self
    }

    #[must_use]
    pub fn purchase_date(mut self, purchase_date: Option<DateTime<Utc>>) -> Self {
        self.0.purchase_date = Some(purchase_date);
        self
    }

    #[must_use]
    pub fn purchase_price(mut self, purchase_price: Option<Decimal>) -> Self {
        self.0.purchase_price = Some(purchase_price);
        self
    }

    #[must_use]
    pub fn status(mut self, status: AssetStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn owner_id(mut self, owner_id: Option<String>) -> Self {
        self.0.owner_id = Some(owner_id);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.0.notes = Some(notes);
        self
    }

    #[must_use]
    pub fn build(self) -> AssetUpdate {
        self.0
    }
}

impl Default for AssetUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
