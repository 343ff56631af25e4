//! # App Settings
//!
//! The singleton configuration document: the invoice message template, the
//! service catalog, and the configured discounts staff can pick from.
//! Stored at [`APP_SETTINGS_PATH`](crate::paths::APP_SETTINGS_PATH).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{DiscountRate, Money};
use crate::transaction::Discount;

// =============================================================================
// Shapes
// =============================================================================

/// The stored shape of the settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppSettings {
    /// Message template for WhatsApp invoices.
    pub invoice_message_template: String,
    /// Service catalog, keyed by the item name used on transactions.
    pub products: BTreeMap<String, ProductSettings>,
    /// Configured discounts, keyed by discount name.
    pub discounts: BTreeMap<String, DiscountSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSettings {
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_value: Option<DiscountRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

// =============================================================================
// Lookups
// =============================================================================

impl AppSettings {
    /// Display name for an item: the configured one, or the raw item name
    /// when the catalog has no entry (or no display name) for it.
    pub fn display_name_of<'a>(&'a self, item: &'a str) -> &'a str {
        self.products
            .get(item)
            .and_then(|product| product.display_name.as_deref())
            .unwrap_or(item)
    }

    /// Composes a transaction [`Discount`] from a configured entry.
    pub fn discount(&self, name: &str) -> Option<Discount> {
        self.discounts.get(name).map(|entry| Discount {
            name: name.to_string(),
            labels: entry.labels.clone(),
            amount_value: entry.amount_value,
            percentage_value: entry.percentage_value,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
