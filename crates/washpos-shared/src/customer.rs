//! # Customer Entity
//!
//! A customer of the shop, reachable over WhatsApp. `origin` records where
//! the customer came from (a partner hotel, a reseller, or independent).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::adapter::{now, ScalarAdapter};
use crate::record::{Payload, Record, RecordPatch};
use crate::scalar::{EntityKind, PointInTime};

/// Origin recorded when a customer walks in on their own.
pub const DEFAULT_ORIGIN: &str = "independent";

// =============================================================================
// Payload
// =============================================================================

/// The stored shape of a customer document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub name: String,
    pub whats_app_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    pub created_at: PointInTime,
    pub updated_at: PointInTime,
}

/// The display fields of a customer, embedded in referencing documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerSnapshot {
    pub name: String,
    pub whats_app_number: String,
}

/// Caller-supplied fields for a new customer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub whats_app_number: String,
    pub origin: Option<String>,
}

// =============================================================================
// Mutations
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerPatch {
    Name(String),
    WhatsAppNumber(String),
    Origin(Option<String>),
}

impl RecordPatch<Customer> for CustomerPatch {
    fn field(&self) -> &'static str {
        match self {
            CustomerPatch::Name(_) => "name",
            CustomerPatch::WhatsAppNumber(_) => "whatsAppNumber",
            CustomerPatch::Origin(_) => "origin",
        }
    }

    fn apply(&self, data: &mut Customer) {
        match self {
            CustomerPatch::Name(name) => data.name = name.clone(),
            CustomerPatch::WhatsAppNumber(number) => data.whats_app_number = number.clone(),
            CustomerPatch::Origin(origin) => data.origin = origin.clone(),
        }
    }
}

impl Payload for Customer {
    type Patch = CustomerPatch;

    fn touch(&mut self, at: PointInTime) {
        self.updated_at = at;
    }
}

impl EntityKind for Customer {
    const COLLECTION: &'static str = "customers";
}

// =============================================================================
// Construction Recipes
// =============================================================================

impl Customer {
    /// Builds a not-yet-persisted customer, stamping both timestamps.
    pub fn create(adapter: &dyn ScalarAdapter, input: NewCustomer) -> Record<Customer> {
        let at = now(adapter);
        Record::new(Customer {
            name: input.name,
            whats_app_number: input.whats_app_number,
            origin: input.origin,
            created_at: at,
            updated_at: at,
        })
    }

    /// Zero-value payload for seeding a blank edit form.
    pub fn empty(adapter: &dyn ScalarAdapter) -> Customer {
        Customer::create(
            adapter,
            NewCustomer {
                name: String::new(),
                whats_app_number: String::new(),
                origin: Some(DEFAULT_ORIGIN.to_string()),
            },
        )
        .into_data()
    }

    /// The snapshot embedded in documents that reference this customer.
    pub fn snapshot(&self) -> CustomerSnapshot {
        CustomerSnapshot {
            name: self.name.clone(),
            whats_app_number: self.whats_app_number.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
