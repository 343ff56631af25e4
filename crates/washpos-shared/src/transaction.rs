//! # Transaction Entity
//!
//! An order moving through the shop: who dropped it off, what services it
//! holds, where it sits in the workflow, and how it was paid.
//!
//! ## Snapshot Pattern
//! The customer, the creating user, and the receiving user are stored as a
//! non-owning reference plus a frozen copy of their display fields, so lists
//! and receipts render without extra lookups and without embedding object
//! graphs.
//!
//! ## Status Workflow
//! ```text
//! pending ──► wip ──► task-done ──► paid ──► delivered ──► done
//!    │
//!    └──────────────────────► canceled (from anywhere)
//! ```
//! The workflow above is the intended path, but transitions are deliberately
//! unconstrained at this layer: any status may be set to any other, and
//! enforcement (if any) belongs to the application/UI layer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::adapter::{now, resolve_reference, ScalarAdapter};
use crate::customer::{Customer, CustomerSnapshot};
use crate::money::{DiscountRate, Money};
use crate::record::{Payload, Record, RecordPatch};
use crate::scalar::{EntityKind, EntityReference, PointInTime, RawReference};
use crate::user::{User, UserSnapshot};

// =============================================================================
// Status & Payment Method
// =============================================================================

/// Every status a transaction can hold, in workflow order.
pub const TRANSACTION_STATUSES: [TransactionStatus; 7] = [
    TransactionStatus::Pending,
    TransactionStatus::Wip,
    TransactionStatus::TaskDone,
    TransactionStatus::Paid,
    TransactionStatus::Delivered,
    TransactionStatus::Done,
    TransactionStatus::Canceled,
];

/// Where a transaction sits in the shop workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum TransactionStatus {
    /// Waiting in the queue.
    Pending,
    /// Being worked on.
    Wip,
    /// Work finished, not yet paid or picked up.
    TaskDone,
    /// Payment received.
    Paid,
    /// Picked up by the customer.
    Delivered,
    /// Fully settled and closed.
    Done,
    /// Called off.
    Canceled,
}

impl TransactionStatus {
    /// Wire value, matching the stored documents.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Wip => "wip",
            TransactionStatus::TaskDone => "task-done",
            TransactionStatus::Paid => "paid",
            TransactionStatus::Delivered => "delivered",
            TransactionStatus::Done => "done",
            TransactionStatus::Canceled => "canceled",
        }
    }

    /// Indonesian display label.
    pub const fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Dalam antrian",
            TransactionStatus::Wip => "Sedang dikerjakan",
            TransactionStatus::TaskDone => "Sudah dikerjakan",
            TransactionStatus::Paid => "Sudah dibayar",
            TransactionStatus::Delivered => "Sudah diambil",
            TransactionStatus::Done => "Selesai",
            TransactionStatus::Canceled => "Dibatalkan",
        }
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Pending
    }
}

/// Accepted payment methods.
pub const PAYMENT_METHODS: [PaymentMethod; 3] = [
    PaymentMethod::Cash,
    PaymentMethod::BankTransfer,
    PaymentMethod::Qris,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Qris,
}

impl PaymentMethod {
    /// Indonesian display label.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Tunai",
            PaymentMethod::BankTransfer => "Transfer Bank",
            PaymentMethod::Qris => "QRIS",
        }
    }
}

// =============================================================================
// Items & Discount
// =============================================================================

/// One service line on a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransactionItem {
    pub name: String,
    pub price: Money,
    pub qty: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    /// Photo of the goods at drop-off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_in: Option<String>,
    /// Photo of the goods at pick-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_out: Option<String>,
}

impl TransactionItem {
    /// An item with just the required fields.
    pub fn new(name: impl Into<String>, price: Money, qty: i64) -> Self {
        TransactionItem {
            name: name.into(),
            price,
            qty,
            note: None,
            item_type: None,
            image_in: None,
            image_out: None,
        }
    }

    /// Line total before discount (price × qty).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.times(self.qty)
    }
}

/// A discount applied to the whole transaction, fixed-amount or
/// percentage-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Discount {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_value: Option<DiscountRate>,
}

impl Discount {
    /// The reduction this discount takes off the given subtotal.
    ///
    /// A nonzero fixed amount wins over the percentage; a zero amount falls
    /// through to the percentage, and with neither the reduction is zero.
    pub fn applied_to(&self, subtotal: Money) -> Money {
        match self.amount_value {
            Some(amount) if !amount.is_zero() => amount,
            _ => self
                .percentage_value
                .map(|rate| rate.of(subtotal))
                .unwrap_or_else(Money::zero),
        }
    }
}

// =============================================================================
// Parties
// =============================================================================

/// A non-owning pointer to another entity plus the frozen display fields
/// copied from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party<K, S> {
    #[serde(rename = "ref")]
    pub reference: EntityReference<K>,
    pub snapshot: S,
}

/// A party on a creation input: the reference is still path-only and gets
/// resolved through the adapter by [`Transaction::create`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParty<K, S> {
    #[serde(rename = "ref")]
    pub reference: RawReference<K>,
    pub snapshot: S,
}

// =============================================================================
// Payload
// =============================================================================

/// The stored shape of a transaction document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub customer: Party<Customer, CustomerSnapshot>,
    pub status: TransactionStatus,
    pub items: Vec<TransactionItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_finished_at: Option<PointInTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// The user who received the goods at drop-off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Party<User, UserSnapshot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: PointInTime,
    pub created_by: Party<User, UserSnapshot>,
    pub updated_at: PointInTime,
}

/// Creation input: the caller names the parties and the items; everything
/// else is system-managed. There is no status field here, so a fresh
/// transaction cannot start anywhere but `pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub customer: RawParty<Customer, CustomerSnapshot>,
    pub created_by: RawParty<User, UserSnapshot>,
    pub items: Vec<TransactionItem>,
}

// =============================================================================
// Mutations
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionPatch {
    Status(TransactionStatus),
    Items(Vec<TransactionItem>),
    EstimatedFinishedAt(Option<PointInTime>),
    Discount(Option<Discount>),
    PaidAmount(Option<Money>),
    PaymentMethod(Option<PaymentMethod>),
    Receiver(Option<Party<User, UserSnapshot>>),
    Note(Option<String>),
}

impl RecordPatch<Transaction> for TransactionPatch {
    fn field(&self) -> &'static str {
        match self {
            TransactionPatch::Status(_) => "status",
            TransactionPatch::Items(_) => "items",
            TransactionPatch::EstimatedFinishedAt(_) => "estimatedFinishedAt",
            TransactionPatch::Discount(_) => "discount",
            TransactionPatch::PaidAmount(_) => "paidAmount",
            TransactionPatch::PaymentMethod(_) => "paymentMethod",
            TransactionPatch::Receiver(_) => "receiver",
            TransactionPatch::Note(_) => "note",
        }
    }

    fn apply(&self, data: &mut Transaction) {
        match self {
            TransactionPatch::Status(status) => data.status = *status,
            TransactionPatch::Items(items) => data.items = items.clone(),
            TransactionPatch::EstimatedFinishedAt(at) => data.estimated_finished_at = *at,
            TransactionPatch::Discount(discount) => data.discount = discount.clone(),
            TransactionPatch::PaidAmount(amount) => data.paid_amount = *amount,
            TransactionPatch::PaymentMethod(method) => data.payment_method = *method,
            TransactionPatch::Receiver(receiver) => data.receiver = receiver.clone(),
            TransactionPatch::Note(note) => data.note = note.clone(),
        }
    }
}

impl Payload for Transaction {
    type Patch = TransactionPatch;

    fn touch(&mut self, at: PointInTime) {
        self.updated_at = at;
    }
}

impl EntityKind for Transaction {
    const COLLECTION: &'static str = "transactions";
}

// =============================================================================
// Construction & Derived Views
// =============================================================================

impl Transaction {
    /// Builds a not-yet-persisted transaction.
    ///
    /// Resolves the party references through the adapter, forces the status
    /// to `pending`, and stamps both timestamps.
    pub fn create(adapter: &dyn ScalarAdapter, draft: TransactionDraft) -> Record<Transaction> {
        let at = now(adapter);
        Record::new(Transaction {
            customer: Party {
                reference: resolve_reference(adapter, &draft.customer.reference),
                snapshot: draft.customer.snapshot,
            },
            status: TransactionStatus::Pending,
            items: draft.items,
            estimated_finished_at: None,
            discount: None,
            paid_amount: None,
            payment_method: None,
            receiver: None,
            note: None,
            created_at: at,
            created_by: Party {
                reference: resolve_reference(adapter, &draft.created_by.reference),
                snapshot: draft.created_by.snapshot,
            },
            updated_at: at,
        })
    }

    /// Total piece count across all items.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| item.qty).sum()
    }

    /// The service names on this transaction, in item order.
    pub fn services(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }

    /// Sum of line totals before discount.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(TransactionItem::line_total).sum()
    }

    /// Subtotal minus the discount reduction.
    ///
    /// Recomputed on every access; payloads are small and mutation-driven
    /// caching would not pay for itself.
    pub fn total_price(&self) -> Money {
        let subtotal = self.subtotal();
        let reduction = self
            .discount
            .as_ref()
            .map(|discount| discount.applied_to(subtotal))
            .unwrap_or_else(Money::zero);
        subtotal - reduction
    }
}

// =============================================================================
// Flattening
// =============================================================================

/// A fully denormalized, export-ready transaction record.
///
/// Nested reference paths and snapshot fields are hoisted to top-level
/// scalars, instants become ISO-8601 strings, and list-valued item fields
/// become comma-joined columns — for reporting contexts (spreadsheets, CSV
/// pipelines) that cannot consume nested structures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FlatTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: TransactionStatus,
    pub item_count: i64,
    pub total_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_finished_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_whats_app_number: String,
    pub created_by_id: String,
    pub created_by_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage_value: Option<DiscountRate>,
    pub item_names: String,
    pub item_prices: String,
    pub item_qtys: String,
    pub item_notes: String,
    pub item_types: String,
    pub item_image_ins: String,
    pub item_image_outs: String,
}

impl Record<Transaction> {
    /// Produces the denormalized export record for this transaction.
    ///
    /// Absent optional item fields join as empty segments (`"a,,c"`), so
    /// every item column has the same number of segments as there are items.
    pub fn flatten(&self, adapter: &dyn ScalarAdapter) -> FlatTransaction {
        let data = self.data();

        let iso = |at: PointInTime| {
            adapter
                .point_in_time_to(at)
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        };
        let join = |field: &dyn Fn(&TransactionItem) -> String| {
            data.items.iter().map(field).collect::<Vec<_>>().join(",")
        };

        FlatTransaction {
            id: self.id().map(str::to_string),
            status: data.status,
            item_count: data.item_count(),
            total_price: data.total_price(),
            estimated_finished_at: data.estimated_finished_at.map(iso),
            paid_amount: data.paid_amount,
            payment_method: data.payment_method,
            note: data.note.clone(),
            created_at: iso(data.created_at),
            updated_at: iso(data.updated_at),
            customer_id: data.customer.reference.path.clone(),
            customer_name: data.customer.snapshot.name.clone(),
            customer_whats_app_number: data.customer.snapshot.whats_app_number.clone(),
            created_by_id: data.created_by.reference.path.clone(),
            created_by_name: data.created_by.snapshot.name.clone(),
            receiver_id: data
                .receiver
                .as_ref()
                .map(|receiver| receiver.reference.path.clone()),
            receiver_name: data
                .receiver
                .as_ref()
                .map(|receiver| receiver.snapshot.name.clone()),
            discount_name: data.discount.as_ref().map(|d| d.name.clone()),
            discount_labels: data.discount.as_ref().and_then(|d| d.labels.clone()),
            discount_amount_value: data.discount.as_ref().and_then(|d| d.amount_value),
            discount_percentage_value: data.discount.as_ref().and_then(|d| d.percentage_value),
            item_names: join(&|item| item.name.clone()),
            item_prices: join(&|item| item.price.amount().to_string()),
            item_qtys: join(&|item| item.qty.to_string()),
            item_notes: join(&|item| item.note.clone().unwrap_or_default()),
            item_types: join(&|item| item.item_type.clone().unwrap_or_default()),
            item_image_ins: join(&|item| item.image_in.clone().unwrap_or_default()),
            item_image_outs: join(&|item| item.image_out.clone().unwrap_or_default()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::SystemAdapter;

    fn draft(items: Vec<TransactionItem>) -> TransactionDraft {
        TransactionDraft {
            customer: RawParty {
                reference: RawReference::to_document("cust-1"),
                snapshot: CustomerSnapshot {
                    name: "Sari".into(),
                    whats_app_number: "6281234567890".into(),
                },
            },
            created_by: RawParty {
                reference: RawReference::to_document("user-1"),
                snapshot: UserSnapshot { name: "Budi".into() },
            },
            items,
        }
    }

    fn wash_and_iron() -> Vec<TransactionItem> {
        vec![
            TransactionItem::new("Wash", Money::new(10_000), 2),
            TransactionItem::new("Iron", Money::new(5_000), 1),
        ]
    }

    #[test]
    fn test_create_forces_pending_and_resolves_references() {
        let adapter = SystemAdapter;
        let record = Transaction::create(&adapter, draft(wash_and_iron()));
        let data = record.data();

        assert_eq!(record.id(), None);
        assert_eq!(data.status, TransactionStatus::Pending);
        assert_eq!(data.created_at, data.updated_at);
        assert_eq!(data.customer.reference.id, "cust-1");
        assert_eq!(data.customer.reference.path, "customers/cust-1");
        assert_eq!(data.created_by.reference.id, "user-1");
    }

    #[test]
    fn test_derived_views() {
        let adapter = SystemAdapter;
        let record = Transaction::create(&adapter, draft(wash_and_iron()));

        assert_eq!(record.data().item_count(), 3);
        assert_eq!(record.data().services(), vec!["Wash", "Iron"]);
        assert_eq!(record.data().subtotal(), Money::new(25_000));
        assert_eq!(record.data().total_price(), Money::new(25_000));
    }

    #[test]
    fn test_discount_amount_wins_over_percentage() {
        let discount = Discount {
            name: "grand opening".into(),
            labels: None,
            amount_value: Some(Money::new(3_000)),
            percentage_value: Some(DiscountRate::from_fraction(0.5)),
        };
        assert_eq!(discount.applied_to(Money::new(25_000)), Money::new(3_000));
    }

    #[test]
    fn test_discount_zero_amount_falls_through_to_percentage() {
        let discount = Discount {
            name: "member".into(),
            labels: None,
            amount_value: Some(Money::zero()),
            percentage_value: Some(DiscountRate::from_fraction(0.1)),
        };
        assert_eq!(discount.applied_to(Money::new(25_000)), Money::new(2_500));
    }

    #[test]
    fn test_discount_with_neither_value_reduces_nothing() {
        let discount = Discount {
            name: "announced only".into(),
            labels: Some(vec!["promo".into()]),
            amount_value: None,
            percentage_value: None,
        };
        assert_eq!(discount.applied_to(Money::new(25_000)), Money::zero());
    }

    #[test]
    fn test_total_price_with_percentage_discount() {
        let adapter = SystemAdapter;
        let mut record = Transaction::create(&adapter, draft(wash_and_iron()));
        record.set(
            &adapter,
            TransactionPatch::Discount(Some(Discount {
                name: "member".into(),
                labels: None,
                amount_value: None,
                percentage_value: Some(DiscountRate::from_fraction(0.1)),
            })),
        );

        assert_eq!(record.data().total_price(), Money::new(22_500));
    }

    #[test]
    fn test_status_transitions_unconstrained() {
        let adapter = SystemAdapter;
        let mut record = Transaction::create(&adapter, draft(wash_and_iron()));

        // Straight from the queue to delivered, then back to wip: allowed
        // here, judged elsewhere.
        record.set(&adapter, TransactionPatch::Status(TransactionStatus::Delivered));
        assert_eq!(record.data().status, TransactionStatus::Delivered);
        record.set(&adapter, TransactionPatch::Status(TransactionStatus::Wip));
        assert_eq!(record.data().status, TransactionStatus::Wip);
    }

    #[test]
    fn test_flatten_without_discount() {
        let adapter = SystemAdapter;
        let record = Transaction::create(&adapter, draft(wash_and_iron()));
        let flat = record.flatten(&adapter);

        assert_eq!(flat.item_count, 3);
        assert_eq!(flat.total_price, Money::new(25_000));
        assert_eq!(flat.item_names, "Wash,Iron");
        assert_eq!(flat.item_prices, "10000,5000");
        assert_eq!(flat.item_qtys, "2,1");
        assert_eq!(flat.item_notes, ",");
        assert_eq!(flat.customer_id, "customers/cust-1");
        assert_eq!(flat.customer_name, "Sari");
        assert_eq!(flat.created_by_name, "Budi");
        assert_eq!(flat.receiver_id, None);
        assert_eq!(flat.discount_name, None);
        assert!(flat.created_at.ends_with('Z'));
    }

    #[test]
    fn test_flatten_hoists_optional_item_fields_as_empty_segments() {
        let adapter = SystemAdapter;
        let mut items = wash_and_iron();
        items[0].note = Some("stain on collar".into());
        items[0].item_type = Some("shirt".into());

        let record = Transaction::create(&adapter, draft(items));
        let flat = record.flatten(&adapter);

        assert_eq!(flat.item_notes, "stain on collar,");
        assert_eq!(flat.item_types, "shirt,");
        assert_eq!(flat.item_image_ins, ",");
    }

    #[test]
    fn test_status_wire_values_and_labels() {
        assert_eq!(
            serde_json::to_value(TransactionStatus::TaskDone).unwrap(),
            serde_json::json!("task-done")
        );
        assert_eq!(
            serde_json::to_value(PaymentMethod::BankTransfer).unwrap(),
            serde_json::json!("bank_transfer")
        );
        assert_eq!(TransactionStatus::Pending.label(), "Dalam antrian");
        assert_eq!(PaymentMethod::Qris.label(), "QRIS");
        assert_eq!(TRANSACTION_STATUSES.len(), 7);
    }

    #[test]
    fn test_payload_round_trip() {
        let adapter = SystemAdapter;
        let mut record = Transaction::create(&adapter, draft(wash_and_iron()));
        record.set(&adapter, TransactionPatch::PaidAmount(Some(Money::new(25_000))));
        record.set(&adapter, TransactionPatch::PaymentMethod(Some(PaymentMethod::Cash)));

        let json = serde_json::to_string(record.data()).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, record.data());
    }

    #[test]
    fn test_pending_update_shape() {
        let adapter = SystemAdapter;
        let mut record = Transaction::create(&adapter, draft(wash_and_iron()));
        record.set(&adapter, TransactionPatch::Status(TransactionStatus::Wip));
        record.set(&adapter, TransactionPatch::Note(Some("rush order".into())));

        let update = record.pending_update();
        assert_eq!(update["status"], serde_json::json!("wip"));
        assert_eq!(update["note"], serde_json::json!("rush order"));
        assert_eq!(update.len(), 2);
    }
}
