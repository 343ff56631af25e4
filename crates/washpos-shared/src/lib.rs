//! # washpos-shared: Shared Domain Model for washpos
//!
//! The one definition of every washpos entity, shared by the client app and
//! the reporting/export jobs. Everything in here is pure, synchronous,
//! in-memory transformation logic; persistence, querying, real-time sync,
//! and auth are delegated to a managed document backend that talks to this
//! crate only through plain payload shapes and the adapter seam.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       washpos Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Client App (web)                            │   │
//! │  │     forms ──► entity records ──► payloads ──► managed backend   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ washpos-shared (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌───────────────────────────────┐  │   │
//! │  │   │ adapter  │ │  record  │ │ user / customer / transaction │  │   │
//! │  │   │  seam    │ │ Record<T>│ │   payloads + typed patches    │  │   │
//! │  │   └──────────┘ └──────────┘ └───────────────────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        Managed document backend (external collaborator)         │   │
//! │  │        queries, listeners, transactions, auth, security         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`adapter`] - The pluggable conversion seam to backend-native scalars
//! - [`record`] - Versioned record: payload + identity + change tracking
//! - [`scalar`] - Points in time and typed document references
//! - [`money`] - Integer rupiah money and basis-point discount rates
//! - [`user`], [`customer`], [`transaction`] - The entities
//! - [`settings`] - The singleton app-settings document
//! - [`paths`] - Document path conventions
//! - [`time`] - Day-boundary helpers for query bounds
//! - [`error`] - The (minimal) error taxonomy
//!
//! ## Example
//!
//! ```rust
//! use washpos_shared::adapter::SystemAdapter;
//! use washpos_shared::customer::{Customer, CustomerPatch, NewCustomer};
//!
//! let adapter = SystemAdapter;
//! let mut customer = Customer::create(&adapter, NewCustomer {
//!     name: "Sari".into(),
//!     whats_app_number: "6281234567890".into(),
//!     origin: None,
//! });
//!
//! customer.set(&adapter, CustomerPatch::Origin(Some("hotel-melati".into())));
//! assert_eq!(customer.data().origin.as_deref(), Some("hotel-melati"));
//! assert!(customer.id().is_none()); // the store assigns identity on persist
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adapter;
pub mod customer;
pub mod error;
pub mod money;
pub mod paths;
pub mod record;
pub mod scalar;
pub mod settings;
pub mod time;
pub mod transaction;
pub mod user;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use adapter::{installed, now, resolve_reference, set_adapter, ScalarAdapter, SystemAdapter};
pub use customer::{Customer, CustomerPatch, CustomerSnapshot, NewCustomer, DEFAULT_ORIGIN};
pub use error::{AdapterError, SharedResult};
pub use money::{DiscountRate, Money};
pub use record::{Payload, Record, RecordPatch};
pub use scalar::{AnyReference, EntityKind, EntityReference, PointInTime, RawReference};
pub use settings::{AppSettings, DiscountSettings, ProductSettings};
pub use transaction::{
    Discount, FlatTransaction, Party, PaymentMethod, RawParty, Transaction, TransactionDraft,
    TransactionItem, TransactionPatch, TransactionStatus, PAYMENT_METHODS, TRANSACTION_STATUSES,
};
pub use user::{NewUser, User, UserPatch, UserSnapshot};
