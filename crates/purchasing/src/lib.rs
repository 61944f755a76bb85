//! Purchasing domain module (purchase records, event-sourced).
//!
//! A purchase record captures one vehicle arrival from a supplier: its
//! pricing model, line items, and additional-cost rules. Business rules are
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). All money figures are derived on read through
//! [`mandierp_pricing`]; nothing derived is ever stored in aggregate state.

pub mod record;

pub use record::{
    AddCost, AddLine, ClosePurchaseRecord, Closure, CreatePurchaseRecord, PurchaseCostAdded,
    PurchaseLineAdded, PurchaseRecord, PurchaseRecordClosed, PurchaseRecordCommand,
    PurchaseRecordCreated, PurchaseRecordEvent, PurchaseRecordId, PurchaseRecordStatus,
    RecordLine, SupplierId,
};
