//! Domain event trait.

use chrono::{DateTime, Utc};

use crate::id::TenantId;

/// A domain event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **versioned** (schema evolution)
/// - **tenant-scoped** (every fact belongs to exactly one organization)
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "purchasing.record.created").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// Tenant the event belongs to.
    fn tenant_id(&self) -> TenantId;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
