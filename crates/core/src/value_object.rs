//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — two instances
/// with the same attribute values are the same value. Line items and cost
/// rules in the pricing module are value objects; a purchase record, which
/// has identity and continuity across changes, is not.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
