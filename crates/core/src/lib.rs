//! `mandierp-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the pricing and
//! purchasing modules (no infrastructure concerns).

pub mod aggregate;
pub mod error;
pub mod event;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{AggregateId, ProductId, TenantId};
pub use value_object::ValueObject;
