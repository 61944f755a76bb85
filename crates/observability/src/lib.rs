//! Tracing/logging setup shared by binaries and test harnesses.

pub mod tracing;

pub use self::tracing::{init, init_with_filter};
