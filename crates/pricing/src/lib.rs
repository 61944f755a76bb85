//! Purchase pricing & cost allocation engine.
//!
//! This crate contains the single shared implementation of the purchase
//! pricing math: unit-price derivation (commission vs. fixed), line totals,
//! additional-cost allocation (fixed / percentage / per-box), and the grand
//! total under an explicit add-or-deduct policy.
//!
//! The engine is pure and total over its numeric domain: it never performs
//! IO, never rounds (currency rounding is a presentation concern), and never
//! rejects degenerate numbers — zero, negative, `NaN` and infinity all
//! propagate. Input screening lives in [`validate`], a separate layer that
//! callers compose in front of the math.

pub mod engine;
pub mod model;
pub mod validate;

pub use engine::{box_quantity, compute_totals, cost_amount, line_total, unit_price};
pub use model::{
    CostKind, CostRule, LineItem, PricedCost, PricedLine, PricingModel, PurchaseTotals,
    TotalPolicy, UnitType,
};
