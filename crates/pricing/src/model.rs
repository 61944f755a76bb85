//! Value types consumed and produced by the pricing engine.

use serde::{Deserialize, Serialize};

use mandierp_core::ValueObject;

/// How unit prices are derived, set once per purchase and applied uniformly
/// to all of its lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingModel {
    /// Unit price is a market price discounted by a percentage commission.
    Commission,
    /// Unit price is entered directly.
    Fixed,
}

/// Packaging discriminator.
///
/// Only `Box` lines count toward per-box cost allocation; `Loose` lines
/// (sold by weight) never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Box,
    Loose,
}

/// How an additional cost's `amount` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostKind {
    /// Flat amount.
    Fixed,
    /// Percentage of the items subtotal.
    Percentage,
    /// Rate multiplied by the total box quantity.
    PerBox,
}

/// Whether additional costs add to the payable total (landed cost) or are
/// deducted from it (commission/handling withheld from the amount payable).
///
/// Deliberately has no `Default`: callers must choose. The two conventions
/// produce materially different payables and both exist in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalPolicy {
    Add,
    Deduct,
}

/// One raw line of a purchase, as captured from a form.
///
/// Carries both price bases; the purchase's [`PricingModel`] decides which
/// fields are authoritative. Under `Commission` the `unit_price` field is
/// ignored and derived instead; under `Fixed` the market fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Units received: boxes, or kilograms for loose produce.
    pub quantity: f64,
    pub unit_type: UnitType,
    /// Market price per unit (commission model).
    #[serde(default)]
    pub market_price: f64,
    /// Commission percentage withheld from the market price (commission model).
    #[serde(default)]
    pub commission_percent: f64,
    /// Directly entered price per unit (fixed model).
    #[serde(default)]
    pub unit_price: f64,
}

impl LineItem {
    /// Line priced directly.
    pub fn fixed(quantity: f64, unit_type: UnitType, unit_price: f64) -> Self {
        Self {
            quantity,
            unit_type,
            market_price: 0.0,
            commission_percent: 0.0,
            unit_price,
        }
    }

    /// Line priced off a market price less commission.
    pub fn commission(
        quantity: f64,
        unit_type: UnitType,
        market_price: f64,
        commission_percent: f64,
    ) -> Self {
        Self {
            quantity,
            unit_type,
            market_price,
            commission_percent,
            unit_price: 0.0,
        }
    }
}

impl ValueObject for LineItem {}

/// A purchase-level surcharge or deduction rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRule {
    /// Free-form label ("Labour", "APMC"); not used in computation.
    pub name: String,
    /// Magnitude whose meaning depends on `kind`.
    pub amount: f64,
    pub kind: CostKind,
}

impl CostRule {
    pub fn new(name: impl Into<String>, amount: f64, kind: CostKind) -> Self {
        Self {
            name: name.into(),
            amount,
            kind,
        }
    }
}

impl ValueObject for CostRule {}

/// A line with its derived figures populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLine {
    pub item: LineItem,
    /// Effective price per unit under the purchase's pricing model.
    pub unit_price: f64,
    /// `quantity * unit_price`, unrounded.
    pub total: f64,
}

/// A cost rule with its derived amount populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedCost {
    pub rule: CostRule,
    pub calculated_amount: f64,
}

/// Full result of a pricing pass: every intermediate figure a caller might
/// display or persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseTotals {
    pub priced_lines: Vec<PricedLine>,
    pub priced_costs: Vec<PricedCost>,
    /// Sum of line totals.
    pub items_subtotal: f64,
    /// Sum of calculated cost amounts.
    pub additional_costs_total: f64,
    /// `items_subtotal + additional_costs_total` under [`TotalPolicy::Add`],
    /// `items_subtotal - additional_costs_total` under [`TotalPolicy::Deduct`].
    pub grand_total: f64,
}
