//! The pure pricing computation.
//!
//! Every function here is total over `f64`: zero, negative, `NaN` and
//! infinity pass straight through the arithmetic. Nothing rounds and nothing
//! clamps — a commission above 100% yields a negative unit price verbatim.
//! Bounds belong to [`crate::validate`], which callers run before trusting
//! input, never to the math itself.

use crate::model::{
    CostKind, CostRule, LineItem, PricedCost, PricedLine, PricingModel, PurchaseTotals,
    TotalPolicy, UnitType,
};

/// Effective price per unit for a line under the given pricing model.
///
/// Commission: `market_price * (1 - commission_percent / 100)`.
/// Fixed: the entered `unit_price`, unchanged.
pub fn unit_price(model: PricingModel, item: &LineItem) -> f64 {
    match model {
        PricingModel::Commission => item.market_price * (1.0 - item.commission_percent / 100.0),
        PricingModel::Fixed => item.unit_price,
    }
}

/// Line total: `quantity * unit_price`, unrounded.
pub fn line_total(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// Total quantity across `Box`-typed lines.
///
/// Loose lines never contribute, whatever their quantity.
pub fn box_quantity(lines: &[LineItem]) -> f64 {
    lines
        .iter()
        .filter(|l| l.unit_type == UnitType::Box)
        .map(|l| l.quantity)
        .sum()
}

/// Calculated amount for one additional-cost rule.
pub fn cost_amount(rule: &CostRule, items_subtotal: f64, box_quantity: f64) -> f64 {
    match rule.kind {
        CostKind::Fixed => rule.amount,
        CostKind::Percentage => items_subtotal * rule.amount / 100.0,
        CostKind::PerBox => rule.amount * box_quantity,
    }
}

/// Price every line, allocate every cost, and roll up the totals.
///
/// The policy is explicit on every call: `Add` treats costs as landed cost
/// on top of the items subtotal, `Deduct` treats them as amounts withheld
/// from the payable.
pub fn compute_totals(
    model: PricingModel,
    lines: &[LineItem],
    rules: &[CostRule],
    policy: TotalPolicy,
) -> PurchaseTotals {
    let priced_lines: Vec<PricedLine> = lines
        .iter()
        .map(|item| {
            let unit = unit_price(model, item);
            PricedLine {
                item: item.clone(),
                unit_price: unit,
                total: line_total(item.quantity, unit),
            }
        })
        .collect();

    let items_subtotal: f64 = priced_lines.iter().map(|l| l.total).sum();
    let boxes = box_quantity(lines);

    let priced_costs: Vec<PricedCost> = rules
        .iter()
        .map(|rule| PricedCost {
            rule: rule.clone(),
            calculated_amount: cost_amount(rule, items_subtotal, boxes),
        })
        .collect();

    let additional_costs_total: f64 = priced_costs.iter().map(|c| c.calculated_amount).sum();

    let grand_total = match policy {
        TotalPolicy::Add => items_subtotal + additional_costs_total,
        TotalPolicy::Deduct => items_subtotal - additional_costs_total,
    };

    PurchaseTotals {
        priced_lines,
        priced_costs,
        items_subtotal,
        additional_costs_total,
        grand_total,
    }
}
