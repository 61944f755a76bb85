//! Input screening for the pricing engine.
//!
//! Kept strictly apart from the math in [`crate::engine`]: the engine stays
//! total over `f64`, and callers that accept user input (form handlers, the
//! purchase-record aggregate) run these checks first. A line or rule that
//! passes validation can be priced without producing `NaN`, infinities or
//! negative totals.

use mandierp_core::{DomainError, DomainResult};

use crate::model::{CostRule, LineItem, PricingModel};

/// Validate one raw line against the purchase's pricing model.
///
/// Only the fields the model treats as authoritative are checked; the unused
/// price basis may hold anything.
pub fn validate_line(model: PricingModel, item: &LineItem) -> DomainResult<()> {
    if !item.quantity.is_finite() {
        return Err(DomainError::validation("quantity must be a finite number"));
    }
    if item.quantity <= 0.0 {
        return Err(DomainError::validation("quantity must be positive"));
    }

    match model {
        PricingModel::Commission => {
            if !item.market_price.is_finite() || item.market_price <= 0.0 {
                return Err(DomainError::validation(
                    "market price must be a positive finite number",
                ));
            }
            if !item.commission_percent.is_finite()
                || !(0.0..=100.0).contains(&item.commission_percent)
            {
                return Err(DomainError::validation(
                    "commission percent must be between 0 and 100",
                ));
            }
        }
        PricingModel::Fixed => {
            if !item.unit_price.is_finite() || item.unit_price <= 0.0 {
                return Err(DomainError::validation(
                    "unit price must be a positive finite number",
                ));
            }
        }
    }

    Ok(())
}

/// Validate one additional-cost rule.
pub fn validate_cost(rule: &CostRule) -> DomainResult<()> {
    if rule.name.trim().is_empty() {
        return Err(DomainError::validation("cost name must not be empty"));
    }
    if !rule.amount.is_finite() {
        return Err(DomainError::validation(
            "cost amount must be a finite number",
        ));
    }
    Ok(())
}
