//! End-to-end flow over a purchase record: create, price lines, allocate
//! costs, close. Drives the aggregate the way an API layer would, logging
//! included.

use chrono::Utc;
use mandierp_core::{Aggregate, AggregateId, AggregateRoot, ProductId, TenantId};
use mandierp_pricing::{CostKind, CostRule, LineItem, PricingModel, TotalPolicy, UnitType};
use mandierp_purchasing::{
    AddCost, AddLine, ClosePurchaseRecord, Closure, CreatePurchaseRecord, PurchaseRecord,
    PurchaseRecordCommand, PurchaseRecordId, PurchaseRecordStatus, SupplierId,
};

fn dispatch(record: &mut PurchaseRecord, cmd: PurchaseRecordCommand) {
    let events = record.handle(&cmd).unwrap();
    for event in &events {
        record.apply(event);
    }
}

#[test]
fn vehicle_arrival_from_creation_to_full_closure() {
    mandierp_observability::init_with_filter("info");

    let tenant_id = TenantId::new();
    let record_id = PurchaseRecordId::new(AggregateId::new());
    let supplier_id = SupplierId::new(AggregateId::new());
    let mut record = PurchaseRecord::empty(record_id);

    dispatch(
        &mut record,
        PurchaseRecordCommand::CreatePurchaseRecord(CreatePurchaseRecord {
            tenant_id,
            record_id,
            supplier_id,
            pricing_model: PricingModel::Commission,
            total_policy: TotalPolicy::Deduct,
            occurred_at: Utc::now(),
        }),
    );

    // Two commission-priced lines: 80 boxes of apples, 120 kg of loose grapes.
    dispatch(
        &mut record,
        PurchaseRecordCommand::AddLine(AddLine {
            tenant_id,
            record_id,
            product_id: ProductId::new(),
            item: LineItem::commission(80.0, UnitType::Box, 1000.0, 8.0),
            occurred_at: Utc::now(),
        }),
    );
    dispatch(
        &mut record,
        PurchaseRecordCommand::AddLine(AddLine {
            tenant_id,
            record_id,
            product_id: ProductId::new(),
            item: LineItem::commission(120.0, UnitType::Loose, 90.0, 10.0),
            occurred_at: Utc::now(),
        }),
    );

    for rule in [
        CostRule::new("Labour", 5.0, CostKind::PerBox),
        CostRule::new("Vehicle", 2000.0, CostKind::Fixed),
    ] {
        dispatch(
            &mut record,
            PurchaseRecordCommand::AddCost(AddCost {
                tenant_id,
                record_id,
                rule,
                occurred_at: Utc::now(),
            }),
        );
    }

    // 80 * 920 + 120 * 81 = 73_600 + 9_720 = 83_320.
    // Labour counts the 80 boxes only: 400. Costs total 2_400.
    // Deduct policy: payable = 83_320 - 2_400 = 80_920.
    let totals = record.totals().unwrap();
    assert_eq!(totals.priced_lines[0].unit_price, 920.0);
    assert_eq!(totals.priced_lines[1].unit_price, 81.0);
    assert_eq!(totals.items_subtotal, 83_320.0);
    assert_eq!(totals.additional_costs_total, 2_400.0);
    assert_eq!(totals.grand_total, 80_920.0);

    // Partial settlement first; a late cost still lands.
    dispatch(
        &mut record,
        PurchaseRecordCommand::ClosePurchaseRecord(ClosePurchaseRecord {
            tenant_id,
            record_id,
            closure: Closure::Partial,
            occurred_at: Utc::now(),
        }),
    );
    dispatch(
        &mut record,
        PurchaseRecordCommand::AddCost(AddCost {
            tenant_id,
            record_id,
            rule: CostRule::new("Handling", 3.0, CostKind::PerBox),
            occurred_at: Utc::now(),
        }),
    );
    assert_eq!(record.totals().unwrap().grand_total, 80_680.0);

    dispatch(
        &mut record,
        PurchaseRecordCommand::ClosePurchaseRecord(ClosePurchaseRecord {
            tenant_id,
            record_id,
            closure: Closure::Full,
            occurred_at: Utc::now(),
        }),
    );
    assert_eq!(record.status(), PurchaseRecordStatus::FullyClosed);

    // Frozen: no further costs accepted.
    let err = record
        .handle(&PurchaseRecordCommand::AddCost(AddCost {
            tenant_id,
            record_id,
            rule: CostRule::new("Late fee", 100.0, CostKind::Fixed),
            occurred_at: Utc::now(),
        }))
        .unwrap_err();
    assert!(matches!(
        err,
        mandierp_core::DomainError::InvariantViolation(_)
    ));

    // create + 2 lines + 3 costs + 2 closures.
    assert_eq!(record.version(), 8);
}
