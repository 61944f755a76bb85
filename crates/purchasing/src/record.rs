use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mandierp_core::{
    Aggregate, AggregateId, AggregateRoot, DomainError, DomainResult, Event, ProductId, TenantId,
};
use mandierp_pricing::{
    compute_totals, validate, CostRule, LineItem, PricingModel, PurchaseTotals, TotalPolicy,
};

/// Purchase record identifier (tenant-scoped via `tenant_id` fields in events/commands).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseRecordId(pub AggregateId);

impl PurchaseRecordId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PurchaseRecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Supplier identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(pub AggregateId);

impl SupplierId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for SupplierId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Closure requested on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Closure {
    /// Settled in part; the record stays editable.
    Partial,
    /// Fully settled; the record accepts no further lines or costs.
    Full,
}

/// Purchase record status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseRecordStatus {
    Open,
    PartiallyClosed,
    FullyClosed,
}

/// One purchase line: a product plus its raw pricing input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordLine {
    pub line_no: u32,
    pub product_id: ProductId,
    pub item: LineItem,
}

/// Aggregate root: PurchaseRecord.
///
/// State holds only raw inputs. Derived figures (unit prices, line totals,
/// allocated costs, grand total) are recomputed on read via [`Self::totals`],
/// never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    id: PurchaseRecordId,
    tenant_id: Option<TenantId>,
    supplier_id: Option<SupplierId>,
    pricing_model: Option<PricingModel>,
    total_policy: Option<TotalPolicy>,
    status: PurchaseRecordStatus,
    lines: Vec<RecordLine>,
    costs: Vec<CostRule>,
    version: u64,
    created: bool,
}

impl PurchaseRecord {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: PurchaseRecordId) -> Self {
        Self {
            id,
            tenant_id: None,
            supplier_id: None,
            pricing_model: None,
            total_policy: None,
            status: PurchaseRecordStatus::Open,
            lines: Vec::new(),
            costs: Vec::new(),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> PurchaseRecordId {
        self.id
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    pub fn supplier_id(&self) -> Option<SupplierId> {
        self.supplier_id
    }

    pub fn pricing_model(&self) -> Option<PricingModel> {
        self.pricing_model
    }

    pub fn total_policy(&self) -> Option<TotalPolicy> {
        self.total_policy
    }

    pub fn status(&self) -> PurchaseRecordStatus {
        self.status
    }

    pub fn lines(&self) -> &[RecordLine] {
        &self.lines
    }

    pub fn costs(&self) -> &[CostRule] {
        &self.costs
    }

    /// Invariant: a fully closed record accepts no further lines or costs.
    /// Partial closure keeps the record editable.
    pub fn is_modifiable(&self) -> bool {
        self.status != PurchaseRecordStatus::FullyClosed
    }

    /// Derived money figures, recomputed from raw state on every call.
    pub fn totals(&self) -> DomainResult<PurchaseTotals> {
        let model = self
            .pricing_model
            .ok_or_else(|| DomainError::invariant("pricing model not set"))?;
        let policy = self
            .total_policy
            .ok_or_else(|| DomainError::invariant("total policy not set"))?;

        let items: Vec<LineItem> = self.lines.iter().map(|l| l.item.clone()).collect();
        Ok(compute_totals(model, &items, &self.costs, policy))
    }
}

impl AggregateRoot for PurchaseRecord {
    type Id = PurchaseRecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreatePurchaseRecord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePurchaseRecord {
    pub tenant_id: TenantId,
    pub record_id: PurchaseRecordId,
    pub supplier_id: SupplierId,
    pub pricing_model: PricingModel,
    pub total_policy: TotalPolicy,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddLine (rejected once the record is fully closed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddLine {
    pub tenant_id: TenantId,
    pub record_id: PurchaseRecordId,
    pub product_id: ProductId,
    pub item: LineItem,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddCost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCost {
    pub tenant_id: TenantId,
    pub record_id: PurchaseRecordId,
    pub rule: CostRule,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClosePurchaseRecord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosePurchaseRecord {
    pub tenant_id: TenantId,
    pub record_id: PurchaseRecordId,
    pub closure: Closure,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PurchaseRecordCommand {
    CreatePurchaseRecord(CreatePurchaseRecord),
    AddLine(AddLine),
    AddCost(AddCost),
    ClosePurchaseRecord(ClosePurchaseRecord),
}

/// Event: PurchaseRecordCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecordCreated {
    pub tenant_id: TenantId,
    pub record_id: PurchaseRecordId,
    pub supplier_id: SupplierId,
    pub pricing_model: PricingModel,
    pub total_policy: TotalPolicy,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PurchaseLineAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseLineAdded {
    pub tenant_id: TenantId,
    pub record_id: PurchaseRecordId,
    pub line_no: u32,
    pub product_id: ProductId,
    pub item: LineItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PurchaseCostAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseCostAdded {
    pub tenant_id: TenantId,
    pub record_id: PurchaseRecordId,
    pub rule: CostRule,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PurchaseRecordClosed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecordClosed {
    pub tenant_id: TenantId,
    pub record_id: PurchaseRecordId,
    pub closure: Closure,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PurchaseRecordEvent {
    PurchaseRecordCreated(PurchaseRecordCreated),
    PurchaseLineAdded(PurchaseLineAdded),
    PurchaseCostAdded(PurchaseCostAdded),
    PurchaseRecordClosed(PurchaseRecordClosed),
}

impl Event for PurchaseRecordEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PurchaseRecordEvent::PurchaseRecordCreated(_) => "purchasing.record.created",
            PurchaseRecordEvent::PurchaseLineAdded(_) => "purchasing.record.line_added",
            PurchaseRecordEvent::PurchaseCostAdded(_) => "purchasing.record.cost_added",
            PurchaseRecordEvent::PurchaseRecordClosed(_) => "purchasing.record.closed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn tenant_id(&self) -> TenantId {
        match self {
            PurchaseRecordEvent::PurchaseRecordCreated(e) => e.tenant_id,
            PurchaseRecordEvent::PurchaseLineAdded(e) => e.tenant_id,
            PurchaseRecordEvent::PurchaseCostAdded(e) => e.tenant_id,
            PurchaseRecordEvent::PurchaseRecordClosed(e) => e.tenant_id,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PurchaseRecordEvent::PurchaseRecordCreated(e) => e.occurred_at,
            PurchaseRecordEvent::PurchaseLineAdded(e) => e.occurred_at,
            PurchaseRecordEvent::PurchaseCostAdded(e) => e.occurred_at,
            PurchaseRecordEvent::PurchaseRecordClosed(e) => e.occurred_at,
        }
    }
}

impl Aggregate for PurchaseRecord {
    type Command = PurchaseRecordCommand;
    type Event = PurchaseRecordEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            PurchaseRecordEvent::PurchaseRecordCreated(e) => {
                self.id = e.record_id;
                self.tenant_id = Some(e.tenant_id);
                self.supplier_id = Some(e.supplier_id);
                self.pricing_model = Some(e.pricing_model);
                self.total_policy = Some(e.total_policy);
                self.status = PurchaseRecordStatus::Open;
                self.lines.clear();
                self.costs.clear();
                self.created = true;
            }
            PurchaseRecordEvent::PurchaseLineAdded(e) => {
                self.lines.push(RecordLine {
                    line_no: e.line_no,
                    product_id: e.product_id,
                    item: e.item.clone(),
                });
            }
            PurchaseRecordEvent::PurchaseCostAdded(e) => {
                self.costs.push(e.rule.clone());
            }
            PurchaseRecordEvent::PurchaseRecordClosed(e) => {
                self.status = match e.closure {
                    Closure::Partial => PurchaseRecordStatus::PartiallyClosed,
                    Closure::Full => PurchaseRecordStatus::FullyClosed,
                };
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            PurchaseRecordCommand::CreatePurchaseRecord(cmd) => self.handle_create(cmd),
            PurchaseRecordCommand::AddLine(cmd) => self.handle_add_line(cmd),
            PurchaseRecordCommand::AddCost(cmd) => self.handle_add_cost(cmd),
            PurchaseRecordCommand::ClosePurchaseRecord(cmd) => self.handle_close(cmd),
        }
    }
}

impl PurchaseRecord {
    fn ensure_tenant(&self, tenant_id: TenantId) -> Result<(), DomainError> {
        if !self.created {
            return Ok(());
        }
        if self.tenant_id != Some(tenant_id) {
            return Err(DomainError::invariant("tenant mismatch"));
        }
        Ok(())
    }

    fn ensure_record_id(&self, record_id: PurchaseRecordId) -> Result<(), DomainError> {
        if self.id != record_id {
            return Err(DomainError::invariant("record_id mismatch"));
        }
        Ok(())
    }

    fn ensure_modifiable(&self) -> Result<(), DomainError> {
        if !self.is_modifiable() {
            return Err(DomainError::invariant(
                "cannot modify a fully closed purchase record",
            ));
        }
        Ok(())
    }

    fn handle_create(
        &self,
        cmd: &CreatePurchaseRecord,
    ) -> Result<Vec<PurchaseRecordEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("purchase record already exists"));
        }

        Ok(vec![PurchaseRecordEvent::PurchaseRecordCreated(
            PurchaseRecordCreated {
                tenant_id: cmd.tenant_id,
                record_id: cmd.record_id,
                supplier_id: cmd.supplier_id,
                pricing_model: cmd.pricing_model,
                total_policy: cmd.total_policy,
                occurred_at: cmd.occurred_at,
            },
        )])
    }

    fn handle_add_line(&self, cmd: &AddLine) -> Result<Vec<PurchaseRecordEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_tenant(cmd.tenant_id)?;
        self.ensure_record_id(cmd.record_id)?;
        self.ensure_modifiable()?;

        let model = self
            .pricing_model
            .ok_or_else(|| DomainError::invariant("pricing model not set"))?;

        // The engine tolerates degenerate numbers; the boundary does not.
        validate::validate_line(model, &cmd.item)?;

        let next_line_no = (self.lines.len() as u32) + 1;
        Ok(vec![PurchaseRecordEvent::PurchaseLineAdded(
            PurchaseLineAdded {
                tenant_id: cmd.tenant_id,
                record_id: cmd.record_id,
                line_no: next_line_no,
                product_id: cmd.product_id,
                item: cmd.item.clone(),
                occurred_at: cmd.occurred_at,
            },
        )])
    }

    fn handle_add_cost(&self, cmd: &AddCost) -> Result<Vec<PurchaseRecordEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_tenant(cmd.tenant_id)?;
        self.ensure_record_id(cmd.record_id)?;
        self.ensure_modifiable()?;

        validate::validate_cost(&cmd.rule)?;

        Ok(vec![PurchaseRecordEvent::PurchaseCostAdded(
            PurchaseCostAdded {
                tenant_id: cmd.tenant_id,
                record_id: cmd.record_id,
                rule: cmd.rule.clone(),
                occurred_at: cmd.occurred_at,
            },
        )])
    }

    fn handle_close(
        &self,
        cmd: &ClosePurchaseRecord,
    ) -> Result<Vec<PurchaseRecordEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_tenant(cmd.tenant_id)?;
        self.ensure_record_id(cmd.record_id)?;

        match (self.status, cmd.closure) {
            (PurchaseRecordStatus::FullyClosed, _) => {
                return Err(DomainError::invariant(
                    "purchase record is already fully closed",
                ));
            }
            (PurchaseRecordStatus::PartiallyClosed, Closure::Partial) => {
                return Err(DomainError::invariant(
                    "purchase record is already partially closed",
                ));
            }
            _ => {}
        }

        if self.lines.is_empty() {
            return Err(DomainError::validation(
                "cannot close a purchase record without lines",
            ));
        }

        Ok(vec![PurchaseRecordEvent::PurchaseRecordClosed(
            PurchaseRecordClosed {
                tenant_id: cmd.tenant_id,
                record_id: cmd.record_id,
                closure: cmd.closure,
                occurred_at: cmd.occurred_at,
            },
        )])
    }
}
