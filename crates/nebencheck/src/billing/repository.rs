//! Storage seam for checked statements plus the read models served over
//! HTTP. Backends implement [`BillRepository`]; the service stays generic.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::billing::checks::CheckReport;
use crate::billing::domain::{
    BillId, BillStatus, CostCategory, CostPosition, Finding, PlausibilityVerdict,
    PositionAnnotation, RentalContract, UtilityBill,
};

/// Stored statement: the submitted data, its lifecycle status, and the most
/// recent check report (absent only while a record is still pending).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillRecord {
    pub bill_id: BillId,
    pub bill: UtilityBill,
    pub contract: RentalContract,
    pub positions: Vec<CostPosition>,
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<CheckReport>,
}

impl BillRecord {
    pub fn status_view(&self) -> BillStatusView {
        let report = self.report.as_ref();
        BillStatusView {
            bill_id: self.bill_id.clone(),
            billing_year: self.bill.billing_year,
            status: self.status.label(),
            score: report.map(|report| report.score),
            errors: report.map(CheckReport::errors).unwrap_or(0),
            warnings: report.map(CheckReport::warnings).unwrap_or(0),
        }
    }

    pub fn detail_view(&self) -> BillDetailView {
        let report = self.report.as_ref();
        BillDetailView {
            bill_id: self.bill_id.clone(),
            billing_year: self.bill.billing_year,
            period_start: self.bill.period.start,
            period_end: self.bill.period.end,
            received_date: self.bill.period.received,
            total_costs: self.bill.total_costs,
            total_advance_paid: self.bill.total_advance_paid,
            result_amount: self.bill.result_amount,
            notes: self.bill.notes.clone(),
            status: self.status.label(),
            score: report.map(|report| report.score),
            findings: report
                .map(|report| report.findings.clone())
                .unwrap_or_default(),
            positions: self.position_views(),
        }
    }

    /// Positions merged with whatever the checks annotated. Positions the
    /// checks never touched read as admissible and unverified.
    pub fn position_views(&self) -> Vec<PositionView> {
        let fallback = PositionAnnotation::default();
        self.positions
            .iter()
            .enumerate()
            .map(|(index, position)| {
                let annotation = self
                    .report
                    .as_ref()
                    .and_then(|report| report.annotations.get(index))
                    .unwrap_or(&fallback);

                PositionView {
                    category: position.category,
                    category_label: position.category.label(),
                    name: position.name.clone(),
                    total_amount: position.total_amount,
                    distribution_key: position.distribution_key.clone(),
                    tenant_share_percent: position.tenant_share_percent,
                    tenant_amount: position.tenant_amount,
                    notes: position.notes.clone(),
                    is_allowed: annotation.admissible,
                    inadmissible_reason: annotation.inadmissible_reason.clone(),
                    plausibility: annotation.plausibility,
                    reference_low: annotation.reference_low,
                    reference_high: annotation.reference_high,
                }
            })
            .collect()
    }
}

/// Compact listing row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillStatusView {
    pub bill_id: BillId,
    pub billing_year: i32,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    pub errors: usize,
    pub warnings: usize,
}

/// Full read model for one statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillDetailView {
    pub bill_id: BillId,
    pub billing_year: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_costs: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_advance_paid: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    pub findings: Vec<Finding>,
    pub positions: Vec<PositionView>,
}

/// One position with its check annotations folded in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionView {
    pub category: CostCategory,
    pub category_label: &'static str,
    pub name: String,
    pub total_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_share_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inadmissible_reason: Option<String>,
    pub plausibility: PlausibilityVerdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_low: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_high: Option<Decimal>,
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage backend contract.
pub trait BillRepository: Send + Sync {
    fn insert(&self, record: BillRecord) -> Result<BillRecord, RepositoryError>;
    fn update(&self, record: BillRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &BillId) -> Result<Option<BillRecord>, RepositoryError>;
}
