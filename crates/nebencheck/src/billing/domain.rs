//! Domain model for utility-cost statements: the statement header, its cost
//! positions, the tenancy context, and everything the check engine reports.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier assigned to a stored statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillId(pub String);

/// Cost categories seen on German operating-cost statements. The first
/// twelve carry reference bands, the next five are never chargeable to
/// tenants, and `Other` absorbs anything the intake could not classify.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Heating,
    HotWater,
    WaterSewage,
    Garbage,
    BuildingInsurance,
    LiabilityInsurance,
    Elevator,
    Garden,
    Cleaning,
    Caretaker,
    CableTv,
    BuildingLighting,
    BankFees,
    ManagementFees,
    Repair,
    LegalFees,
    VacancyCosts,
    #[serde(other)]
    Other,
}

impl CostCategory {
    pub const fn label(self) -> &'static str {
        match self {
            CostCategory::Heating => "Heizung",
            CostCategory::HotWater => "Warmwasser",
            CostCategory::WaterSewage => "Wasser/Abwasser",
            CostCategory::Garbage => "Müllentsorgung",
            CostCategory::BuildingInsurance => "Gebäudeversicherung",
            CostCategory::LiabilityInsurance => "Haftpflichtversicherung",
            CostCategory::Elevator => "Aufzug",
            CostCategory::Garden => "Gartenpflege",
            CostCategory::Cleaning => "Hausreinigung",
            CostCategory::Caretaker => "Hausmeister",
            CostCategory::CableTv => "Kabel/Antenne",
            CostCategory::BuildingLighting => "Hausbeleuchtung",
            CostCategory::BankFees => "Bankgebühren",
            CostCategory::ManagementFees => "Verwaltungskosten",
            CostCategory::Repair => "Reparaturen",
            CostCategory::LegalFees => "Anwalts-/Gerichtskosten",
            CostCategory::VacancyCosts => "Leerstandskosten",
            CostCategory::Other => "Sonstiges",
        }
    }
}

/// How the building is heated, as recorded in the rental contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatingType {
    Central,
    Individual,
    District,
}

impl HeatingType {
    pub const fn label(self) -> &'static str {
        match self {
            HeatingType::Central => "Zentralheizung",
            HeatingType::Individual => "Einzelofenheizung",
            HeatingType::District => "Fernwärme",
        }
    }
}

/// Billing period plus the date the tenant received the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<NaiveDate>,
}

/// Statement header. Monetary fields stay optional because extraction from
/// scanned documents routinely leaves gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityBill {
    pub billing_year: i32,
    pub period: BillingPeriod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_costs: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_advance_paid: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One line item on the statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostPosition {
    pub category: CostCategory,
    pub name: String,
    pub total_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_share_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Tenancy context the checks need: who bills, which flat, how it is heated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalContract {
    pub landlord_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landlord_address: Option<String>,
    pub property_address: String,
    pub apartment_size_sqm: Decimal,
    pub heating_type: HeatingType,
}

/// The five verification passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Math,
    Deadline,
    Plausibility,
    Legal,
    Completeness,
}

impl CheckKind {
    pub const fn label(self) -> &'static str {
        match self {
            CheckKind::Math => "Rechenprüfung",
            CheckKind::Deadline => "Fristprüfung",
            CheckKind::Plausibility => "Plausibilitätsprüfung",
            CheckKind::Legal => "Rechtsprüfung",
            CheckKind::Completeness => "Vollständigkeit",
        }
    }
}

/// Severity of a single finding. `Ok` findings confirm that a pass ran and
/// found nothing; they never reduce the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Ok,
    Warning,
    Error,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// One result a check pass produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub check: CheckKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Outcome of the plausibility pass for a single position. `Unknown` means
/// the pass had no reference band or no usable inputs for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlausibilityVerdict {
    #[default]
    Unknown,
    Pass,
    Fail,
}

impl PlausibilityVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            PlausibilityVerdict::Unknown => "nicht geprüft",
            PlausibilityVerdict::Pass => "plausibel",
            PlausibilityVerdict::Fail => "auffällig",
        }
    }
}

/// Per-position facts the checks established, returned alongside the
/// findings instead of being written back into the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionAnnotation {
    pub admissible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inadmissible_reason: Option<String>,
    pub plausibility: PlausibilityVerdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_low: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_high: Option<Decimal>,
}

impl Default for PositionAnnotation {
    fn default() -> Self {
        Self {
            admissible: true,
            inadmissible_reason: None,
            plausibility: PlausibilityVerdict::Unknown,
            reference_low: None,
            reference_high: None,
        }
    }
}

/// Annotations keyed by the index of the position in the submitted slice.
/// Positions no check touched have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionAnnotations {
    entries: BTreeMap<usize, PositionAnnotation>,
}

impl PositionAnnotations {
    pub fn get(&self, index: usize) -> Option<&PositionAnnotation> {
        self.entries.get(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &PositionAnnotation)> {
        self.entries.iter().map(|(index, entry)| (*index, entry))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn annotate(&mut self, index: usize) -> &mut PositionAnnotation {
        self.entries.entry(index).or_default()
    }
}

/// Lifecycle of a stored statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    Pending,
    Checked,
    ObjectionSent,
}

impl BillStatus {
    pub const fn label(self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Checked => "checked",
            BillStatus::ObjectionSent => "objection_sent",
        }
    }
}

/// Everything a caller hands in for one verification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSubmission {
    pub bill: UtilityBill,
    pub contract: RentalContract,
    #[serde(default)]
    pub positions: Vec<CostPosition>,
}
