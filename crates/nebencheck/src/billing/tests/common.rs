use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::billing::catalog::{CostRange, ReferenceCatalog};
use crate::billing::checks::{CheckEngine, CheckReport};
use crate::billing::domain::{
    BillId, BillSubmission, BillingPeriod, CheckKind, CostCategory, CostPosition, Finding,
    HeatingType, RentalContract, UtilityBill,
};
use crate::billing::repository::{BillRecord, BillRepository, RepositoryError};
use crate::billing::service::BillCheckService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn amount(raw: &str) -> Decimal {
    raw.parse().expect("valid decimal")
}

/// Calendar-year 2023 statement received well within the deadline.
pub(super) fn bill_2023() -> UtilityBill {
    UtilityBill {
        billing_year: 2023,
        period: BillingPeriod {
            start: date(2023, 1, 1),
            end: date(2023, 12, 31),
            received: Some(date(2024, 6, 1)),
        },
        total_costs: None,
        total_advance_paid: None,
        result_amount: None,
        notes: None,
    }
}

pub(super) fn contract_60sqm() -> RentalContract {
    RentalContract {
        landlord_name: "Hausverwaltung Schmidt GmbH".to_string(),
        landlord_address: Some("Verwalterweg 2\n10115 Berlin".to_string()),
        property_address: "Musterstraße 12, 10115 Berlin".to_string(),
        apartment_size_sqm: amount("60.00"),
        heating_type: HeatingType::Central,
    }
}

pub(super) fn position(
    category: CostCategory,
    name: &str,
    total: &str,
    share: Option<&str>,
    tenant: Option<&str>,
) -> CostPosition {
    CostPosition {
        category,
        name: name.to_string(),
        total_amount: amount(total),
        distribution_key: None,
        tenant_share_percent: share.map(amount),
        tenant_amount: tenant.map(amount),
        notes: None,
    }
}

/// Two positions that pass every check at 60 m² and 20% share.
pub(super) fn clean_positions() -> Vec<CostPosition> {
    vec![
        position(
            CostCategory::Heating,
            "Heizkosten",
            "3000.00",
            Some("20.00"),
            Some("600.00"),
        ),
        position(
            CostCategory::WaterSewage,
            "Wasser/Abwasser",
            "900.00",
            Some("20.00"),
            Some("180.00"),
        ),
    ]
}

pub(super) fn submission(positions: Vec<CostPosition>) -> BillSubmission {
    BillSubmission {
        bill: bill_2023(),
        contract: contract_60sqm(),
        positions,
    }
}

pub(super) fn engine() -> CheckEngine {
    CheckEngine::new(ReferenceCatalog::betriebskostenspiegel_2023())
}

pub(super) fn check(positions: Vec<CostPosition>) -> CheckReport {
    engine().run_all_checks(&bill_2023(), &positions, &contract_60sqm())
}

pub(super) fn findings_of(report: &CheckReport, kind: CheckKind) -> Vec<Finding> {
    report
        .findings
        .iter()
        .filter(|finding| finding.check == kind)
        .cloned()
        .collect()
}

/// Small substitute catalog: one banded category, one banned category.
pub(super) fn test_catalog() -> ReferenceCatalog {
    let ranges = BTreeMap::from([(
        CostCategory::Garden,
        CostRange {
            low: amount("1.00"),
            high: amount("2.00"),
        },
    )]);
    let inadmissible = BTreeMap::from([(
        CostCategory::CableTv,
        "Testweise unzulässig".to_string(),
    )]);

    ReferenceCatalog::new("Testspiegel 2025", ranges, inadmissible).expect("valid catalog")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<BillId, BillRecord>>>,
}

impl MemoryRepository {
    pub(super) fn stored(&self, id: &BillId) -> Option<BillRecord> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl BillRepository for MemoryRepository {
    fn insert(&self, record: BillRecord) -> Result<BillRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.bill_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.bill_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: BillRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.bill_id) {
            guard.insert(record.bill_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &BillId) -> Result<Option<BillRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Rejects every insert with a conflict.
pub(super) struct ConflictRepository;

impl BillRepository for ConflictRepository {
    fn insert(&self, _record: BillRecord) -> Result<BillRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: BillRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &BillId) -> Result<Option<BillRecord>, RepositoryError> {
        Ok(None)
    }
}

/// Fails every call as if the backend were down.
pub(super) struct UnavailableRepository;

impl BillRepository for UnavailableRepository {
    fn insert(&self, _record: BillRecord) -> Result<BillRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn update(&self, _record: BillRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn fetch(&self, _id: &BillId) -> Result<Option<BillRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<BillCheckService<MemoryRepository>>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = Arc::new(BillCheckService::new(
        Arc::new(repository.clone()),
        ReferenceCatalog::betriebskostenspiegel_2023(),
    ));
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body is readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
