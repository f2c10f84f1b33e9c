use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use nebencheck::billing::{BillId, BillRecord, BillRepository, ReferenceCatalog, RepositoryError};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryBillRepository {
    records: Arc<Mutex<HashMap<BillId, BillRecord>>>,
}

impl BillRepository for InMemoryBillRepository {
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

pub(crate) fn default_catalog() -> ReferenceCatalog {
    ReferenceCatalog::betriebskostenspiegel_2023()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
