//! Application service tying the check engine to a storage backend and the
//! objection letter composer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::billing::catalog::ReferenceCatalog;
use crate::billing::checks::CheckEngine;
use crate::billing::domain::{BillId, BillStatus, BillSubmission};
use crate::billing::letter::{
    compose_objection_letter, ObjectionLetter, ObjectionLetterRequest,
};
use crate::billing::repository::{BillRecord, BillRepository, RepositoryError};

static BILL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, thiserror::Error)]
pub enum BillServiceError {
    #[error("billing period is inverted: {start} lies after {end}")]
    PeriodInverted { start: NaiveDate, end: NaiveDate },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Objection input at the service boundary. Landlord and property details
/// come from the stored contract, not from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectionRequest {
    pub tenant_name: String,
    #[serde(default)]
    pub tenant_address: Option<String>,
    pub reasons: Vec<String>,
    pub letter_date: NaiveDate,
}

pub struct BillCheckService<R> {
    repository: Arc<R>,
    engine: Arc<CheckEngine>,
}

impl<R> BillCheckService<R>
where
    R: BillRepository,
{
    pub fn new(repository: Arc<R>, catalog: ReferenceCatalog) -> Self {
        Self {
            repository,
            engine: Arc::new(CheckEngine::new(catalog)),
        }
    }

    pub fn engine(&self) -> &CheckEngine {
        &self.engine
    }

    /// Validates and stores the submission, runs all checks over it, and
    /// returns the stored record with its fresh report.
    pub fn submit(&self, submission: BillSubmission) -> Result<BillRecord, BillServiceError> {
        let BillSubmission {
            bill,
            contract,
            positions,
        } = submission;

        if bill.period.end < bill.period.start {
            return Err(BillServiceError::PeriodInverted {
                start: bill.period.start,
                end: bill.period.end,
            });
        }

        let report = self.engine.run_all_checks(&bill, &positions, &contract);

        let id = BILL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let record = BillRecord {
            bill_id: BillId(format!("bill-{id:06}")),
            bill,
            contract,
            positions,
            status: BillStatus::Checked,
            report: Some(report),
        };

        Ok(self.repository.insert(record)?)
    }

    pub fn get(&self, id: &BillId) -> Result<BillRecord, BillServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Re-runs all checks over the stored data, replacing the previous
    /// report. Useful after a record was corrected in storage.
    pub fn recheck(&self, id: &BillId) -> Result<BillRecord, BillServiceError> {
        let mut record = self.get(id)?;

        let report = self
            .engine
            .run_all_checks(&record.bill, &record.positions, &record.contract);
        record.report = Some(report);
        record.status = BillStatus::Checked;

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Composes an objection letter for a stored statement and moves the
    /// record to `objection_sent`.
    pub fn objection(
        &self,
        id: &BillId,
        request: ObjectionRequest,
    ) -> Result<ObjectionLetter, BillServiceError> {
        let mut record = self.get(id)?;

        let letter = compose_objection_letter(&ObjectionLetterRequest {
            tenant_name: request.tenant_name,
            tenant_address: request.tenant_address,
            landlord_name: record.contract.landlord_name.clone(),
            landlord_address: record.contract.landlord_address.clone(),
            property_address: record.contract.property_address.clone(),
            billing_year: record.bill.billing_year,
            reasons: request.reasons,
            letter_date: request.letter_date,
        });

        record.status = BillStatus::ObjectionSent;
        self.repository.update(record)?;

        Ok(letter)
    }
}
