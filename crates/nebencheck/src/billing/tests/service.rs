use std::sync::Arc;

use super::common::{
    amount, build_service, clean_positions, date, position, submission, ConflictRepository,
    UnavailableRepository,
};
use crate::billing::catalog::ReferenceCatalog;
use crate::billing::domain::{BillId, BillStatus, CostCategory, PlausibilityVerdict};
use crate::billing::repository::{BillRepository, RepositoryError};
use crate::billing::service::{BillCheckService, BillServiceError, ObjectionRequest};

#[test]
fn submit_checks_and_stores_the_statement() {
    let (service, repository) = build_service();

    let record = service
        .submit(submission(clean_positions()))
        .expect("submission succeeds");

    assert!(record.bill_id.0.starts_with("bill-"));
    assert_eq!(record.status, BillStatus::Checked);
    assert_eq!(record.report.as_ref().expect("report stored").score, 100);

    let stored = repository
        .stored(&record.bill_id)
        .expect("record persisted");
    assert_eq!(stored, record);
}

#[test]
fn submit_rejects_inverted_periods() {
    let (service, _) = build_service();

    let mut flawed = submission(clean_positions());
    flawed.bill.period.start = date(2023, 12, 31);
    flawed.bill.period.end = date(2023, 1, 1);

    match service.submit(flawed) {
        Err(BillServiceError::PeriodInverted { start, end }) => {
            assert_eq!(start, date(2023, 12, 31));
            assert_eq!(end, date(2023, 1, 1));
        }
        other => panic!("expected inverted period error, got {other:?}"),
    }
}

#[test]
fn bill_ids_are_unique_and_zero_padded() {
    let (service, _) = build_service();

    let first = service
        .submit(submission(clean_positions()))
        .expect("submission succeeds");
    let second = service
        .submit(submission(clean_positions()))
        .expect("submission succeeds");

    assert_ne!(first.bill_id, second.bill_id);
    assert_eq!(first.bill_id.0.len(), "bill-000001".len());
}

#[test]
fn get_missing_record_is_not_found() {
    let (service, _) = build_service();

    let error = service
        .get(&BillId("bill-999999".to_string()))
        .expect_err("missing record must fail");

    assert!(matches!(
        error,
        BillServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn recheck_reproduces_the_report_for_unchanged_data() {
    let (service, _) = build_service();

    let record = service
        .submit(submission(clean_positions()))
        .expect("submission succeeds");
    let rechecked = service.recheck(&record.bill_id).expect("recheck succeeds");

    assert_eq!(record.report, rechecked.report);
}

#[test]
fn recheck_picks_up_corrected_positions() {
    let (service, repository) = build_service();

    // 3000 × 20% is 600, so the claimed 750 is a calculation error.
    let record = service
        .submit(submission(vec![
            position(CostCategory::Heating, "Heizkosten", "3000.00", Some("20.00"), Some("750.00")),
            position(
                CostCategory::WaterSewage,
                "Wasser/Abwasser",
                "900.00",
                Some("20.00"),
                Some("180.00"),
            ),
        ]))
        .expect("submission succeeds");
    assert_eq!(record.report.as_ref().expect("report stored").score, 80);

    let mut corrected = repository
        .stored(&record.bill_id)
        .expect("record persisted");
    corrected.positions[0].tenant_amount = Some(amount("600.00"));
    repository.update(corrected).expect("update succeeds");

    let rechecked = service.recheck(&record.bill_id).expect("recheck succeeds");
    assert_eq!(rechecked.report.expect("report stored").score, 100);
}

#[test]
fn objection_composes_a_letter_and_flips_the_status() {
    let (service, repository) = build_service();

    let record = service
        .submit(submission(clean_positions()))
        .expect("submission succeeds");

    let letter = service
        .objection(
            &record.bill_id,
            ObjectionRequest {
                tenant_name: "Max Mustermann".to_string(),
                tenant_address: None,
                reasons: vec!["Summendifferenz".to_string()],
                letter_date: date(2025, 3, 5),
            },
        )
        .expect("objection succeeds");

    assert!(letter.content.contains("Hausverwaltung Schmidt GmbH"));
    assert!(letter.content.contains("1. Summendifferenz"));
    assert_eq!(letter.created_on, date(2025, 3, 5));

    let stored = repository
        .stored(&record.bill_id)
        .expect("record persisted");
    assert_eq!(stored.status, BillStatus::ObjectionSent);
}

#[test]
fn detail_view_merges_annotations_into_positions() {
    let (service, _) = build_service();

    let record = service
        .submit(submission(vec![
            position(CostCategory::Heating, "Heizkosten", "4500.00", Some("20.00"), Some("900.00")),
            position(
                CostCategory::ManagementFees,
                "Verwaltung",
                "600.00",
                Some("20.00"),
                Some("120.00"),
            ),
        ]))
        .expect("submission succeeds");

    let view = record.detail_view();
    assert_eq!(view.positions.len(), 2);

    let heating = &view.positions[0];
    assert!(heating.is_allowed);
    assert_eq!(heating.plausibility, PlausibilityVerdict::Fail);
    assert_eq!(heating.reference_high, Some(amount("14.00")));

    let management = &view.positions[1];
    assert!(!management.is_allowed);
    assert!(management.inadmissible_reason.is_some());
    assert_eq!(management.plausibility, PlausibilityVerdict::Unknown);
    assert_eq!(management.category_label, "Verwaltungskosten");

    let status = record.status_view();
    assert_eq!(status.status, "checked");
    assert_eq!(status.errors, 1);
    assert_eq!(status.warnings, 2);
    assert_eq!(status.score, Some(70));
}

#[test]
fn conflicting_repository_surfaces_the_conflict() {
    let service = BillCheckService::new(
        Arc::new(ConflictRepository),
        ReferenceCatalog::betriebskostenspiegel_2023(),
    );

    let error = service
        .submit(submission(clean_positions()))
        .expect_err("insert must conflict");

    assert!(matches!(
        error,
        BillServiceError::Repository(RepositoryError::Conflict)
    ));
}

#[test]
fn unavailable_repository_surfaces_the_outage() {
    let service = BillCheckService::new(
        Arc::new(UnavailableRepository),
        ReferenceCatalog::betriebskostenspiegel_2023(),
    );

    let error = service
        .get(&BillId("bill-000001".to_string()))
        .expect_err("fetch must fail");

    assert!(matches!(
        error,
        BillServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}
