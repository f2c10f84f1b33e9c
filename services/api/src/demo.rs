use crate::infra::{default_catalog, InMemoryBillRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use nebencheck::billing::{
    BillCheckService, BillRepository, BillSubmission, BillingPeriod, CheckEngine, CheckReport,
    CostCategory, CostPosition, Finding, HeatingType, ObjectionRequest, PositionAnnotation,
    RentalContract, Severity, UtilityBill,
};
use nebencheck::error::AppError;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct CheckArgs {
    /// Path to a JSON statement submission (defaults to a built-in sample).
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Emit the raw check report as JSON instead of formatted text.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date printed on the objection letter (YYYY-MM-DD, defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) letter_date: Option<NaiveDate>,
    /// Skip the objection letter portion of the demo.
    #[arg(long)]
    pub(crate) skip_letter: bool,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs { input, json } = args;

    let submission = match input {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<BillSubmission>(&raw)?
        }
        None => sample_submission(),
    };

    let engine = CheckEngine::new(default_catalog());
    let report = engine.run_all_checks(
        &submission.bill,
        &submission.positions,
        &submission.contract,
    );

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Report unavailable: {err}"),
        }
        return Ok(());
    }

    println!(
        "Nebenkostenabrechnung {} | Zeitraum {} -> {}",
        submission.bill.billing_year, submission.bill.period.start, submission.bill.period.end
    );
    render_score(&report);
    render_findings(&report.findings);
    render_positions(&submission.positions, &report);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        letter_date,
        skip_letter,
    } = args;

    println!("Statement check demo");

    let repository = Arc::new(InMemoryBillRepository::default());
    let service = Arc::new(BillCheckService::new(repository.clone(), default_catalog()));

    let record = match service.submit(sample_submission()) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };

    let status = record.status_view();
    println!(
        "- Stored statement {} -> status {}",
        status.bill_id.0, status.status
    );
    if let Some(report) = &record.report {
        render_score(report);
        render_findings(&report.findings);
        render_positions(&record.positions, report);
    }

    match serde_json::to_string_pretty(&record.status_view()) {
        Ok(payload) => println!("\nPublic status payload:\n{payload}"),
        Err(err) => println!("\nPublic status payload unavailable: {err}"),
    }

    if skip_letter {
        return Ok(());
    }

    let reasons: Vec<String> = record
        .report
        .as_ref()
        .map(|report| {
            report
                .findings
                .iter()
                .filter(|finding| finding.severity == Severity::Error)
                .map(|finding| finding.title.clone())
                .collect()
        })
        .unwrap_or_default();

    if reasons.is_empty() {
        println!("\nObjection letter: nothing to object to, every check passed");
        return Ok(());
    }

    println!("\nObjection letter draft");
    let request = ObjectionRequest {
        tenant_name: "Max Mustermann".to_string(),
        tenant_address: Some("Musterstraße 12, 10115 Berlin".to_string()),
        reasons,
        letter_date: letter_date.unwrap_or_else(|| Local::now().date_naive()),
    };
    let letter = match service.objection(&record.bill_id, request) {
        Ok(letter) => letter,
        Err(err) => {
            println!("  Letter unavailable: {}", err);
            return Ok(());
        }
    };
    println!("{}", letter.content);

    let stored = match repository.fetch(&record.bill_id) {
        Ok(Some(record)) => record,
        Ok(None) => {
            println!("  Repository lookup returned no record");
            return Ok(());
        }
        Err(err) => {
            println!("  Repository unavailable: {}", err);
            return Ok(());
        }
    };
    println!(
        "\n- Statement {} -> status {}",
        stored.bill_id.0,
        stored.status.label()
    );

    Ok(())
}

fn render_score(report: &CheckReport) {
    println!(
        "  Score: {}/100 ({} errors, {} warnings)",
        report.score,
        report.errors(),
        report.warnings()
    );
}

fn render_findings(findings: &[Finding]) {
    println!("\nFindings");
    for finding in findings {
        println!(
            "- [{}] {} | {}",
            finding.severity.label(),
            finding.check.label(),
            finding.title
        );
        println!("  {}", finding.description);
        if let Some(recommendation) = &finding.recommendation {
            println!("  Empfehlung: {}", recommendation);
        }
    }
}

fn render_positions(positions: &[CostPosition], report: &CheckReport) {
    if positions.is_empty() {
        return;
    }

    println!("\nPositions");
    let fallback = PositionAnnotation::default();
    for (index, position) in positions.iter().enumerate() {
        let annotation = report.annotations.get(index).unwrap_or(&fallback);
        let share = position
            .tenant_share_percent
            .map(|share| format!("{share}%"))
            .unwrap_or_else(|| "n/a".to_string());
        let tenant_amount = position
            .tenant_amount
            .map(|amount| format!("{amount:.2} EUR"))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "- {} | {} | total {:.2} EUR | share {} | tenant {} | {}",
            position.name,
            position.category.label(),
            position.total_amount,
            share,
            tenant_amount,
            annotation.plausibility.label()
        );
        if let Some(reason) = &annotation.inadmissible_reason {
            println!("  Unzulässig: {reason}");
        }
        if let (Some(low), Some(high)) = (annotation.reference_low, annotation.reference_high) {
            println!("  Richtwert: {low:.2}-{high:.2} EUR/m²/Jahr");
        }
    }
}

fn demo_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn demo_amount(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn demo_position(
    category: CostCategory,
    name: &str,
    total_cents: i64,
    share_percent: i64,
    tenant_cents: i64,
) -> CostPosition {
    CostPosition {
        category,
        name: name.to_string(),
        total_amount: demo_amount(total_cents),
        distribution_key: Some("Wohnfläche".to_string()),
        tenant_share_percent: Some(Decimal::new(share_percent, 0)),
        tenant_amount: Some(demo_amount(tenant_cents)),
        notes: None,
    }
}

/// 2023 statement seeded with findable defects: a miscalculated garbage
/// share, a delivery past the statutory deadline, heating above the
/// reference band and a management fee that is not apportionable.
fn sample_submission() -> BillSubmission {
    BillSubmission {
        bill: UtilityBill {
            billing_year: 2023,
            period: BillingPeriod {
                start: demo_date(2023, 1, 1),
                end: demo_date(2023, 12, 31),
                received: Some(demo_date(2025, 3, 10)),
            },
            total_costs: Some(demo_amount(143_500)),
            total_advance_paid: Some(demo_amount(130_000)),
            result_amount: Some(demo_amount(13_500)),
            notes: None,
        },
        contract: RentalContract {
            landlord_name: "Hausverwaltung Schmidt GmbH".to_string(),
            landlord_address: Some("Verwalterweg 2\n10115 Berlin".to_string()),
            property_address: "Musterstraße 12, 10115 Berlin".to_string(),
            apartment_size_sqm: Decimal::new(60, 0),
            heating_type: HeatingType::Central,
        },
        positions: vec![
            demo_position(CostCategory::Heating, "Heizkosten", 360_000, 25, 90_000),
            demo_position(
                CostCategory::WaterSewage,
                "Wasser/Abwasser",
                96_000,
                25,
                24_000,
            ),
            demo_position(CostCategory::Garbage, "Müllentsorgung", 48_000, 25, 14_500),
            demo_position(
                CostCategory::ManagementFees,
                "Verwaltungskosten",
                60_000,
                25,
                15_000,
            ),
        ],
    }
}
