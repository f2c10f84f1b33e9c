//! Deadline pass: was the statement delivered within the twelve-month
//! window of § 556 Abs. 3 BGB?

use chrono::{Datelike, NaiveDate};

use crate::billing::checks::{CheckEngine, CheckInput};
use crate::billing::domain::{CheckKind, Finding, PositionAnnotations, Severity};

const CLOSE_CALL_DAYS: i64 = 30;

/// Twelve months after the end of the billing period. A period ending on
/// Feb 29 has its deadline on Feb 28 of the following year.
fn statutory_deadline(period_end: NaiveDate) -> NaiveDate {
    period_end
        .with_year(period_end.year() + 1)
        .or_else(|| NaiveDate::from_ymd_opt(period_end.year() + 1, 2, 28))
        .unwrap_or(period_end)
}

pub(super) fn run(
    _engine: &CheckEngine,
    input: CheckInput<'_>,
    _annotations: &mut PositionAnnotations,
) -> Vec<Finding> {
    let deadline = statutory_deadline(input.bill.period.end);

    let Some(received) = input.bill.period.received else {
        return vec![Finding {
            check: CheckKind::Deadline,
            severity: Severity::Warning,
            title: "Zugangsdatum unbekannt".to_string(),
            description: "Das Datum des Zugangs der Abrechnung wurde nicht angegeben. \
                          Bitte nachtragen, um die Frist zu prüfen."
                .to_string(),
            recommendation: Some(
                "Tragen Sie das Datum nach, an dem Sie die Abrechnung erhalten haben."
                    .to_string(),
            ),
        }];
    };

    let days_late = received.signed_duration_since(deadline).num_days();

    let finding = if days_late > 0 {
        Finding {
            check: CheckKind::Deadline,
            severity: Severity::Error,
            title: format!("Abrechnungsfrist überschritten ({days_late} Tage zu spät)"),
            description: format!(
                "Die Abrechnung muss spätestens am {} zugegangen sein (12 Monate nach \
                 Ende des Abrechnungszeitraums, § 556 Abs. 3 BGB). Sie haben die \
                 Abrechnung erst am {} erhalten.",
                deadline.format("%d.%m.%Y"),
                received.format("%d.%m.%Y")
            ),
            recommendation: Some(
                "Sie müssen keine Nachzahlung leisten! Legen Sie unverzüglich schriftlich \
                 Widerspruch ein und fordern Sie die Rückerstattung eventueller \
                 Vorauszahlungen."
                    .to_string(),
            ),
        }
    } else {
        let days_left = -days_late;
        if days_left < CLOSE_CALL_DAYS {
            Finding {
                check: CheckKind::Deadline,
                severity: Severity::Warning,
                title: format!("Frist knapp eingehalten (noch {days_left} Tage)"),
                description: format!(
                    "Die Abrechnung wurde gerade noch rechtzeitig zugestellt. Die Frist \
                     lief am {} ab.",
                    deadline.format("%d.%m.%Y")
                ),
                recommendation: None,
            }
        } else {
            Finding {
                check: CheckKind::Deadline,
                severity: Severity::Ok,
                title: "Abrechnungsfrist eingehalten".to_string(),
                description: format!(
                    "Die Abrechnung wurde fristgerecht zugestellt (Frist: {}, erhalten: {}).",
                    deadline.format("%d.%m.%Y"),
                    received.format("%d.%m.%Y")
                ),
                recommendation: None,
            }
        }
    };

    vec![finding]
}
