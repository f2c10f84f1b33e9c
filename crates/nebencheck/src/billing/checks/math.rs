//! Arithmetic pass: does each tenant share follow from the stated
//! percentage, and do the line items add up to the statement total?

use rust_decimal::{Decimal, RoundingStrategy};

use crate::billing::checks::{CheckEngine, CheckInput};
use crate::billing::domain::{CheckKind, Finding, PositionAnnotations, Severity};

fn rounded_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub(super) fn run(
    _engine: &CheckEngine,
    input: CheckInput<'_>,
    _annotations: &mut PositionAnnotations,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    // Differences of up to five cents are put down to rounding.
    let cent_tolerance = Decimal::new(5, 2);

    for position in input.positions {
        let (Some(share), Some(claimed)) =
            (position.tenant_share_percent, position.tenant_amount)
        else {
            continue;
        };

        let total = position.total_amount;
        let expected = rounded_cents(total * share / Decimal::ONE_HUNDRED);
        let actual = rounded_cents(claimed);
        let diff = (expected - actual).abs();

        if diff > cent_tolerance {
            findings.push(Finding {
                check: CheckKind::Math,
                severity: Severity::Error,
                title: format!("Rechenfehler: {}", position.name),
                description: format!(
                    "Der Anteil von {share}% von {total}€ ergibt {expected:.2}€, \
                     aber abgerechnet wurden {actual:.2}€ (Differenz: {diff:.2}€)."
                ),
                recommendation: Some(
                    "Prüfen Sie diese Position genau und fordern Sie eine Korrektur."
                        .to_string(),
                ),
            });
        }
    }

    if let Some(total_costs) = input.bill.total_costs {
        if !input.positions.is_empty() {
            let position_sum: Decimal = input
                .positions
                .iter()
                .map(|position| position.tenant_amount.unwrap_or(Decimal::ZERO))
                .sum();
            let diff = (position_sum - total_costs).abs();

            if diff > Decimal::ONE {
                findings.push(Finding {
                    check: CheckKind::Math,
                    severity: Severity::Warning,
                    title: "Summendifferenz".to_string(),
                    description: format!(
                        "Die Summe der Einzelpositionen ({position_sum:.2}€) weicht vom \
                         Gesamtbetrag ({total_costs:.2}€) um {diff:.2}€ ab."
                    ),
                    recommendation: Some(
                        "Bitten Sie den Vermieter um eine aufgeschlüsselte Abrechnung."
                            .to_string(),
                    ),
                });
            }
        }
    }

    if findings.is_empty() {
        findings.push(Finding {
            check: CheckKind::Math,
            severity: Severity::Ok,
            title: "Rechnerische Prüfung bestanden".to_string(),
            description: "Alle Berechnungen sind mathematisch korrekt.".to_string(),
            recommendation: None,
        });
    }

    findings
}
