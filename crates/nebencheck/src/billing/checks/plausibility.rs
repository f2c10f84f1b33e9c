//! Plausibility pass: compares each tenant share, normalized to €/m²/year,
//! against the injected reference bands.

use rust_decimal::Decimal;

use crate::billing::checks::{CheckEngine, CheckInput};
use crate::billing::domain::{
    CheckKind, Finding, PlausibilityVerdict, PositionAnnotations, Severity,
};

pub(super) fn run(
    engine: &CheckEngine,
    input: CheckInput<'_>,
    annotations: &mut PositionAnnotations,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let sqm = input.contract.apartment_size_sqm;

    // Past 1.5x the band maximum a position stops being merely high.
    let ceiling_factor = Decimal::new(15, 1);

    for (index, position) in input.positions.iter().enumerate() {
        let Some(range) = engine.catalog().range(position.category) else {
            continue;
        };
        let Some(tenant_amount) = position.tenant_amount else {
            continue;
        };
        if sqm <= Decimal::ZERO {
            continue;
        }

        let cost_per_sqm = tenant_amount / sqm;

        let annotation = annotations.annotate(index);
        annotation.reference_low = Some(range.low);
        annotation.reference_high = Some(range.high);

        if cost_per_sqm > range.high * ceiling_factor {
            annotation.plausibility = PlausibilityVerdict::Fail;
            let percent_over = ((cost_per_sqm / range.high - Decimal::ONE)
                * Decimal::ONE_HUNDRED)
                .round_dp(0);
            findings.push(Finding {
                check: CheckKind::Plausibility,
                severity: Severity::Error,
                title: format!("Ungewöhnlich hohe Kosten: {}", position.name),
                description: format!(
                    "Der Anteil beträgt {cost_per_sqm:.2} €/m²/Jahr. Der {} gibt \
                     {:.2}–{:.2} €/m²/Jahr an. Ihr Wert liegt {percent_over}% über dem \
                     Höchstwert.",
                    engine.catalog().source(),
                    range.low,
                    range.high
                ),
                recommendation: Some(
                    "Fordern Sie eine detaillierte Aufschlüsselung dieser Position vom \
                     Vermieter."
                        .to_string(),
                ),
            });
        } else if cost_per_sqm > range.high {
            annotation.plausibility = PlausibilityVerdict::Fail;
            findings.push(Finding {
                check: CheckKind::Plausibility,
                severity: Severity::Warning,
                title: format!("Hohe Kosten: {}", position.name),
                description: format!(
                    "Der Anteil beträgt {cost_per_sqm:.2} €/m²/Jahr. Der Richtwert liegt \
                     bei {:.2}–{:.2} €/m²/Jahr.",
                    range.low, range.high
                ),
                recommendation: Some(
                    "Vergleichen Sie mit ähnlichen Objekten in Ihrer Stadt.".to_string(),
                ),
            });
        } else {
            annotation.plausibility = PlausibilityVerdict::Pass;
        }
    }

    if findings.is_empty() {
        findings.push(Finding {
            check: CheckKind::Plausibility,
            severity: Severity::Ok,
            title: "Kosten im Normbereich".to_string(),
            description: format!(
                "Alle geprüften Positionen liegen im Normbereich ({}).",
                engine.catalog().source()
            ),
            recommendation: None,
        });
    }

    findings
}
