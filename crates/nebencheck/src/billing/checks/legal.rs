//! Legality pass: flags positions whose category may never be passed on to
//! tenants under the BetrKV.

use crate::billing::checks::{CheckEngine, CheckInput};
use crate::billing::domain::{CheckKind, Finding, PositionAnnotations, Severity};

pub(super) fn run(
    engine: &CheckEngine,
    input: CheckInput<'_>,
    annotations: &mut PositionAnnotations,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (index, position) in input.positions.iter().enumerate() {
        let Some(reason) = engine.catalog().inadmissible_reason(position.category) else {
            continue;
        };

        let annotation = annotations.annotate(index);
        annotation.admissible = false;
        annotation.inadmissible_reason = Some(reason.to_string());

        findings.push(Finding {
            check: CheckKind::Legal,
            severity: Severity::Error,
            title: format!("Unzulässige Position: {}", position.name),
            description: reason.to_string(),
            recommendation: Some(
                "Widersprechen Sie dieser Position schriftlich. Sie müssen diesen Betrag \
                 nicht zahlen."
                    .to_string(),
            ),
        });
    }

    if findings.is_empty() {
        findings.push(Finding {
            check: CheckKind::Legal,
            severity: Severity::Ok,
            title: "Keine unzulässigen Positionen".to_string(),
            description: "Alle abgerechneten Positionen sind dem Grunde nach umlagefähig."
                .to_string(),
            recommendation: None,
        });
    }

    findings
}
