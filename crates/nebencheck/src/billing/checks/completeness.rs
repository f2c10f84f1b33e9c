//! Completeness pass: are the positions a statement of this tenancy would
//! normally carry actually present?

use std::collections::BTreeSet;

use crate::billing::checks::{CheckEngine, CheckInput};
use crate::billing::domain::{
    CheckKind, CostCategory, Finding, HeatingType, PositionAnnotations, Severity,
};

pub(super) fn run(
    _engine: &CheckEngine,
    input: CheckInput<'_>,
    _annotations: &mut PositionAnnotations,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    let categories: BTreeSet<CostCategory> = input
        .positions
        .iter()
        .map(|position| position.category)
        .collect();

    if input.contract.heating_type == HeatingType::Central
        && !categories.contains(&CostCategory::Heating)
    {
        findings.push(Finding {
            check: CheckKind::Completeness,
            severity: Severity::Warning,
            title: "Heizkosten fehlen".to_string(),
            description: "Laut Mietverhältnis haben Sie eine Zentralheizung, aber die \
                          Abrechnung enthält keine Heizkosten."
                .to_string(),
            recommendation: Some(
                "Fragen Sie den Vermieter, warum Heizkosten nicht separat abgerechnet \
                 werden."
                    .to_string(),
            ),
        });
    }

    // Missing water is only notable on a statement that lists anything at
    // all; an empty statement gets no water warning.
    if !categories.contains(&CostCategory::WaterSewage) && !input.positions.is_empty() {
        findings.push(Finding {
            check: CheckKind::Completeness,
            severity: Severity::Warning,
            title: "Wasser/Abwasser nicht separat ausgewiesen".to_string(),
            description: "Wasser- und Abwasserkosten werden typischerweise separat \
                          ausgewiesen."
                .to_string(),
            recommendation: None,
        });
    }

    if findings.is_empty() {
        findings.push(Finding {
            check: CheckKind::Completeness,
            severity: Severity::Ok,
            title: "Vollständigkeit geprüft".to_string(),
            description: "Die Abrechnung enthält alle erwarteten Positionen.".to_string(),
            recommendation: None,
        });
    }

    findings
}
