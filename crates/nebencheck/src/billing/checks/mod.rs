//! The five verification passes and the engine that runs them in a fixed
//! order: math, deadline, plausibility, legal, completeness.

pub(crate) mod completeness;
pub(crate) mod deadline;
pub(crate) mod legal;
pub(crate) mod math;
pub(crate) mod plausibility;
pub(crate) mod score;

use serde::{Deserialize, Serialize};

use crate::billing::catalog::ReferenceCatalog;
use crate::billing::domain::{
    CheckKind, CostPosition, Finding, PositionAnnotations, RentalContract, Severity, UtilityBill,
};

pub use score::score_from_findings;

/// Borrowed view of one submission, handed to every pass.
#[derive(Clone, Copy)]
pub struct CheckInput<'a> {
    pub bill: &'a UtilityBill,
    pub positions: &'a [CostPosition],
    pub contract: &'a RentalContract,
}

type CheckFn =
    for<'a> fn(&'a CheckEngine, CheckInput<'a>, &mut PositionAnnotations) -> Vec<Finding>;

/// Pass order is part of the engine's contract: reports list findings
/// grouped in exactly this sequence.
const CHECK_SEQUENCE: [(CheckKind, CheckFn); 5] = [
    (CheckKind::Math, math::run),
    (CheckKind::Deadline, deadline::run),
    (CheckKind::Plausibility, plausibility::run),
    (CheckKind::Legal, legal::run),
    (CheckKind::Completeness, completeness::run),
];

/// Everything one verification run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub findings: Vec<Finding>,
    pub score: u8,
    pub annotations: PositionAnnotations,
}

impl CheckReport {
    pub fn errors(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == Severity::Error)
            .count()
    }

    pub fn warnings(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == Severity::Warning)
            .count()
    }
}

/// Stateless rule engine. Holds only the injected reference catalog, so the
/// same engine can serve any number of runs.
#[derive(Debug, Clone)]
pub struct CheckEngine {
    catalog: ReferenceCatalog,
}

impl CheckEngine {
    pub fn new(catalog: ReferenceCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    /// The pass order, exposed so callers can render findings by pass
    /// without hardcoding it.
    pub fn sequence() -> impl Iterator<Item = CheckKind> {
        CHECK_SEQUENCE.into_iter().map(|(kind, _)| kind)
    }

    /// Runs every pass and aggregates findings, score, and per-position
    /// annotations. Inputs are never mutated; identical inputs yield an
    /// identical report.
    pub fn run_all_checks(
        &self,
        bill: &UtilityBill,
        positions: &[CostPosition],
        contract: &RentalContract,
    ) -> CheckReport {
        let input = CheckInput {
            bill,
            positions,
            contract,
        };

        let mut findings = Vec::new();
        let mut annotations = PositionAnnotations::default();
        for (_, check) in CHECK_SEQUENCE {
            findings.extend(check(self, input, &mut annotations));
        }

        let score = score_from_findings(&findings);
        CheckReport {
            findings,
            score,
            annotations,
        }
    }
}
