//! Score aggregation over a list of findings.

use crate::billing::domain::{Finding, Severity};

const ERROR_PENALTY: i32 = 20;
const WARNING_PENALTY: i32 = 5;

/// 0..=100, starting at 100 with 20 points off per error and 5 per warning.
/// `Ok` findings never move the score.
pub fn score_from_findings(findings: &[Finding]) -> u8 {
    let errors = findings
        .iter()
        .filter(|finding| finding.severity == Severity::Error)
        .count() as i32;
    let warnings = findings
        .iter()
        .filter(|finding| finding.severity == Severity::Warning)
        .count() as i32;

    let score = 100 - ERROR_PENALTY * errors - WARNING_PENALTY * warnings;
    score.clamp(0, 100) as u8
}
