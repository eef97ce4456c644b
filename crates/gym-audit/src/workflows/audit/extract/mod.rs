//! Turns a flat answer set into the finance, membership and operations
//! aggregates. Every function here is total: a missing answer resolves to its
//! default and an empty denominator resolves to zero.

mod finance;
mod members;
mod operations;

pub use finance::{
    extract_finance_data, ChargeBreakdown, FinanceData, FinanceRatios, OperatingResult,
    RevenueBreakdown,
};
pub use members::{extract_members_data, MembersData, DEFAULT_TENURE_MONTHS};
pub use operations::{extract_operations_data, OperationsData, DEFAULT_SURFACE_M2};

pub(crate) use members::{ACTIVE_MEMBERS, MEMBERS_BLOCK};
pub(crate) use operations::{ACQUISITION_BLOCK, MONTHLY_TRIALS};

use super::answers::{Answer, AnswerIndex};
use serde::Serialize;

/// The three domain aggregates derived from one answer set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditData {
    pub finance: FinanceData,
    pub members: MembersData,
    pub operations: OperationsData,
}

/// Runs the three extractors in dependency order: membership and operations
/// both read the annual revenue computed by the finance extractor.
pub fn extract_all(answers: &[Answer]) -> AuditData {
    extract_all_indexed(&AnswerIndex::new(answers))
}

pub fn extract_all_indexed(index: &AnswerIndex<'_>) -> AuditData {
    let finance = extract_finance_data(index);
    let members = extract_members_data(index, &finance);
    let operations = extract_operations_data(index, &finance);

    AuditData {
        finance,
        members,
        operations,
    }
}

/// `numerator / denominator`, or zero when the denominator is not positive.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        finite_or_zero(numerator / denominator)
    } else {
        0.0
    }
}

/// Same as [`ratio`] on a 0-100 scale.
pub(crate) fn ratio_pct(numerator: f64, denominator: f64) -> f64 {
    finite_or_zero(ratio(numerator, denominator) * 100.0)
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
