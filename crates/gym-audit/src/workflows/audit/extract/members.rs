use super::super::answers::AnswerIndex;
use super::finance::FinanceData;
use super::{ratio, ratio_pct};
use serde::Serialize;

pub(crate) const MEMBERS_BLOCK: &str = "structure_base";
const RETENTION_BLOCK: &str = "retention_churn";

pub(crate) const ACTIVE_MEMBERS: &str = "nb_membres_actifs_total";
const UNLIMITED_MEMBERS: &str = "nb_membres_illimite";
const MEMBERS_WITHOUT_COMMITMENT: &str = "nb_membres_sans_engagement";
const AVERAGE_TENURE_MONTHS: &str = "anciennes_moyens_mois";

/// Monthly cancellation count under its current code and legacy aliases.
const MONTHLY_CANCELLATIONS: &[&str] = &[
    "resiliations_mensuelles",
    "nb_resiliations_mois",
    "nb_resiliations_mois_actuel",
];

/// Tenure assumed when the gym does not report one.
pub const DEFAULT_TENURE_MONTHS: f64 = 22.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MembersData {
    pub active_members: f64,
    pub unlimited_members: f64,
    pub members_without_commitment: f64,
    /// Average revenue per member per month.
    pub arpm: f64,
    pub average_tenure_months: f64,
    pub ltv_estimate: f64,
    pub monthly_cancellations: f64,
    pub churn_monthly_pct: f64,
}

pub fn extract_members_data(answers: &AnswerIndex<'_>, finance: &FinanceData) -> MembersData {
    let active_members = answers.value_or(MEMBERS_BLOCK, ACTIVE_MEMBERS, 0.0);
    let unlimited_members = answers.value_or(MEMBERS_BLOCK, UNLIMITED_MEMBERS, 0.0);
    let members_without_commitment =
        answers.value_or(MEMBERS_BLOCK, MEMBERS_WITHOUT_COMMITMENT, 0.0);

    let arpm = if finance.revenue.total_12m > 0.0 {
        ratio(finance.revenue.total_12m / 12.0, active_members)
    } else {
        0.0
    };

    let average_tenure_months = answers.value_or(
        RETENTION_BLOCK,
        AVERAGE_TENURE_MONTHS,
        DEFAULT_TENURE_MONTHS,
    );

    let monthly_cancellations = answers.first_non_zero(RETENTION_BLOCK, MONTHLY_CANCELLATIONS);

    MembersData {
        active_members,
        unlimited_members,
        members_without_commitment,
        arpm,
        average_tenure_months,
        ltv_estimate: arpm * average_tenure_months,
        monthly_cancellations,
        churn_monthly_pct: ratio_pct(monthly_cancellations, active_members),
    }
}
