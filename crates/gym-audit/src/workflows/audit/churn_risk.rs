//! Member churn risk assessment built from five weighted risk factors.
//!
//! Each factor reuses the bracket engine, with the grade read as risk points
//! rather than quality: the worse the signal, the more points it adds.

use super::answers::{Answer, AnswerIndex};
use super::extract::{extract_all_indexed, ratio_pct, MembersData};
use super::scoring::{Grading, MaxBracket, MinBracket};
use serde::{Deserialize, Serialize};
use std::fmt;

const ENGAGEMENT_BLOCK: &str = "engagement_satisfaction";
const WEEKLY_ATTENDANCE: &str = "frequentation_moyenne_semaine";
const INACTIVE_30_DAYS: &str = "nb_membres_inactifs_30j";
const NPS_SCORE: &str = "nps_score";

const CHURN_RISK: Grading = Grading::max(
    &[
        MaxBracket::new(3.0, 0.0),
        MaxBracket::new(5.0, 10.0),
        MaxBracket::new(8.0, 20.0),
    ],
    30.0,
);

const ATTENDANCE_RISK: Grading = Grading::min(
    &[
        MinBracket::new(3.0, 0.0),
        MinBracket::new(2.0, 5.0),
        MinBracket::new(1.0, 15.0),
    ],
    25.0,
);

const INACTIVE_RISK: Grading = Grading::max(
    &[
        MaxBracket::new(5.0, 0.0),
        MaxBracket::new(10.0, 5.0),
        MaxBracket::new(20.0, 12.0),
    ],
    20.0,
);

const NPS_RISK: Grading = Grading::min(
    &[
        MinBracket::new(40.0, 0.0),
        MinBracket::new(20.0, 5.0),
        MinBracket::new(0.0, 10.0),
    ],
    15.0,
);

const NO_COMMITMENT_RISK: Grading = Grading::max(
    &[
        MaxBracket::new(30.0, 0.0),
        MaxBracket::new(50.0, 5.0),
    ],
    10.0,
);

const DEFAULT_ACTION: &str =
    "Maintenir les actions de fidélisation actuelles et suivre les indicateurs mensuellement";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "faible")]
    Faible,
    #[serde(rename = "modéré")]
    Modere,
    #[serde(rename = "élevé")]
    Eleve,
    #[serde(rename = "critique")]
    Critique,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 60.0 {
            RiskLevel::Critique
        } else if score >= 40.0 {
            RiskLevel::Eleve
        } else if score >= 20.0 {
            RiskLevel::Modere
        } else {
            RiskLevel::Faible
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Faible => "faible",
            RiskLevel::Modere => "modéré",
            RiskLevel::Eleve => "élevé",
            RiskLevel::Critique => "critique",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub score: f64,
    /// Observed value behind the factor, formatted for display.
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnRiskAssessment {
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub factors: Vec<RiskFactor>,
    pub actions: Vec<String>,
}

pub fn analyze_churn_risk(answers: &[Answer]) -> ChurnRiskAssessment {
    let index = AnswerIndex::new(answers);
    let data = extract_all_indexed(&index);
    assess_churn_risk(&index, &data.members)
}

pub fn assess_churn_risk(answers: &AnswerIndex<'_>, members: &MembersData) -> ChurnRiskAssessment {
    let churn = members.churn_monthly_pct;
    let attendance = answers.value_or(ENGAGEMENT_BLOCK, WEEKLY_ATTENDANCE, 0.0);
    let inactive_pct = ratio_pct(
        answers.value_or(ENGAGEMENT_BLOCK, INACTIVE_30_DAYS, 0.0),
        members.active_members,
    );
    let nps = answers.value_or(ENGAGEMENT_BLOCK, NPS_SCORE, 0.0);
    let no_commitment_pct = ratio_pct(members.members_without_commitment, members.active_members);

    let churn_points = CHURN_RISK.grade(churn);
    let attendance_points = ATTENDANCE_RISK.grade(attendance);
    let inactive_points = INACTIVE_RISK.grade(inactive_pct);
    let nps_points = NPS_RISK.grade(nps);
    let no_commitment_points = NO_COMMITMENT_RISK.grade(no_commitment_pct);

    let factors = vec![
        factor(
            "Taux de churn mensuel",
            churn_points,
            format!("{churn:.1}%"),
        ),
        factor(
            "Fréquentation moyenne",
            attendance_points,
            format!("{attendance} séances/sem"),
        ),
        factor(
            "Membres inactifs >30j",
            inactive_points,
            format!("{inactive_pct:.0}%"),
        ),
        factor("NPS Score", nps_points, format!("{nps}")),
        factor(
            "% sans engagement",
            no_commitment_points,
            format!("{no_commitment_pct:.0}%"),
        ),
    ];

    let mut actions: Vec<String> = [
        (
            churn_points >= 20.0,
            "Mettre en place un programme de rétention avec suivi personnalisé des membres à risque",
        ),
        (
            attendance_points >= 15.0,
            "Lancer des challenges et programmes de fidélisation pour augmenter la fréquentation",
        ),
        (
            inactive_points >= 12.0,
            "Contacter les membres inactifs avec des offres de réactivation",
        ),
        (
            nps_points >= 10.0,
            "Réaliser des enquêtes de satisfaction et adresser les points d'insatisfaction",
        ),
        (
            no_commitment_points >= 5.0,
            "Proposer des offres d'engagement avec avantages (réduction, services inclus)",
        ),
    ]
    .into_iter()
    .filter(|(applies, _)| *applies)
    .map(|(_, action)| action.to_string())
    .collect();

    if actions.is_empty() {
        actions.push(DEFAULT_ACTION.to_string());
    }

    let total: f64 = factors.iter().map(|factor| factor.score).sum();
    let risk_score = total.clamp(0.0, 100.0);

    ChurnRiskAssessment {
        risk_level: RiskLevel::from_score(total),
        risk_score,
        factors,
        actions,
    }
}

fn factor(name: &str, score: f64, impact: String) -> RiskFactor {
    RiskFactor {
        name: name.to_string(),
        score,
        impact,
    }
}
