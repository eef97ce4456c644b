//! Pillar and global scoring over the KPI map.

pub mod brackets;
pub mod thresholds;

pub use brackets::{Brackets, Grading, MaxBracket, MinBracket, RangeBracket};

use super::kpi::{KpiCode, KpiMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thresholds::*;

/// The three top-level grading categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarCode {
    Finance,
    Clientele,
    Exploitation,
}

impl PillarCode {
    pub const fn ordered() -> [Self; 3] {
        [Self::Finance, Self::Clientele, Self::Exploitation]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Clientele => "clientele",
            Self::Exploitation => "exploitation",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Finance => "Finance",
            Self::Clientele => "Commercial & rétention",
            Self::Exploitation => "Organisation & pilotage",
        }
    }

    /// Share of the global score carried by this pillar.
    pub const fn weight(self) -> f64 {
        match self {
            Self::Finance => FINANCE_WEIGHT,
            Self::Clientele => CLIENTELE_WEIGHT,
            Self::Exploitation => EXPLOITATION_WEIGHT,
        }
    }

    fn components(self) -> &'static [Component] {
        match self {
            Self::Finance => FINANCE_COMPONENTS,
            Self::Clientele => CLIENTELE_COMPONENTS,
            Self::Exploitation => EXPLOITATION_COMPONENTS,
        }
    }
}

impl fmt::Display for PillarCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One graded KPI inside a pillar.
struct Component {
    kpi: KpiCode,
    grade_key: &'static str,
    grading: Grading,
    weight: f64,
}

const FINANCE_COMPONENTS: &[Component] = &[
    Component {
        kpi: KpiCode::MargeEbitda,
        grade_key: "score_rentabilite",
        grading: MARGE_EBITDA,
        weight: FINANCE_PROFITABILITY_WEIGHT,
    },
    Component {
        kpi: KpiCode::LoyerRatio,
        grade_key: "score_loyer",
        grading: LOYER_RATIO,
        weight: FINANCE_RENT_WEIGHT,
    },
    Component {
        kpi: KpiCode::MasseSalarialeRatio,
        grade_key: "score_ms",
        grading: MASSE_SALARIALE,
        weight: FINANCE_PAYROLL_WEIGHT,
    },
    Component {
        kpi: KpiCode::CaParM2,
        grade_key: "score_ca_m2",
        grading: CA_PAR_M2,
        weight: FINANCE_REVENUE_PER_M2_WEIGHT,
    },
];

const CLIENTELE_COMPONENTS: &[Component] = &[
    Component {
        kpi: KpiCode::PourcentRecurrent,
        grade_key: "score_recurrence",
        grading: RECURRENCE,
        weight: CLIENTELE_RECURRENCE_WEIGHT,
    },
    Component {
        kpi: KpiCode::Arpm,
        grade_key: "score_arpm",
        grading: ARPM,
        weight: CLIENTELE_ARPM_WEIGHT,
    },
    Component {
        kpi: KpiCode::ChurnMensuel,
        grade_key: "score_churn",
        grading: CHURN,
        weight: CLIENTELE_CHURN_WEIGHT,
    },
];

const EXPLOITATION_COMPONENTS: &[Component] = &[
    Component {
        kpi: KpiCode::OccupationMoyenne,
        grade_key: "score_occupation",
        grading: OCCUPATION,
        weight: EXPLOITATION_OCCUPANCY_WEIGHT,
    },
    Component {
        kpi: KpiCode::ConversionEssai,
        grade_key: "score_conversion",
        grading: CONVERSION,
        weight: EXPLOITATION_CONVERSION_WEIGHT,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarScore {
    pub code: PillarCode,
    pub name: String,
    pub score: u8,
    pub weight: f64,
    /// Raw KPI values and per-metric grades behind the score.
    pub details: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub scores: Vec<PillarScore>,
    pub global_score: u8,
}

impl ScoreSummary {
    pub fn pillar(&self, code: PillarCode) -> Option<&PillarScore> {
        self.scores.iter().find(|pillar| pillar.code == code)
    }

    pub fn pillar_score(&self, code: PillarCode) -> u8 {
        self.pillar(code).map(|pillar| pillar.score).unwrap_or(0)
    }

    /// Pillar with the lowest score; ties resolve to the first pillar.
    pub fn weakest(&self) -> Option<&PillarScore> {
        self.scores.iter().min_by_key(|pillar| pillar.score)
    }
}

pub fn score_pillar(code: PillarCode, kpis: &KpiMap) -> PillarScore {
    let mut details = BTreeMap::new();
    let mut blended = 0.0;

    for component in code.components() {
        let value = kpis.get(component.kpi);
        let grade = component.grading.grade(value);
        blended += grade * component.weight;

        details.insert(component.kpi.as_str().to_string(), value);
        details.insert(component.grade_key.to_string(), grade);
    }

    PillarScore {
        code,
        name: code.label().to_string(),
        score: to_score(blended),
        weight: code.weight(),
        details,
    }
}

/// `round(finance * 0.30 + clientele * 0.35 + exploitation * 0.35)`.
pub fn global_score(finance: u8, clientele: u8, exploitation: u8) -> u8 {
    let weighted = f64::from(finance) * FINANCE_WEIGHT
        + f64::from(clientele) * CLIENTELE_WEIGHT
        + f64::from(exploitation) * EXPLOITATION_WEIGHT;
    to_score(weighted)
}

pub fn calculate_scores(kpis: &KpiMap) -> ScoreSummary {
    let scores: Vec<PillarScore> = PillarCode::ordered()
        .into_iter()
        .map(|code| score_pillar(code, kpis))
        .collect();

    let pillar = |code: PillarCode| {
        scores
            .iter()
            .find(|score| score.code == code)
            .map(|score| score.score)
            .unwrap_or(0)
    };
    let global = global_score(
        pillar(PillarCode::Finance),
        pillar(PillarCode::Clientele),
        pillar(PillarCode::Exploitation),
    );

    tracing::debug!(
        finance = pillar(PillarCode::Finance),
        clientele = pillar(PillarCode::Clientele),
        exploitation = pillar(PillarCode::Exploitation),
        global,
        "scored audit"
    );

    ScoreSummary {
        scores,
        global_score: global,
    }
}

fn to_score(value: f64) -> u8 {
    if value.is_finite() {
        value.clamp(0.0, 100.0).round() as u8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finance_kpis(marge: f64) -> KpiMap {
        KpiMap::new().with(KpiCode::MargeEbitda, marge)
    }

    #[test]
    fn profitability_grade_matches_reference_points() {
        let at = |marge: f64| {
            score_pillar(PillarCode::Finance, &finance_kpis(marge)).details["score_rentabilite"]
        };

        assert_eq!(at(25.0), 100.0);
        assert_eq!(at(15.0), 75.0);
        assert!(at(-12.0) <= 25.0);
    }

    #[test]
    fn payroll_grade_keeps_band_edges() {
        let at = |ratio: f64| {
            let kpis = KpiMap::new().with(KpiCode::MasseSalarialeRatio, ratio);
            score_pillar(PillarCode::Finance, &kpis).details["score_ms"]
        };

        assert_eq!(at(40.0), 100.0);
        assert_eq!(at(45.0), 85.0);
        assert_eq!(at(50.0), 70.0);
        assert_eq!(at(55.0), 50.0);
    }

    #[test]
    fn pillar_blend_uses_fixed_sub_weights() {
        let kpis = KpiMap::new()
            .with(KpiCode::OccupationMoyenne, 90.0)
            .with(KpiCode::ConversionEssai, 45.0);
        let pillar = score_pillar(PillarCode::Exploitation, &kpis);

        // 100 * 0.6 + 75 * 0.4
        assert_eq!(pillar.score, 90);
        assert_eq!(pillar.details["occupation_moyenne"], 90.0);
        assert_eq!(pillar.details["score_conversion"], 75.0);
        assert_eq!(pillar.name, "Organisation & pilotage");
    }

    #[test]
    fn empty_kpis_still_score_every_pillar() {
        let summary = calculate_scores(&KpiMap::new());

        assert_eq!(summary.scores.len(), 3);
        for pillar in &summary.scores {
            assert!(pillar.score <= 100);
        }
        assert!(summary.global_score <= 100);
    }

    #[test]
    fn extreme_values_stay_in_bounds() {
        let values = [-1e9, -100.0, -0.01, 0.0, 0.5, 50.0, 100.0, 1e9];
        for value in values {
            let kpis: KpiMap = KpiCode::ordered()
                .into_iter()
                .map(|code| (code, value))
                .collect();
            let summary = calculate_scores(&kpis);

            for pillar in &summary.scores {
                assert!(pillar.score <= 100, "{} out of range", pillar.code);
            }
            assert!(summary.global_score <= 100);
        }
    }

    #[test]
    fn global_score_follows_the_weighted_sum() {
        for finance in (0..=100u8).step_by(7) {
            for clientele in (0..=100u8).step_by(11) {
                for exploitation in (0..=100u8).step_by(13) {
                    let expected = (f64::from(finance) * 0.30
                        + f64::from(clientele) * 0.35
                        + f64::from(exploitation) * 0.35)
                        .round() as u8;
                    assert_eq!(global_score(finance, clientele, exploitation), expected);
                }
            }
        }
        assert_eq!(global_score(100, 100, 100), 100);
        assert_eq!(global_score(0, 0, 0), 0);
    }

    #[test]
    fn summary_serializes_global_score_in_camel_case() {
        let summary = calculate_scores(&KpiMap::new());
        let json = serde_json::to_value(&summary).expect("summary serializes");

        assert!(json.get("globalScore").is_some());
        assert_eq!(json["scores"][0]["code"], "finance");
        assert_eq!(json["scores"][1]["name"], "Commercial & rétention");
    }

    #[test]
    fn weakest_pillar_is_the_lowest_score() {
        let kpis = KpiMap::new()
            .with(KpiCode::MargeEbitda, 30.0)
            .with(KpiCode::LoyerRatio, 10.0)
            .with(KpiCode::MasseSalarialeRatio, 35.0)
            .with(KpiCode::CaParM2, 500.0)
            .with(KpiCode::OccupationMoyenne, 90.0)
            .with(KpiCode::ConversionEssai, 65.0);
        let summary = calculate_scores(&kpis);

        let weakest = summary.weakest().expect("three pillars");
        assert_eq!(weakest.code, PillarCode::Clientele);
        assert_eq!(summary.pillar_score(PillarCode::Finance), 100);
    }
}
