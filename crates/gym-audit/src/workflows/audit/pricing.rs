//! Price/quality positioning of the gym against its catchment area.

use super::answers::{Answer, AnswerIndex};
use super::extract::{extract_all_indexed, ratio_pct, MembersData};
use super::scoring::{Grading, MinBracket};
use serde::{Deserialize, Serialize};
use std::fmt;

const PRICING_BLOCK: &str = "tarification_detaillee";
/// Reference price, falling back to the three-sessions-a-week plan.
const REFERENCE_PRICES: &[&str] = &["prix_illimite_sans_engagement", "prix_3x_semaine"];

const LOCATION_BLOCK: &str = "localisation";
const AREA_INCOME: &str = "revenus_moyens_zone";

const ENGAGEMENT_BLOCK: &str = "engagement_satisfaction";
const GOOGLE_RATING: &str = "note_moyenne_google";
const NPS_SCORE: &str = "nps_score";

const INFRASTRUCTURE_BLOCK: &str = "infrastructure_detaillee";
const EQUIPMENT_CONDITION: &str = "etat_general_materiel";

const CERTIFICATIONS_BLOCK: &str = "certifications";
const LEVEL_2_COACHES: &[&str] = &["coaches_cf_l2", "nb_coachs_cf_level_2"];
const LEVEL_3_COACHES: &[&str] = &["coaches_cf_l3", "nb_coachs_cf_level_3"];
const LEVEL_4_COACHES: &[&str] = &["coaches_cf_l4", "nb_coachs_cf_level_4"];

/// Typical monthly price when the area income bracket is unknown.
pub const DEFAULT_AREA_PRICE: f64 = 150.0;

/// Area income bracket label fragment and the typical monthly price there.
/// Checked in order, so the most specific fragment comes first.
const AREA_PRICES: &[(&str, f64)] = &[
    ("Très élevés", 200.0),
    ("Élevés", 180.0),
    ("Moyens", 150.0),
    ("Faibles", 120.0),
];

const EQUIPMENT_POINTS: &[(&str, f64)] = &[("Excellent", 10.0), ("Bon", 7.0), ("Moyen", 3.0)];

const BASE_QUALITY: f64 = 50.0;
const HIGH_QUALITY_THRESHOLD: f64 = 60.0;

const GOOGLE_POINTS: Grading = Grading::min(
    &[
        MinBracket::new(4.5, 15.0),
        MinBracket::new(4.0, 10.0),
        MinBracket::new(3.5, 5.0),
    ],
    0.0,
);

const NPS_POINTS: Grading = Grading::min(
    &[
        MinBracket::new(50.0, 15.0),
        MinBracket::new(30.0, 10.0),
        MinBracket::new(10.0, 5.0),
    ],
    0.0,
);

const CERTIFICATION_POINTS: Grading = Grading::min(
    &[MinBracket::new(5.0, 10.0), MinBracket::new(3.0, 5.0)],
    0.0,
);

/// Quadrant of the quality/price matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingQuadrant {
    /// High quality, price at or above the area.
    #[serde(rename = "P1")]
    JustifiedPremium,
    /// High quality, price below the area.
    #[serde(rename = "P2")]
    GreatValue,
    /// Low quality, price below the area.
    #[serde(rename = "P3")]
    EntryLevel,
    /// Low quality, price at or above the area.
    #[serde(rename = "P4")]
    Overpriced,
}

impl PricingQuadrant {
    pub fn classify(high_quality: bool, above_area: bool) -> Self {
        match (high_quality, above_area) {
            (true, true) => PricingQuadrant::JustifiedPremium,
            (true, false) => PricingQuadrant::GreatValue,
            (false, false) => PricingQuadrant::EntryLevel,
            (false, true) => PricingQuadrant::Overpriced,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PricingQuadrant::JustifiedPremium => "P1",
            PricingQuadrant::GreatValue => "P2",
            PricingQuadrant::EntryLevel => "P3",
            PricingQuadrant::Overpriced => "P4",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PricingQuadrant::JustifiedPremium => "Premium justifié",
            PricingQuadrant::GreatValue => "Excellente valeur",
            PricingQuadrant::EntryLevel => "Entrée de gamme",
            PricingQuadrant::Overpriced => "Prix élevé / Qualité insuffisante",
        }
    }

    pub const fn advice(self) -> &'static str {
        match self {
            PricingQuadrant::JustifiedPremium => {
                "Votre positionnement premium est cohérent avec votre qualité. Maintenez et communiquez sur votre valeur ajoutée."
            }
            PricingQuadrant::GreatValue => {
                "Votre qualité est supérieure à votre prix. Envisagez une augmentation tarifaire progressive pour mieux valoriser votre offre."
            }
            PricingQuadrant::EntryLevel => {
                "Investissez dans la qualité (certifications, équipement) pour monter en gamme, ou assumez un positionnement accessible."
            }
            PricingQuadrant::Overpriced => {
                "Attention: vos prix sont élevés mais la qualité perçue est insuffisante. Améliorez rapidement l'expérience client ou ajustez vos tarifs."
            }
        }
    }
}

impl fmt::Display for PricingQuadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPosition {
    pub position: PricingQuadrant,
    pub position_label: String,
    pub gym_price: f64,
    pub area_price: f64,
    /// Gap between the gym and area prices, as a percentage of the area price.
    pub gap_pct: f64,
    pub quality_score: f64,
    pub recommendation: String,
}

pub fn calculate_pricing_position(answers: &[Answer]) -> PricingPosition {
    let index = AnswerIndex::new(answers);
    let data = extract_all_indexed(&index);
    assess_pricing_position(&index, &data.members)
}

pub fn assess_pricing_position(
    answers: &AnswerIndex<'_>,
    members: &MembersData,
) -> PricingPosition {
    let listed_price = answers.first_non_zero(PRICING_BLOCK, REFERENCE_PRICES);
    let gym_price = if listed_price != 0.0 {
        listed_price
    } else {
        members.arpm
    };

    let area_price = answers
        .text(LOCATION_BLOCK, AREA_INCOME)
        .map(area_reference_price)
        .unwrap_or(DEFAULT_AREA_PRICE);
    let gap_pct = ratio_pct(gym_price - area_price, area_price);

    let quality_score = assess_quality(answers);
    let high_quality = quality_score >= HIGH_QUALITY_THRESHOLD;
    let position = PricingQuadrant::classify(high_quality, gap_pct >= 0.0);

    PricingPosition {
        position,
        position_label: position.label().to_string(),
        gym_price,
        area_price,
        gap_pct,
        quality_score,
        recommendation: position.advice().to_string(),
    }
}

fn area_reference_price(income_bracket: &str) -> f64 {
    AREA_PRICES
        .iter()
        .find(|(fragment, _)| income_bracket.contains(fragment))
        .map(|(_, price)| *price)
        .unwrap_or(DEFAULT_AREA_PRICE)
}

fn equipment_points(condition: &str) -> f64 {
    EQUIPMENT_POINTS
        .iter()
        .find(|(label, _)| *label == condition)
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

/// 50 base points plus reviews, NPS, equipment condition and coach
/// certifications, capped at 100.
fn assess_quality(answers: &AnswerIndex<'_>) -> f64 {
    let google = GOOGLE_POINTS.grade(answers.value_or(ENGAGEMENT_BLOCK, GOOGLE_RATING, 0.0));
    let nps = NPS_POINTS.grade(answers.value_or(ENGAGEMENT_BLOCK, NPS_SCORE, 0.0));

    let equipment = answers
        .text(INFRASTRUCTURE_BLOCK, EQUIPMENT_CONDITION)
        .map(equipment_points)
        .unwrap_or(0.0);

    // Higher certification levels weigh more.
    let certification_level = answers.first_non_zero(CERTIFICATIONS_BLOCK, LEVEL_2_COACHES)
        + answers.first_non_zero(CERTIFICATIONS_BLOCK, LEVEL_3_COACHES) * 2.0
        + answers.first_non_zero(CERTIFICATIONS_BLOCK, LEVEL_4_COACHES) * 3.0;
    let certifications = CERTIFICATION_POINTS.grade(certification_level);

    (BASE_QUALITY + google + nps + equipment + certifications).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::audit::samples::{performant_gym, struggling_gym};

    fn reputed_gym(price: f64, area: &str) -> Vec<Answer> {
        vec![
            Answer::new(PRICING_BLOCK, "prix_illimite_sans_engagement", price),
            Answer::new(LOCATION_BLOCK, AREA_INCOME, area),
            Answer::new(ENGAGEMENT_BLOCK, GOOGLE_RATING, 4.7),
            Answer::new(ENGAGEMENT_BLOCK, NPS_SCORE, 35.0),
            Answer::new(INFRASTRUCTURE_BLOCK, EQUIPMENT_CONDITION, "Bon"),
            Answer::new(CERTIFICATIONS_BLOCK, "coaches_cf_l2", 2.0),
            Answer::new(CERTIFICATIONS_BLOCK, "nb_coachs_cf_level_3", 1.0),
        ]
    }

    #[test]
    fn quality_adds_reviews_nps_equipment_and_certifications() {
        let position = calculate_pricing_position(&reputed_gym(190.0, "Élevés (35-50k€)"));

        // 50 + 15 + 10 + 7 + 5 (2 level-2 coaches + 1 level-3 coach)
        assert_eq!(position.quality_score, 87.0);
        assert_eq!(position.area_price, 180.0);
        assert_eq!(position.position, PricingQuadrant::JustifiedPremium);
        assert_eq!(position.position_label, "Premium justifié");
    }

    #[test]
    fn high_quality_below_area_price_is_great_value() {
        let position = calculate_pricing_position(&reputed_gym(160.0, "Très élevés (>50k€)"));

        assert_eq!(position.area_price, 200.0);
        assert!((position.gap_pct - -20.0).abs() < 1e-9);
        assert_eq!(position.position, PricingQuadrant::GreatValue);
    }

    #[test]
    fn sample_gyms_without_quality_signals_sit_at_entry_level() {
        for answers in [performant_gym(), struggling_gym()] {
            let position = calculate_pricing_position(&answers);

            assert_eq!(position.area_price, DEFAULT_AREA_PRICE);
            assert_eq!(position.quality_score, BASE_QUALITY);
            assert!(position.gap_pct < 0.0);
            assert_eq!(position.position, PricingQuadrant::EntryLevel);
        }
    }

    #[test]
    fn price_at_area_level_counts_as_premium() {
        let answers = vec![
            Answer::new(PRICING_BLOCK, "prix_3x_semaine", 120.0),
            Answer::new(LOCATION_BLOCK, AREA_INCOME, "Faibles (<25k€)"),
        ];
        let position = calculate_pricing_position(&answers);

        assert_eq!(position.gym_price, 120.0);
        assert_eq!(position.gap_pct, 0.0);
        assert_eq!(position.position, PricingQuadrant::Overpriced);
    }

    #[test]
    fn missing_price_falls_back_to_arpm() {
        let answers = vec![
            Answer::new("produits_exploitation", "ca_abonnements_mensuels", 9_000.0),
            Answer::new("structure_base", "nb_membres_actifs_total", 100.0),
        ];
        let position = calculate_pricing_position(&answers);

        assert!((position.gym_price - 90.0).abs() < 1e-9);
        assert_eq!(position.area_price, DEFAULT_AREA_PRICE);
    }

    #[test]
    fn quadrant_serializes_as_matrix_cell() {
        let json = serde_json::to_value(PricingQuadrant::Overpriced).expect("quadrant serializes");
        assert_eq!(json, "P4");
    }
}
