use crate::workflows::audit::scoring::PillarCode;
use serde::Serialize;

/// Headline rating derived from the global score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthRating {
    Excellent,
    Solide,
    Fragile,
    Critique,
}

impl HealthRating {
    pub const fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Excellent
        } else if score >= 65 {
            Self::Solide
        } else if score >= 50 {
            Self::Fragile
        } else {
            Self::Critique
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Solide => "Solide",
            Self::Fragile => "Fragile",
            Self::Critique => "Critique",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditInsights {
    pub global_score: u8,
    pub rating: HealthRating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_pillar: Option<PillarCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_pillar_score: Option<u8>,
    pub critical_recommendations: usize,
    pub total_upside_eur: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
}
