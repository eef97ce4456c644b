mod insights;
mod views;

pub use views::{AuditInsights, HealthRating};

use super::answers::{Answer, AnswerIndex};
use super::churn_risk::{assess_churn_risk, ChurnRiskAssessment};
use super::extract::{extract_all_indexed, AuditData};
use super::financial_health::{assess_financial_health, FinancialHealth};
use super::kpi::{kpis_from_data, KpiMap};
use super::pricing::{assess_pricing_position, PricingPosition};
use super::recommendations::{Recommendation, RecommendationEngine};
use super::scoring::{calculate_scores, ScoreSummary};
use serde::Serialize;

/// Everything one audit produces, computed in a single pass over the answers.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub answer_count: usize,
    pub kpis: KpiMap,
    pub scores: ScoreSummary,
    pub recommendations: Vec<Recommendation>,
    pub churn_risk: ChurnRiskAssessment,
    pub financial_health: FinancialHealth,
    pub pricing: PricingPosition,
    pub data: AuditData,
}

impl AuditReport {
    pub fn compute(answers: &[Answer]) -> Self {
        Self::compute_with(answers, &RecommendationEngine::standard())
    }

    pub fn compute_with(answers: &[Answer], engine: &RecommendationEngine) -> Self {
        let index = AnswerIndex::new(answers);
        let data = extract_all_indexed(&index);
        let kpis = kpis_from_data(&data);
        tracing::debug!(
            answers = index.len(),
            kpis = kpis.len(),
            "extracted audit kpis"
        );

        let scores = calculate_scores(&kpis);
        let recommendations = engine.evaluate(&kpis, &index);
        let churn_risk = assess_churn_risk(&index, &data.members);
        let financial_health = assess_financial_health(&index, &data.finance);
        let pricing = assess_pricing_position(&index, &data.members);

        Self {
            answer_count: index.len(),
            kpis,
            scores,
            recommendations,
            churn_risk,
            financial_health,
            pricing,
            data,
        }
    }

    pub fn insights(&self) -> AuditInsights {
        insights::generate_insights(self)
    }
}
