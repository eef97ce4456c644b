//! Gym audit pipeline: answers are extracted into finance, membership and
//! operations aggregates, flattened into a KPI map, graded into three pillar
//! scores and turned into ranked recommendations. Churn risk, financial
//! health and pricing position are graded alongside from the same answers.

pub mod answers;
pub mod churn_risk;
pub mod extract;
pub mod financial_health;
pub mod kpi;
pub mod pricing;
pub mod recommendations;
pub mod report;
pub mod samples;
pub mod scoring;

pub use answers::{get_answer_value, Answer, AnswerIndex, AnswerValue};
pub use churn_risk::{analyze_churn_risk, ChurnRiskAssessment, RiskFactor, RiskLevel};
pub use extract::{extract_all, AuditData};
pub use financial_health::{
    calculate_financial_health, FinancialHealth, HealthInputs, HealthSection,
};
pub use kpi::{calculate_kpis, KpiCode, KpiMap};
pub use pricing::{calculate_pricing_position, PricingPosition, PricingQuadrant};
pub use recommendations::{
    generate_recommendations, Category, Confidence, EffortLevel, Priority, Recommendation,
    RecommendationEngine,
};
pub use report::{AuditInsights, AuditReport, HealthRating};
pub use samples::SampleScenario;
pub use scoring::{calculate_scores, PillarCode, PillarScore, ScoreSummary};
