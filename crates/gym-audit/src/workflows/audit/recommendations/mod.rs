//! Declarative recommendation rules evaluated against the KPI map.

mod domain;
mod rules;

pub use domain::{Category, Confidence, EffortLevel, Priority, Recommendation};
pub use rules::{Rule, RuleContext, MAINTAIN_PERFORMANCE, STANDARD_RULES};

use super::answers::{Answer, AnswerIndex};
use super::extract::finite_or_zero;
use super::kpi::KpiMap;
use rules::{MAINTAIN_PERFORMANCE_DESCRIPTION, MAINTAIN_PERFORMANCE_TITLE};
use std::collections::HashSet;

/// Upper bound on the number of recommendations returned for one audit.
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Evaluates a rule table in one pass and ranks the triggered rules.
#[derive(Clone, Copy)]
pub struct RecommendationEngine {
    rules: &'static [Rule],
    limit: usize,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl RecommendationEngine {
    pub const fn standard() -> Self {
        Self::with_rules(STANDARD_RULES)
    }

    pub const fn with_rules(rules: &'static [Rule]) -> Self {
        Self {
            rules,
            limit: MAX_RECOMMENDATIONS,
        }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Ranked recommendations: priority ascending, then expected impact
    /// descending, one per `rec_code`, at most six. Never empty.
    pub fn evaluate(&self, kpis: &KpiMap, answers: &AnswerIndex<'_>) -> Vec<Recommendation> {
        let ctx = RuleContext { kpis, answers };

        let mut candidates: Vec<Recommendation> = self
            .rules
            .iter()
            .filter(|rule| (rule.triggers)(&ctx))
            .map(|rule| Recommendation {
                rec_code: rule.rec_code.to_string(),
                title: rule.title.to_string(),
                description: (rule.describe)(&ctx),
                priority: rule.priority,
                expected_impact_eur: finite_or_zero((rule.impact)(&ctx)),
                effort_level: rule.effort_level,
                confidence: rule.confidence,
                category: rule.category,
            })
            .collect();

        tracing::debug!(
            triggered = ?candidates.iter().map(|rec| rec.rec_code.as_str()).collect::<Vec<_>>(),
            "evaluated recommendation rules"
        );

        // Stable sort keeps table order for equal priority and impact.
        candidates.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| b.expected_impact_eur.total_cmp(&a.expected_impact_eur))
        });

        let mut seen = HashSet::new();
        candidates.retain(|rec| seen.insert(rec.rec_code.clone()));
        candidates.truncate(self.limit);

        if candidates.is_empty() {
            candidates.push(maintain_performance());
        }

        candidates
    }
}

pub fn generate_recommendations(kpis: &KpiMap, answers: &[Answer]) -> Vec<Recommendation> {
    RecommendationEngine::standard().evaluate(kpis, &AnswerIndex::new(answers))
}

fn maintain_performance() -> Recommendation {
    Recommendation {
        rec_code: MAINTAIN_PERFORMANCE.to_string(),
        title: MAINTAIN_PERFORMANCE_TITLE.to_string(),
        description: MAINTAIN_PERFORMANCE_DESCRIPTION.to_string(),
        priority: Priority::P3,
        expected_impact_eur: 0.0,
        effort_level: EffortLevel::Facile,
        confidence: Confidence::Fort,
        category: Category::General,
    }
}
