use super::views::{AuditInsights, HealthRating};
use super::AuditReport;
use crate::workflows::audit::churn_risk::RiskLevel;
use crate::workflows::audit::kpi::KpiCode;
use crate::workflows::audit::recommendations::Priority;

pub(crate) fn generate_insights(report: &AuditReport) -> AuditInsights {
    let global_score = report.scores.global_score;
    let rating = HealthRating::from_score(global_score);
    let weakest = report.scores.weakest();

    let critical_recommendations = report
        .recommendations
        .iter()
        .filter(|rec| rec.priority == Priority::P1)
        .count();
    let total_upside_eur: f64 = report
        .recommendations
        .iter()
        .map(|rec| rec.expected_impact_eur.max(0.0))
        .sum();

    let mut observations = vec![format!("Global score {global_score}/100 ({})", rating.label())];

    if let Some(pillar) = weakest {
        observations.push(format!(
            "{} is the weakest pillar at {}/100",
            pillar.name, pillar.score
        ));
    }

    let margin = report.kpis.get(KpiCode::MargeEbitda);
    if margin < 0.0 {
        observations.push(format!("Operating at a loss: EBITDA margin {margin:.1}% of revenue"));
    }

    if report.churn_risk.risk_level >= RiskLevel::Eleve {
        observations.push(format!(
            "Churn risk {} ({:.0} points)",
            report.churn_risk.risk_level, report.churn_risk.risk_score
        ));
    }

    if critical_recommendations > 0 {
        observations.push(format!(
            "{critical_recommendations} critical recommendation{} to address first",
            plural(critical_recommendations)
        ));
    }

    if total_upside_eur > 0.0 {
        observations.push(format!(
            "Estimated annual upside of {total_upside_eur:.0} EUR across {} recommendation{}",
            report.recommendations.len(),
            plural(report.recommendations.len())
        ));
    }

    AuditInsights {
        global_score,
        rating,
        weakest_pillar: weakest.map(|pillar| pillar.code),
        weakest_pillar_score: weakest.map(|pillar| pillar.score),
        critical_recommendations,
        total_upside_eur,
        observations,
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
