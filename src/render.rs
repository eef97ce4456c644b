use chrono::{DateTime, Utc};
use gym_audit::config::OutputFormat;
use gym_audit::error::AppError;
use gym_audit::workflows::audit::{AuditInsights, AuditReport, KpiCode, SampleScenario};
use serde::Serialize;

/// Where the audited answers came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub(crate) enum AuditSource {
    Export(String),
    Sample(SampleScenario),
}

impl AuditSource {
    fn describe(&self) -> String {
        match self {
            AuditSource::Export(path) => format!("answer export {path}"),
            AuditSource::Sample(scenario) => format!("sample gym ({scenario})"),
        }
    }
}

#[derive(Debug, Serialize)]
struct AuditResponse<'a> {
    generated_at: DateTime<Utc>,
    source: &'a AuditSource,
    #[serde(flatten)]
    report: &'a AuditReport,
    insights: AuditInsights,
}

pub(crate) fn render_report(
    report: &AuditReport,
    source: &AuditSource,
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => {
            println!("{}", render_json(report, source, Utc::now())?);
        }
        OutputFormat::Text => print!("{}", render_text(report, source)),
    }
    Ok(())
}

fn render_json(
    report: &AuditReport,
    source: &AuditSource,
    generated_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let response = AuditResponse {
        generated_at,
        source,
        report,
        insights: report.insights(),
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

fn render_text(report: &AuditReport, source: &AuditSource) -> String {
    let insights = report.insights();
    let mut out = String::new();

    out.push_str("Gym audit\n");
    out.push_str(&format!(
        "Source: {} ({} answers)\n",
        source.describe(),
        report.answer_count
    ));
    out.push_str(&format!(
        "Global score: {}/100 ({})\n",
        report.scores.global_score,
        insights.rating.label()
    ));

    out.push_str("\nKey indicators\n");
    for code in KpiCode::ordered() {
        out.push_str(&format!("- {}: {:.2}\n", code.label(), report.kpis.get(code)));
    }

    out.push_str("\nPillar scores\n");
    for pillar in &report.scores.scores {
        out.push_str(&format!(
            "- {} ({:.0}%): {}/100\n",
            pillar.name,
            pillar.weight * 100.0,
            pillar.score
        ));
    }

    out.push_str("\nRecommendations\n");
    for rec in &report.recommendations {
        out.push_str(&format!(
            "- [{}] {} | impact {:.0} EUR | effort {} | confidence {}\n  {}\n",
            rec.priority,
            rec.title,
            rec.expected_impact_eur,
            rec.effort_level.as_str(),
            rec.confidence.as_str(),
            rec.description
        ));
    }

    let churn = &report.churn_risk;
    out.push_str(&format!(
        "\nChurn risk: {} ({:.0}/100)\n",
        churn.risk_level, churn.risk_score
    ));
    for factor in &churn.factors {
        out.push_str(&format!(
            "- {}: {:.0} pts ({})\n",
            factor.name, factor.score, factor.impact
        ));
    }
    for action in &churn.actions {
        out.push_str(&format!("> {action}\n"));
    }

    let health = &report.financial_health;
    out.push_str(&format!("\nFinancial health: {:.0}/100\n", health.score));
    for (name, section) in [
        ("Profitability", &health.profitability),
        ("Treasury", &health.treasury),
        ("Cost structure", &health.structure),
    ] {
        out.push_str(&format!("- {name}: {:.0} pts\n", section.score));
    }

    let pricing = &report.pricing;
    out.push_str(&format!(
        "\nPricing position: {} {}\n",
        pricing.position, pricing.position_label
    ));
    out.push_str(&format!(
        "- {:.0} EUR vs {:.0} EUR in the area ({:+.1}%), quality {:.0}/100\n",
        pricing.gym_price, pricing.area_price, pricing.gap_pct, pricing.quality_score
    ));
    out.push_str(&format!("> {}\n", pricing.recommendation));

    if !insights.observations.is_empty() {
        out.push_str("\nObservations\n");
        for line in &insights.observations {
            out.push_str(&format!("- {line}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn json_output_carries_timestamp_and_report() {
        let report = AuditReport::compute(&SampleScenario::Performant.answers());
        let generated_at = Utc
            .with_ymd_and_hms(2025, 3, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        let rendered = render_json(
            &report,
            &AuditSource::Sample(SampleScenario::Performant),
            generated_at,
        )
        .expect("json renders");
        let json: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");

        assert_eq!(json["generated_at"], "2025-03-01T09:30:00Z");
        assert_eq!(json["source"]["kind"], "sample");
        assert_eq!(json["source"]["name"], "performant");
        assert_eq!(json["scores"]["globalScore"], 89);
        assert_eq!(json["insights"]["rating"], "excellent");
        assert_eq!(json["pricing"]["position_label"], "Entrée de gamme");
    }

    #[test]
    fn text_output_lists_every_section() {
        let report = AuditReport::compute(&SampleScenario::Struggling.answers());
        let text = render_text(&report, &AuditSource::Export("audit.csv".to_string()));

        assert!(text.contains("Source: answer export audit.csv (18 answers)"));
        assert!(text.contains("Pillar scores"));
        assert!(text.contains("[P1] Réduire le churn"));
        assert!(text.contains("Churn risk: élevé"));
        assert!(text.contains("Financial health: "));
        assert!(text.contains("Pricing position: P3 Entrée de gamme"));
        assert!(text.contains("Observations"));
    }
}
