use super::domain::{Category, Confidence, EffortLevel, Priority};
use crate::workflows::audit::answers::AnswerIndex;
use crate::workflows::audit::extract::{
    ACQUISITION_BLOCK, ACTIVE_MEMBERS, MEMBERS_BLOCK, MONTHLY_TRIALS,
};
use crate::workflows::audit::kpi::{KpiCode, KpiMap};

/// Inputs every rule may read: the KPI map and the raw answers, the latter
/// only to check whether a question was answered at all.
pub struct RuleContext<'a> {
    pub kpis: &'a KpiMap,
    pub answers: &'a AnswerIndex<'a>,
}

impl RuleContext<'_> {
    fn kpi(&self, code: KpiCode) -> f64 {
        self.kpis.get(code)
    }
}

/// One declarative recommendation rule.
pub struct Rule {
    pub rec_code: &'static str,
    pub title: &'static str,
    pub priority: Priority,
    pub effort_level: EffortLevel,
    pub confidence: Confidence,
    pub category: Category,
    pub triggers: fn(&RuleContext<'_>) -> bool,
    pub impact: fn(&RuleContext<'_>) -> f64,
    pub describe: fn(&RuleContext<'_>) -> String,
}

pub const MAINTAIN_PERFORMANCE: &str = "maintain_performance";
pub const MAINTAIN_PERFORMANCE_TITLE: &str = "Maintenir les performances";
pub const MAINTAIN_PERFORMANCE_DESCRIPTION: &str =
    "Vos indicateurs sont dans les cibles. Continuez vos efforts et suivez régulièrement vos KPIs.";

pub const STANDARD_RULES: &[Rule] = &[
    Rule {
        rec_code: "improve_margins",
        title: "Améliorer la rentabilité",
        priority: Priority::P1,
        effort_level: EffortLevel::Moyen,
        confidence: Confidence::Fort,
        category: Category::Finance,
        triggers: |ctx| ctx.kpi(KpiCode::MargeEbitda) < 15.0,
        impact: |ctx| ctx.kpi(KpiCode::CaTotal12m) * 0.05,
        describe: |ctx| {
            format!(
                "Votre marge EBITDA est de {:.1}%, en dessous de la cible de 15-20%. \
                 Analysez vos charges fixes et optimisez votre structure de coûts.",
                ctx.kpi(KpiCode::MargeEbitda)
            )
        },
    },
    Rule {
        rec_code: "optimize_rent",
        title: "Ratio loyer trop élevé",
        priority: Priority::P1,
        effort_level: EffortLevel::Difficile,
        confidence: Confidence::Moyen,
        category: Category::Finance,
        triggers: |ctx| ctx.kpi(KpiCode::LoyerRatio) > 18.0,
        impact: |ctx| (ctx.kpi(KpiCode::LoyerRatio) - 15.0) * ctx.kpi(KpiCode::CaTotal12m) / 100.0,
        describe: |ctx| {
            format!(
                "Votre loyer représente {:.1}% du CA (cible: < 15%). \
                 Envisagez une renégociation ou sous-location d'espaces non utilisés.",
                ctx.kpi(KpiCode::LoyerRatio)
            )
        },
    },
    Rule {
        rec_code: "increase_arpm",
        title: "Augmenter l'ARPM",
        priority: Priority::P1,
        effort_level: EffortLevel::Moyen,
        confidence: Confidence::Fort,
        category: Category::Commercial,
        triggers: |ctx| {
            ctx.answers.is_answered(MEMBERS_BLOCK, &[ACTIVE_MEMBERS])
                && ctx.kpi(KpiCode::Arpm) < 80.0
        },
        impact: |ctx| {
            (85.0 - ctx.kpi(KpiCode::Arpm)) * ctx.kpi(KpiCode::NbMembresActifs) * 12.0 * 0.7
        },
        describe: |ctx| {
            format!(
                "Votre ARPM est de {:.0}€ (cible: 85-100€). Travaillez votre stratégie tarifaire \
                 et vendez plus de services additionnels (PT, nutrition).",
                ctx.kpi(KpiCode::Arpm)
            )
        },
    },
    Rule {
        rec_code: "reduce_churn",
        title: "Réduire le churn",
        priority: Priority::P1,
        effort_level: EffortLevel::Moyen,
        confidence: Confidence::Moyen,
        category: Category::Commercial,
        triggers: |ctx| ctx.kpi(KpiCode::ChurnMensuel) > 5.0,
        impact: |ctx| {
            (ctx.kpi(KpiCode::ChurnMensuel) - 3.0)
                * ctx.kpi(KpiCode::NbMembresActifs)
                * ctx.kpi(KpiCode::Arpm)
                * 6.0
        },
        describe: |ctx| {
            format!(
                "Votre taux de churn est de {:.1}% (cible: < 3%). Mettez en place des actions de \
                 rétention: onboarding, suivi personnalisé, événements communautaires.",
                ctx.kpi(KpiCode::ChurnMensuel)
            )
        },
    },
    Rule {
        rec_code: "improve_occupation",
        title: "Optimiser le taux d'occupation",
        priority: Priority::P2,
        effort_level: EffortLevel::Facile,
        confidence: Confidence::Moyen,
        category: Category::Operations,
        triggers: |ctx| ctx.kpi(KpiCode::OccupationMoyenne) < 65.0,
        impact: |_| 0.0,
        describe: |ctx| {
            format!(
                "Votre taux d'occupation est de {:.0}% (cible: 70-80%). Analysez votre planning \
                 pour identifier les créneaux sous-utilisés et ajustez.",
                ctx.kpi(KpiCode::OccupationMoyenne)
            )
        },
    },
    Rule {
        rec_code: "improve_conversion",
        title: "Améliorer la conversion essais",
        priority: Priority::P2,
        effort_level: EffortLevel::Moyen,
        confidence: Confidence::Moyen,
        category: Category::Commercial,
        triggers: |ctx| {
            ctx.answers.is_answered(ACQUISITION_BLOCK, MONTHLY_TRIALS)
                && ctx.kpi(KpiCode::ConversionEssai) < 40.0
        },
        impact: |ctx| {
            ctx.kpi(KpiCode::EssaisMois)
                * 12.0
                * (50.0 - ctx.kpi(KpiCode::ConversionEssai))
                / 100.0
                * ctx.kpi(KpiCode::Arpm)
                * 12.0
                * 0.5
        },
        describe: |ctx| {
            format!(
                "Votre taux de conversion est de {:.0}% (cible: > 50%). Optimisez votre processus \
                 d'essai et formation du personnel commercial.",
                ctx.kpi(KpiCode::ConversionEssai)
            )
        },
    },
    Rule {
        rec_code: "increase_recurring",
        title: "Augmenter le CA récurrent",
        priority: Priority::P2,
        effort_level: EffortLevel::Moyen,
        confidence: Confidence::Moyen,
        category: Category::Commercial,
        triggers: |ctx| ctx.kpi(KpiCode::PourcentRecurrent) < 80.0,
        impact: |_| 0.0,
        describe: |ctx| {
            format!(
                "Votre CA récurrent est de {:.0}% (cible: > 85%). \
                 Privilégiez les abonnements mensuels aux cartes.",
                ctx.kpi(KpiCode::PourcentRecurrent)
            )
        },
    },
];
