//! Reference answer sets used by the `demo` command and the test suites.

use super::answers::Answer;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleScenario {
    /// Benchmark box: about 180k EUR revenue, 150 members, low churn.
    #[default]
    Performant,
    /// Box under pressure: high rent, thin margin, high churn.
    Struggling,
}

impl SampleScenario {
    pub const fn as_str(self) -> &'static str {
        match self {
            SampleScenario::Performant => "performant",
            SampleScenario::Struggling => "struggling",
        }
    }

    pub fn answers(self) -> Vec<Answer> {
        match self {
            SampleScenario::Performant => performant_gym(),
            SampleScenario::Struggling => struggling_gym(),
        }
    }
}

impl fmt::Display for SampleScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn performant_gym() -> Vec<Answer> {
    answers(&[
        ("produits_exploitation", "ca_abonnements_mensuels", 12000.0),
        ("produits_exploitation", "ca_abonnements_trimestriels", 1500.0),
        ("produits_exploitation", "ca_abonnements_annuels", 1200.0),
        ("produits_exploitation", "ca_cartes_10", 800.0),
        ("produits_exploitation", "ca_personal_training", 1000.0),
        ("produits_exploitation", "ca_merchandising", 500.0),
        ("charges_exploitation", "loyer_mensuel_ht", 2000.0),
        ("charges_exploitation", "electricite_annuel", 3600.0),
        ("charges_exploitation", "salaires_bruts_coachs", 50000.0),
        ("charges_exploitation", "charges_sociales_patronales", 20000.0),
        ("charges_exploitation", "marketing_total", 3000.0),
        ("structure_base", "nb_membres_actifs_total", 150.0),
        ("structure_base", "nb_membres_illimite", 100.0),
        ("tarification_detaillee", "prix_illimite_sans_engagement", 95.0),
        ("infrastructure_detaillee", "surface_totale", 300.0),
        ("infrastructure_detaillee", "surface_crossfit", 250.0),
        ("capacite_occupation", "capacite_max_cours", 16.0),
        ("capacite_occupation", "participants_moyen_cours", 12.0),
        ("structure_planning", "nb_creneaux_semaine", 40.0),
        ("acquisition_conversion", "nb_essais_mois_actuel", 25.0),
        ("acquisition_conversion", "nb_conversions_mois_actuel", 12.0),
        ("retention_churn", "nb_resiliations_mois", 4.0),
        ("retention_churn", "anciennes_moyens_mois", 24.0),
    ])
}

pub fn struggling_gym() -> Vec<Answer> {
    answers(&[
        ("produits_exploitation", "ca_abonnements_mensuels", 6000.0),
        ("produits_exploitation", "ca_cartes_10", 500.0),
        ("produits_exploitation", "ca_personal_training", 300.0),
        ("charges_exploitation", "loyer_mensuel_ht", 2500.0),
        ("charges_exploitation", "electricite_annuel", 4200.0),
        ("charges_exploitation", "salaires_bruts_coachs", 35000.0),
        ("charges_exploitation", "charges_sociales_patronales", 14000.0),
        ("structure_base", "nb_membres_actifs_total", 80.0),
        ("structure_base", "nb_membres_illimite", 45.0),
        ("tarification_detaillee", "prix_illimite_sans_engagement", 75.0),
        ("infrastructure_detaillee", "surface_totale", 280.0),
        ("capacite_occupation", "capacite_max_cours", 16.0),
        ("capacite_occupation", "participants_moyen_cours", 7.0),
        ("structure_planning", "nb_creneaux_semaine", 35.0),
        ("acquisition_conversion", "nb_essais_mois_actuel", 20.0),
        ("acquisition_conversion", "nb_conversions_mois_actuel", 5.0),
        ("retention_churn", "nb_resiliations_mois", 6.0),
        ("retention_churn", "anciennes_moyens_mois", 14.0),
    ])
}

fn answers(rows: &[(&str, &str, f64)]) -> Vec<Answer> {
    rows.iter()
        .map(|(block, question, value)| Answer::new(block, question, *value))
        .collect()
}
