use super::super::answers::AnswerIndex;
use super::finance::FinanceData;
use super::{ratio, ratio_pct};
use serde::Serialize;

const INFRASTRUCTURE_BLOCK: &str = "infrastructure_detaillee";
const PLANNING_BLOCK: &str = "structure_planning";
const OCCUPANCY_BLOCK: &str = "capacite_occupation";
pub(crate) const ACQUISITION_BLOCK: &str = "acquisition_conversion";

const SURFACE_TOTAL: &str = "surface_totale";
const SURFACE_TRAINING: &str = "surface_crossfit";
const WEEKLY_SLOTS: &[&str] = &["creneaux_semaine", "nb_creneaux_semaine"];
const CAPACITY_PER_SLOT: &str = "capacite_par_creneau";
const PARTICIPANTS_PER_SLOT: &str = "participants_moyens_creneau";
const CLASS_CAPACITY: &str = "capacite_max_cours";
const CLASS_PARTICIPANTS: &str = "participants_moyen_cours";
const REPORTED_OCCUPANCY: &str = "taux_occupation_global_pct";

pub(crate) const MONTHLY_TRIALS: &[&str] = &["essais_gratuits_mois", "nb_essais_mois_actuel"];
const MONTHLY_CONVERSIONS: &[&str] = &[
    "conversions_essai_abonne_mois",
    "nb_conversions_mois_actuel",
];

/// Surface assumed when none is reported, so revenue per m² stays defined.
pub const DEFAULT_SURFACE_M2: f64 = 1.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperationsData {
    pub surface_total_m2: f64,
    pub surface_training_m2: f64,
    pub revenue_per_m2: f64,
    pub weekly_slots: f64,
    pub capacity_per_slot: f64,
    pub participants_per_slot: f64,
    pub class_capacity: f64,
    pub class_participants: f64,
    pub occupancy_pct: f64,
    pub monthly_trials: f64,
    pub monthly_conversions: f64,
    pub trial_conversion_pct: f64,
}

pub fn extract_operations_data(answers: &AnswerIndex<'_>, finance: &FinanceData) -> OperationsData {
    let surface_total_m2 =
        answers.value_or(INFRASTRUCTURE_BLOCK, SURFACE_TOTAL, DEFAULT_SURFACE_M2);
    let surface_training_m2 = answers.value_or(INFRASTRUCTURE_BLOCK, SURFACE_TRAINING, 0.0);
    let revenue_per_m2 = if finance.revenue.total_12m > 0.0 {
        ratio(finance.revenue.total_12m, surface_total_m2)
    } else {
        0.0
    };

    let weekly_slots = answers.first_non_zero(PLANNING_BLOCK, WEEKLY_SLOTS);
    let capacity_per_slot = answers.value_or(PLANNING_BLOCK, CAPACITY_PER_SLOT, 0.0);
    let participants_per_slot = answers.value_or(PLANNING_BLOCK, PARTICIPANTS_PER_SLOT, 0.0);

    let class_capacity = answers.value_or(OCCUPANCY_BLOCK, CLASS_CAPACITY, 0.0);
    let class_participants = answers.value_or(OCCUPANCY_BLOCK, CLASS_PARTICIPANTS, 0.0);

    // A directly reported occupancy rate takes precedence over the class ratio.
    let reported_occupancy = answers.value_or(OCCUPANCY_BLOCK, REPORTED_OCCUPANCY, 0.0);
    let occupancy_pct = if reported_occupancy != 0.0 {
        reported_occupancy
    } else {
        ratio_pct(class_participants, class_capacity)
    };

    let monthly_trials = answers.first_non_zero(ACQUISITION_BLOCK, MONTHLY_TRIALS);
    let monthly_conversions = answers.first_non_zero(ACQUISITION_BLOCK, MONTHLY_CONVERSIONS);

    OperationsData {
        surface_total_m2,
        surface_training_m2,
        revenue_per_m2,
        weekly_slots,
        capacity_per_slot,
        participants_per_slot,
        class_capacity,
        class_participants,
        occupancy_pct,
        monthly_trials,
        monthly_conversions,
        trial_conversion_pct: ratio_pct(monthly_conversions, monthly_trials),
    }
}
