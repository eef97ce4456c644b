use super::super::answers::AnswerIndex;
use super::ratio_pct;
use serde::Serialize;

const REVENUE_BLOCK: &str = "produits_exploitation";
const CHARGES_BLOCK: &str = "charges_exploitation";

const MONTHLY_SUBSCRIPTIONS: &str = "ca_abonnements_mensuels";
const QUARTERLY_SUBSCRIPTIONS: &str = "ca_abonnements_trimestriels";
const HALF_YEARLY_SUBSCRIPTIONS: &str = "ca_abonnements_semestriels";
const ANNUAL_SUBSCRIPTIONS: &str = "ca_abonnements_annuels";

/// Ancillary revenue lines reported as monthly amounts.
const ANCILLARY_MONTHLY_LINES: &[&str] = &[
    "ca_cartes_10",
    "ca_cartes_20",
    "ca_seances_unitaires",
    "ca_frais_inscription",
    "ca_personal_training",
    "ca_coaching_nutrition",
    "ca_suivi_remote",
    "ca_cours_specialises",
    "ca_competitions_internes",
    "ca_competitions_externes",
    "ca_seminaires",
    "ca_team_building",
    "ca_merchandising_vetements",
    "ca_merchandising_accessoires",
    "ca_merchandising",
    "ca_complements",
    "ca_boissons_snacks",
    "ca_sous_location",
    "ca_partenariats",
    "ca_sponsoring",
];

const RENT_MONTHLY: &str = "loyer_mensuel_ht";
const SERVICE_CHARGES_MONTHLY: &str = "charges_locatives_mensuelles";
const PROPERTY_TAX: &str = "taxe_fonciere";
const MARKETING_ANNUAL: &str = "marketing_total";

const ENERGY_ANNUAL_LINES: &[&str] = &["electricite_annuel", "eau_annuel", "gaz_chauffage_annuel"];

const PAYROLL_ANNUAL_LINES: &[&str] = &[
    "salaires_bruts_gerant",
    "salaires_bruts_coachs",
    "salaires_bruts_administratif",
    "charges_sociales_patronales",
    "cotisations_sociales_tns",
    "charges_freelance",
    "participation_transport",
    "tickets_restaurant",
    "formation_personnel",
    "autres_charges_personnel",
];

/// Revenue normalized to a twelve-month basis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RevenueBreakdown {
    pub monthly_subscriptions: f64,
    pub quarterly_subscriptions: f64,
    pub half_yearly_subscriptions: f64,
    pub annual_subscriptions: f64,
    pub ancillary_monthly: f64,
    pub recurring_12m: f64,
    pub non_recurring_12m: f64,
    pub total_12m: f64,
    pub recurring_share_pct: f64,
}

/// Operating charges normalized to a twelve-month basis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChargeBreakdown {
    pub rent_monthly: f64,
    pub service_charges_monthly: f64,
    pub property_tax: f64,
    pub rent_annual: f64,
    pub energy_annual: f64,
    pub marketing_annual: f64,
    pub payroll_annual: f64,
    pub total_annual: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperatingResult {
    pub ebitda: f64,
    pub ebitda_margin_pct: f64,
}

/// Charge lines expressed as a percentage of annual revenue.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinanceRatios {
    pub rent_pct: f64,
    pub payroll_pct: f64,
    pub marketing_pct: f64,
    pub charges_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinanceData {
    pub revenue: RevenueBreakdown,
    pub charges: ChargeBreakdown,
    pub result: OperatingResult,
    pub ratios: FinanceRatios,
}

pub fn extract_finance_data(answers: &AnswerIndex<'_>) -> FinanceData {
    let revenue = extract_revenue(answers);
    let charges = extract_charges(answers);

    // Negative margins are meaningful and must not be floored.
    let ebitda = revenue.total_12m - charges.total_annual;
    let result = OperatingResult {
        ebitda,
        ebitda_margin_pct: ratio_pct(ebitda, revenue.total_12m),
    };

    let ratios = FinanceRatios {
        rent_pct: ratio_pct(charges.rent_annual, revenue.total_12m),
        payroll_pct: ratio_pct(charges.payroll_annual, revenue.total_12m),
        marketing_pct: ratio_pct(charges.marketing_annual, revenue.total_12m),
        charges_pct: ratio_pct(charges.total_annual, revenue.total_12m),
    };

    FinanceData {
        revenue,
        charges,
        result,
        ratios,
    }
}

fn extract_revenue(answers: &AnswerIndex<'_>) -> RevenueBreakdown {
    let monthly_subscriptions = answers.value_or(REVENUE_BLOCK, MONTHLY_SUBSCRIPTIONS, 0.0);
    let quarterly_subscriptions = answers.value_or(REVENUE_BLOCK, QUARTERLY_SUBSCRIPTIONS, 0.0);
    let half_yearly_subscriptions = answers.value_or(REVENUE_BLOCK, HALF_YEARLY_SUBSCRIPTIONS, 0.0);
    let annual_subscriptions = answers.value_or(REVENUE_BLOCK, ANNUAL_SUBSCRIPTIONS, 0.0);
    let ancillary_monthly = answers.sum(REVENUE_BLOCK, ANCILLARY_MONTHLY_LINES);

    let recurring_12m = monthly_subscriptions * 12.0
        + quarterly_subscriptions * 4.0
        + half_yearly_subscriptions * 2.0
        + annual_subscriptions;
    let non_recurring_12m = ancillary_monthly * 12.0;
    let total_12m = recurring_12m + non_recurring_12m;

    RevenueBreakdown {
        monthly_subscriptions,
        quarterly_subscriptions,
        half_yearly_subscriptions,
        annual_subscriptions,
        ancillary_monthly,
        recurring_12m,
        non_recurring_12m,
        total_12m,
        recurring_share_pct: ratio_pct(recurring_12m, total_12m),
    }
}

fn extract_charges(answers: &AnswerIndex<'_>) -> ChargeBreakdown {
    let rent_monthly = answers.value_or(CHARGES_BLOCK, RENT_MONTHLY, 0.0);
    let service_charges_monthly = answers.value_or(CHARGES_BLOCK, SERVICE_CHARGES_MONTHLY, 0.0);
    let property_tax = answers.value_or(CHARGES_BLOCK, PROPERTY_TAX, 0.0);
    let rent_annual = (rent_monthly + service_charges_monthly) * 12.0 + property_tax;

    let energy_annual = answers.sum(CHARGES_BLOCK, ENERGY_ANNUAL_LINES);
    let marketing_annual = answers.value_or(CHARGES_BLOCK, MARKETING_ANNUAL, 0.0);
    let payroll_annual = answers.sum(CHARGES_BLOCK, PAYROLL_ANNUAL_LINES);

    ChargeBreakdown {
        rent_monthly,
        service_charges_monthly,
        property_tax,
        rent_annual,
        energy_annual,
        marketing_annual,
        payroll_annual,
        total_annual: rent_annual + energy_annual + marketing_annual + payroll_annual,
    }
}
