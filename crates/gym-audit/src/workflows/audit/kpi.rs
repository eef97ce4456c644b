use super::answers::Answer;
use super::extract::{extract_all, finite_or_zero, AuditData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable vocabulary of KPI codes shared by the scorer, the recommendation
/// rules and the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiCode {
    #[serde(rename = "ca_total_12m")]
    CaTotal12m,
    #[serde(rename = "ca_recurrent_12m")]
    CaRecurrent12m,
    PourcentRecurrent,
    Arpm,
    LoyerRatio,
    CaParM2,
    MasseSalarialeRatio,
    MarketingRatio,
    ChargesRatio,
    EbitdaEstime,
    MargeEbitda,
    ChurnMensuel,
    ConversionEssai,
    OccupationMoyenne,
    LoyerNetAnnuel,
    LtvEstime,
    NbMembresActifs,
    EssaisMois,
}

impl KpiCode {
    pub const fn ordered() -> [Self; 18] {
        [
            Self::CaTotal12m,
            Self::CaRecurrent12m,
            Self::PourcentRecurrent,
            Self::Arpm,
            Self::LoyerRatio,
            Self::CaParM2,
            Self::MasseSalarialeRatio,
            Self::MarketingRatio,
            Self::ChargesRatio,
            Self::EbitdaEstime,
            Self::MargeEbitda,
            Self::ChurnMensuel,
            Self::ConversionEssai,
            Self::OccupationMoyenne,
            Self::LoyerNetAnnuel,
            Self::LtvEstime,
            Self::NbMembresActifs,
            Self::EssaisMois,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CaTotal12m => "ca_total_12m",
            Self::CaRecurrent12m => "ca_recurrent_12m",
            Self::PourcentRecurrent => "pourcent_recurrent",
            Self::Arpm => "arpm",
            Self::LoyerRatio => "loyer_ratio",
            Self::CaParM2 => "ca_par_m2",
            Self::MasseSalarialeRatio => "masse_salariale_ratio",
            Self::MarketingRatio => "marketing_ratio",
            Self::ChargesRatio => "charges_ratio",
            Self::EbitdaEstime => "ebitda_estime",
            Self::MargeEbitda => "marge_ebitda",
            Self::ChurnMensuel => "churn_mensuel",
            Self::ConversionEssai => "conversion_essai",
            Self::OccupationMoyenne => "occupation_moyenne",
            Self::LoyerNetAnnuel => "loyer_net_annuel",
            Self::LtvEstime => "ltv_estime",
            Self::NbMembresActifs => "nb_membres_actifs",
            Self::EssaisMois => "essais_mois",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CaTotal12m => "Annual revenue (EUR)",
            Self::CaRecurrent12m => "Recurring annual revenue (EUR)",
            Self::PourcentRecurrent => "Recurring revenue share (%)",
            Self::Arpm => "Revenue per member per month (EUR)",
            Self::LoyerRatio => "Rent to revenue (%)",
            Self::CaParM2 => "Revenue per m² (EUR)",
            Self::MasseSalarialeRatio => "Payroll to revenue (%)",
            Self::MarketingRatio => "Marketing to revenue (%)",
            Self::ChargesRatio => "Charges to revenue (%)",
            Self::EbitdaEstime => "Estimated EBITDA (EUR)",
            Self::MargeEbitda => "EBITDA margin (%)",
            Self::ChurnMensuel => "Monthly churn (%)",
            Self::ConversionEssai => "Trial conversion (%)",
            Self::OccupationMoyenne => "Average class occupancy (%)",
            Self::LoyerNetAnnuel => "Annual rent incl. charges (EUR)",
            Self::LtvEstime => "Estimated member lifetime value (EUR)",
            Self::NbMembresActifs => "Active members",
            Self::EssaisMois => "Trials per month",
        }
    }
}

impl fmt::Display for KpiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat KPI code → value mapping. Values are always finite; a code that was
/// never set reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KpiMap(BTreeMap<KpiCode, f64>);

impl KpiMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: KpiCode) -> f64 {
        self.0
            .get(&code)
            .copied()
            .map(finite_or_zero)
            .unwrap_or(0.0)
    }

    pub fn contains(&self, code: KpiCode) -> bool {
        self.0.contains_key(&code)
    }

    pub fn insert(&mut self, code: KpiCode, value: f64) {
        self.0.insert(code, finite_or_zero(value));
    }

    pub fn with(mut self, code: KpiCode, value: f64) -> Self {
        self.insert(code, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (KpiCode, f64)> + '_ {
        self.0.iter().map(|(code, value)| (*code, *value))
    }
}

impl FromIterator<(KpiCode, f64)> for KpiMap {
    fn from_iter<I: IntoIterator<Item = (KpiCode, f64)>>(iter: I) -> Self {
        let mut map = KpiMap::new();
        for (code, value) in iter {
            map.insert(code, value);
        }
        map
    }
}

/// Flattens the extracted aggregates into the KPI map. No arithmetic happens
/// here beyond picking fields.
pub fn kpis_from_data(data: &AuditData) -> KpiMap {
    let finance = &data.finance;
    let members = &data.members;
    let operations = &data.operations;

    [
        (KpiCode::CaTotal12m, finance.revenue.total_12m),
        (KpiCode::CaRecurrent12m, finance.revenue.recurring_12m),
        (KpiCode::PourcentRecurrent, finance.revenue.recurring_share_pct),
        (KpiCode::Arpm, members.arpm),
        (KpiCode::LoyerRatio, finance.ratios.rent_pct),
        (KpiCode::CaParM2, operations.revenue_per_m2),
        (KpiCode::MasseSalarialeRatio, finance.ratios.payroll_pct),
        (KpiCode::MarketingRatio, finance.ratios.marketing_pct),
        (KpiCode::ChargesRatio, finance.ratios.charges_pct),
        (KpiCode::EbitdaEstime, finance.result.ebitda),
        (KpiCode::MargeEbitda, finance.result.ebitda_margin_pct),
        (KpiCode::ChurnMensuel, members.churn_monthly_pct),
        (KpiCode::ConversionEssai, operations.trial_conversion_pct),
        (KpiCode::OccupationMoyenne, operations.occupancy_pct),
        (KpiCode::LoyerNetAnnuel, finance.charges.rent_annual),
        (KpiCode::LtvEstime, members.ltv_estimate),
        (KpiCode::NbMembresActifs, members.active_members),
        (KpiCode::EssaisMois, operations.monthly_trials),
    ]
    .into_iter()
    .collect()
}

pub fn calculate_kpis(answers: &[Answer]) -> KpiMap {
    kpis_from_data(&extract_all(answers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_is_present_even_for_empty_answers() {
        let kpis = calculate_kpis(&[]);

        assert_eq!(kpis.len(), KpiCode::ordered().len());
        for code in KpiCode::ordered() {
            assert!(kpis.contains(code), "{code} missing");
            assert_eq!(kpis.get(code), 0.0, "{code} should default to zero");
        }
    }

    #[test]
    fn missing_codes_read_as_zero_and_non_finite_values_are_dropped() {
        let kpis = KpiMap::new()
            .with(KpiCode::Arpm, f64::NAN)
            .with(KpiCode::CaParM2, f64::INFINITY);

        assert_eq!(kpis.get(KpiCode::Arpm), 0.0);
        assert_eq!(kpis.get(KpiCode::CaParM2), 0.0);
        assert_eq!(kpis.get(KpiCode::ChurnMensuel), 0.0);
        assert!(!kpis.contains(KpiCode::ChurnMensuel));
    }

    #[test]
    fn serializes_with_stable_codes() {
        let kpis = KpiMap::new()
            .with(KpiCode::CaTotal12m, 178800.0)
            .with(KpiCode::CaParM2, 596.0);
        let json = serde_json::to_value(&kpis).expect("kpis serialize");

        assert_eq!(json["ca_total_12m"], 178800.0);
        assert_eq!(json["ca_par_m2"], 596.0);

        let parsed: KpiMap = serde_json::from_value(json).expect("kpis deserialize");
        assert_eq!(parsed, kpis);
    }

    #[test]
    fn as_str_matches_serde_names() {
        for code in KpiCode::ordered() {
            let json = serde_json::to_value(code).expect("code serializes");
            assert_eq!(json, code.as_str());
        }
    }
}
