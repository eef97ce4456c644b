//! Financial health score out of 100: profitability (40 points), cash
//! position (30 points) and cost structure (30 points).
//!
//! Unlike the pillar grades, every bracket here yields points toward its
//! section ceiling, so the section scores add up to the total.

use super::answers::{Answer, AnswerIndex};
use super::extract::{extract_all_indexed, ratio, ratio_pct, FinanceData};
use super::scoring::{Grading, MaxBracket, MinBracket, RangeBracket};
use serde::Serialize;
use std::collections::BTreeMap;

const CHARGES_BLOCK: &str = "charges_exploitation";
const TREASURY_BLOCK: &str = "resultat_tresorerie";

/// Charges booked below EBITDA: depreciation, provisions and financial costs.
const BELOW_EBITDA_LINES: &[&str] = &[
    "amortissements",
    "provisions",
    "frais_bancaires",
    "interets_emprunts",
];

const CASH: &str = "tresorerie_actuelle";
const RECEIVABLES: &str = "creances_clients";
const SUPPLIER_DEBT: &str = "dettes_fournisseurs";
const MONTHLY_LOAN_REPAYMENT: &str = "echeance_mensuelle_emprunts";
const LOAN_OUTSTANDING: &str = "emprunts_capital_restant";
const OTHER_DEBT_LINES: &[&str] = &["dettes_sociales_urssaf", "dettes_fiscales", "autres_dettes"];

/// Equity is not collected; it is estimated as this share of annual revenue.
const ESTIMATED_EQUITY_SHARE: f64 = 0.30;

const EBITDA_MARGIN: Grading = Grading::min(
    &[
        MinBracket::new(25.0, 25.0),
        MinBracket::new(20.0, 22.0),
        MinBracket::new(15.0, 18.0),
        MinBracket::new(10.0, 14.0),
        MinBracket::new(5.0, 10.0),
        MinBracket::new(0.0, 5.0),
    ],
    0.0,
);

const NET_MARGIN: Grading = Grading::min(
    &[
        MinBracket::new(15.0, 15.0),
        MinBracket::new(10.0, 12.0),
        MinBracket::new(5.0, 9.0),
        MinBracket::new(0.0, 5.0),
    ],
    0.0,
);

const CASH_DAYS: Grading = Grading::min(
    &[
        MinBracket::new(90.0, 20.0),
        MinBracket::new(60.0, 16.0),
        MinBracket::new(30.0, 12.0),
        MinBracket::new(15.0, 7.0),
    ],
    3.0,
);

const LIQUIDITY: Grading = Grading::min(
    &[
        MinBracket::new(2.0, 10.0),
        MinBracket::new(1.5, 8.0),
        MinBracket::new(1.0, 6.0),
        MinBracket::new(0.5, 3.0),
    ],
    0.0,
);

const RENT: Grading = Grading::max(
    &[
        MaxBracket::new(12.0, 10.0),
        MaxBracket::new(15.0, 8.0),
        MaxBracket::new(20.0, 6.0),
        MaxBracket::new(25.0, 3.0),
    ],
    0.0,
);

const PAYROLL: Grading = Grading::band(
    &[
        RangeBracket::new(30.0, 40.0, 10.0),
        RangeBracket::new(25.0, 45.0, 8.0),
        RangeBracket::new(20.0, 50.0, 5.0),
    ],
    2.0,
);

const DEBT: Grading = Grading::max(
    &[
        MaxBracket::new(30.0, 10.0),
        MaxBracket::new(50.0, 8.0),
        MaxBracket::new(80.0, 5.0),
        MaxBracket::new(100.0, 3.0),
    ],
    0.0,
);

/// Raw ratios behind the health score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthInputs {
    pub ebitda_margin_pct: f64,
    pub net_result: f64,
    pub net_margin_pct: f64,
    pub cash_days: f64,
    pub liquidity_ratio: f64,
    pub rent_pct: f64,
    pub payroll_pct: f64,
    pub total_debt: f64,
    pub debt_ratio_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthSection {
    pub score: f64,
    pub details: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialHealth {
    pub score: f64,
    pub profitability: HealthSection,
    pub treasury: HealthSection,
    pub structure: HealthSection,
    pub inputs: HealthInputs,
}

pub fn calculate_financial_health(answers: &[Answer]) -> FinancialHealth {
    let index = AnswerIndex::new(answers);
    let data = extract_all_indexed(&index);
    assess_financial_health(&index, &data.finance)
}

pub fn assess_financial_health(
    answers: &AnswerIndex<'_>,
    finance: &FinanceData,
) -> FinancialHealth {
    let inputs = health_inputs(answers, finance);

    let profitability = section(&[
        ("marge_ebitda_score", EBITDA_MARGIN.grade(inputs.ebitda_margin_pct)),
        ("marge_nette_score", NET_MARGIN.grade(inputs.net_margin_pct)),
    ]);
    let treasury = section(&[
        ("jours_tresorerie_score", CASH_DAYS.grade(inputs.cash_days)),
        ("ratio_liquidite_score", LIQUIDITY.grade(inputs.liquidity_ratio)),
    ]);
    let structure = section(&[
        ("ratio_loyer_score", RENT.grade(inputs.rent_pct)),
        ("ratio_ms_score", PAYROLL.grade(inputs.payroll_pct)),
        ("ratio_endettement_score", DEBT.grade(inputs.debt_ratio_pct)),
    ]);

    let total = profitability.score + treasury.score + structure.score;

    FinancialHealth {
        score: total.clamp(0.0, 100.0),
        profitability,
        treasury,
        structure,
        inputs,
    }
}

fn health_inputs(answers: &AnswerIndex<'_>, finance: &FinanceData) -> HealthInputs {
    let revenue = finance.revenue.total_12m;

    let below_ebitda = answers.sum(CHARGES_BLOCK, BELOW_EBITDA_LINES);
    let net_result = finance.result.ebitda - below_ebitda;
    let monthly_charges = (finance.charges.total_annual + below_ebitda) / 12.0;

    let cash = answers.value_or(TREASURY_BLOCK, CASH, 0.0);
    let receivables = answers.value_or(TREASURY_BLOCK, RECEIVABLES, 0.0);
    let supplier_debt = answers.value_or(TREASURY_BLOCK, SUPPLIER_DEBT, 0.0);
    let short_term_liabilities =
        supplier_debt + answers.value_or(TREASURY_BLOCK, MONTHLY_LOAN_REPAYMENT, 0.0) * 12.0;

    let total_debt = answers.value_or(TREASURY_BLOCK, LOAN_OUTSTANDING, 0.0)
        + supplier_debt
        + answers.sum(TREASURY_BLOCK, OTHER_DEBT_LINES);
    let estimated_equity = revenue.max(0.0) * ESTIMATED_EQUITY_SHARE;

    HealthInputs {
        ebitda_margin_pct: finance.result.ebitda_margin_pct,
        net_result,
        net_margin_pct: ratio_pct(net_result, revenue),
        cash_days: ratio(cash, monthly_charges) * 30.0,
        liquidity_ratio: ratio(cash + receivables, short_term_liabilities),
        rent_pct: finance.ratios.rent_pct,
        payroll_pct: finance.ratios.payroll_pct,
        total_debt,
        debt_ratio_pct: ratio_pct(total_debt, estimated_equity),
    }
}

fn section(grades: &[(&str, f64)]) -> HealthSection {
    HealthSection {
        score: grades.iter().map(|(_, grade)| grade).sum(),
        details: grades
            .iter()
            .map(|(key, grade)| (key.to_string(), *grade))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::audit::samples::performant_gym;

    fn treasury(question: &str, value: f64) -> Answer {
        Answer::new(TREASURY_BLOCK, question, value)
    }

    #[test]
    fn empty_answers_score_only_the_floor_grades() {
        let health = calculate_financial_health(&[]);

        // margins at 0 % (5 + 5), cash fallback 3, rent 10, payroll fallback 2, debt 10
        assert_eq!(health.profitability.score, 10.0);
        assert_eq!(health.treasury.score, 3.0);
        assert_eq!(health.structure.score, 22.0);
        assert_eq!(health.score, 35.0);
    }

    #[test]
    fn sections_add_up_to_the_total() {
        let health = calculate_financial_health(&performant_gym());
        let sections = health.profitability.score + health.treasury.score + health.structure.score;

        assert_eq!(health.score, sections);
        assert_eq!(health.profitability.details["marge_ebitda_score"], 25.0);
        assert_eq!(health.structure.details["ratio_loyer_score"], 8.0);
        assert!(health.score <= 100.0);
    }

    #[test]
    fn cash_and_debt_feed_treasury_and_structure() {
        let mut answers = performant_gym();
        answers.extend([
            treasury(CASH, 12_000.0),
            treasury(RECEIVABLES, 2_000.0),
            treasury(SUPPLIER_DEBT, 3_000.0),
            treasury(MONTHLY_LOAN_REPAYMENT, 1_000.0),
            treasury(LOAN_OUTSTANDING, 20_000.0),
            treasury("dettes_fiscales", 1_000.0),
        ]);
        let health = calculate_financial_health(&answers);

        assert_eq!(health.inputs.total_debt, 24_000.0);
        assert!((health.inputs.liquidity_ratio - 14_000.0 / 15_000.0).abs() < 1e-9);
        assert_eq!(health.treasury.details["ratio_liquidite_score"], 3.0);
        // 12k of cash against 8.4k of monthly charges
        assert_eq!(health.treasury.details["jours_tresorerie_score"], 12.0);
        // 24k of debt against 30 % of 178.8k revenue
        assert_eq!(health.structure.details["ratio_endettement_score"], 8.0);
    }

    #[test]
    fn below_ebitda_charges_lower_the_net_margin() {
        let answers = vec![
            Answer::new("produits_exploitation", "ca_abonnements_mensuels", 10_000.0),
            Answer::new(CHARGES_BLOCK, "salaires_bruts_coachs", 42_000.0),
            Answer::new(CHARGES_BLOCK, "amortissements", 12_000.0),
            Answer::new(CHARGES_BLOCK, "interets_emprunts", 6_000.0),
        ];
        let health = calculate_financial_health(&answers);

        assert!((health.inputs.ebitda_margin_pct - 65.0).abs() < 1e-9);
        assert_eq!(health.inputs.net_result, 60_000.0);
        assert_eq!(health.inputs.net_margin_pct, 50.0);
        assert_eq!(health.profitability.score, 40.0);
    }

    #[test]
    fn payroll_points_include_band_edges() {
        assert_eq!(PAYROLL.grade(40.0), 10.0);
        assert_eq!(PAYROLL.grade(45.0), 8.0);
        assert_eq!(PAYROLL.grade(50.0), 5.0);
        assert_eq!(PAYROLL.grade(12.0), 2.0);
    }

    #[test]
    fn tables_are_well_formed() {
        let tables = [
            EBITDA_MARGIN,
            NET_MARGIN,
            CASH_DAYS,
            LIQUIDITY,
            RENT,
            PAYROLL,
            DEBT,
        ];
        for grading in tables {
            assert!(grading.is_well_formed());
        }
    }
}
