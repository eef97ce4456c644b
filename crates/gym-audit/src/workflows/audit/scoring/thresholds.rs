//! Benchmark brackets and weights for the three pillars. All values are
//! fixed configuration calibrated on the functional-fitness gym sector.

use super::brackets::{Grading, MaxBracket, MinBracket, RangeBracket};

/// EBITDA margin (%), higher is better.
pub const MARGE_EBITDA: Grading = Grading::min(
    &[
        MinBracket::new(25.0, 100.0),
        MinBracket::new(20.0, 90.0),
        MinBracket::new(15.0, 75.0),
        MinBracket::new(10.0, 60.0),
        MinBracket::new(5.0, 40.0),
        MinBracket::new(0.0, 25.0),
    ],
    10.0,
);

/// Rent to revenue (%), lower is better.
pub const LOYER_RATIO: Grading = Grading::max(
    &[
        MaxBracket::new(12.0, 100.0),
        MaxBracket::new(15.0, 85.0),
        MaxBracket::new(18.0, 70.0),
        MaxBracket::new(22.0, 50.0),
        MaxBracket::new(25.0, 30.0),
    ],
    10.0,
);

/// Payroll to revenue (%), best inside the 30-40 band, edges included.
/// Understaffed gyms (below 20 %) keep an average grade; only overweight
/// payroll drops further.
pub const MASSE_SALARIALE: Grading = Grading::band(
    &[
        RangeBracket::new(30.0, 40.0, 100.0),
        RangeBracket::new(25.0, 45.0, 85.0),
        RangeBracket::new(20.0, 50.0, 70.0),
        RangeBracket::new(f64::NEG_INFINITY, 55.0, 50.0),
    ],
    25.0,
);

/// Revenue per m² (EUR), higher is better.
pub const CA_PAR_M2: Grading = Grading::min(
    &[
        MinBracket::new(400.0, 100.0),
        MinBracket::new(300.0, 85.0),
        MinBracket::new(250.0, 75.0),
        MinBracket::new(200.0, 60.0),
        MinBracket::new(150.0, 40.0),
    ],
    25.0,
);

/// Recurring share of revenue (%), higher is better.
pub const RECURRENCE: Grading = Grading::min(
    &[
        MinBracket::new(90.0, 100.0),
        MinBracket::new(85.0, 90.0),
        MinBracket::new(80.0, 80.0),
        MinBracket::new(70.0, 65.0),
        MinBracket::new(60.0, 45.0),
    ],
    25.0,
);

/// Average revenue per member per month (EUR), higher is better.
pub const ARPM: Grading = Grading::min(
    &[
        MinBracket::new(110.0, 100.0),
        MinBracket::new(95.0, 90.0),
        MinBracket::new(85.0, 80.0),
        MinBracket::new(75.0, 65.0),
        MinBracket::new(65.0, 50.0),
    ],
    30.0,
);

/// Monthly churn (%), lower is better.
pub const CHURN: Grading = Grading::max(
    &[
        MaxBracket::new(2.0, 100.0),
        MaxBracket::new(3.0, 90.0),
        MaxBracket::new(5.0, 75.0),
        MaxBracket::new(7.0, 55.0),
        MaxBracket::new(10.0, 35.0),
    ],
    15.0,
);

/// Average class occupancy (%), higher is better.
pub const OCCUPATION: Grading = Grading::min(
    &[
        MinBracket::new(85.0, 100.0),
        MinBracket::new(75.0, 90.0),
        MinBracket::new(70.0, 80.0),
        MinBracket::new(65.0, 70.0),
        MinBracket::new(55.0, 55.0),
        MinBracket::new(45.0, 40.0),
    ],
    25.0,
);

/// Trial to member conversion (%), higher is better.
pub const CONVERSION: Grading = Grading::min(
    &[
        MinBracket::new(60.0, 100.0),
        MinBracket::new(50.0, 90.0),
        MinBracket::new(40.0, 75.0),
        MinBracket::new(30.0, 55.0),
        MinBracket::new(20.0, 35.0),
    ],
    20.0,
);

pub const FINANCE_WEIGHT: f64 = 0.30;
pub const CLIENTELE_WEIGHT: f64 = 0.35;
pub const EXPLOITATION_WEIGHT: f64 = 0.35;

pub const FINANCE_PROFITABILITY_WEIGHT: f64 = 0.40;
pub const FINANCE_RENT_WEIGHT: f64 = 0.20;
pub const FINANCE_PAYROLL_WEIGHT: f64 = 0.20;
pub const FINANCE_REVENUE_PER_M2_WEIGHT: f64 = 0.20;

pub const CLIENTELE_RECURRENCE_WEIGHT: f64 = 0.40;
pub const CLIENTELE_ARPM_WEIGHT: f64 = 0.35;
pub const CLIENTELE_CHURN_WEIGHT: f64 = 0.25;

pub const EXPLOITATION_OCCUPANCY_WEIGHT: f64 = 0.60;
pub const EXPLOITATION_CONVERSION_WEIGHT: f64 = 0.40;

/// Every grading table, for table-level invariant checks.
pub const ALL_GRADINGS: [(&str, Grading); 9] = [
    ("marge_ebitda", MARGE_EBITDA),
    ("loyer_ratio", LOYER_RATIO),
    ("masse_salariale_ratio", MASSE_SALARIALE),
    ("ca_par_m2", CA_PAR_M2),
    ("pourcent_recurrent", RECURRENCE),
    ("arpm", ARPM),
    ("churn_mensuel", CHURN),
    ("occupation_moyenne", OCCUPATION),
    ("conversion_essai", CONVERSION),
];
