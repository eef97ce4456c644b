//! Table-driven grading of one raw metric onto a 0-100 scale.
//!
//! Each table is an ordered list of brackets plus a fallback grade for values
//! that fall outside every bracket, so any real input receives a grade.

use serde::Serialize;

/// Higher is better: first bracket with `min <= value` wins.
/// Tables are sorted by descending `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinBracket {
    pub min: f64,
    pub score: f64,
}

impl MinBracket {
    pub const fn new(min: f64, score: f64) -> Self {
        Self { min, score }
    }
}

/// Lower is better: first bracket with `value <= max` wins.
/// Tables are sorted by ascending `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaxBracket {
    pub max: f64,
    pub score: f64,
}

impl MaxBracket {
    pub const fn new(max: f64, score: f64) -> Self {
        Self { max, score }
    }
}

/// Optimum band: first bracket with `min <= value < max` wins, or
/// `min <= value <= max` for closed bands. Tables list the narrowest band first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeBracket {
    pub min: f64,
    pub max: f64,
    pub score: f64,
}

impl RangeBracket {
    pub const fn new(min: f64, max: f64, score: f64) -> Self {
        Self { min, max, score }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Brackets {
    Min(&'static [MinBracket]),
    Max(&'static [MaxBracket]),
    Range(&'static [RangeBracket]),
    Band(&'static [RangeBracket]),
}

/// A bracket table and the grade used when no bracket matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grading {
    pub brackets: Brackets,
    pub fallback: f64,
}

impl Grading {
    pub const fn min(brackets: &'static [MinBracket], fallback: f64) -> Self {
        Self {
            brackets: Brackets::Min(brackets),
            fallback,
        }
    }

    pub const fn max(brackets: &'static [MaxBracket], fallback: f64) -> Self {
        Self {
            brackets: Brackets::Max(brackets),
            fallback,
        }
    }

    pub const fn range(brackets: &'static [RangeBracket], fallback: f64) -> Self {
        Self {
            brackets: Brackets::Range(brackets),
            fallback,
        }
    }

    /// Range table whose bands include both edges.
    pub const fn band(brackets: &'static [RangeBracket], fallback: f64) -> Self {
        Self {
            brackets: Brackets::Band(brackets),
            fallback,
        }
    }

    /// Grades `value`. Non-finite input falls through to the fallback.
    pub fn grade(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.fallback;
        }

        let matched = match self.brackets {
            Brackets::Min(table) => table
                .iter()
                .find(|bracket| bracket.min <= value)
                .map(|bracket| bracket.score),
            Brackets::Max(table) => table
                .iter()
                .find(|bracket| value <= bracket.max)
                .map(|bracket| bracket.score),
            Brackets::Range(table) => table
                .iter()
                .find(|bracket| bracket.min <= value && value < bracket.max)
                .map(|bracket| bracket.score),
            Brackets::Band(table) => table
                .iter()
                .find(|bracket| bracket.min <= value && value <= bracket.max)
                .map(|bracket| bracket.score),
        };

        matched.unwrap_or(self.fallback)
    }

    /// Every grade this table can produce, fallback included.
    pub fn grades(&self) -> Vec<f64> {
        let mut grades: Vec<f64> = match self.brackets {
            Brackets::Min(table) => table.iter().map(|bracket| bracket.score).collect(),
            Brackets::Max(table) => table.iter().map(|bracket| bracket.score).collect(),
            Brackets::Range(table) | Brackets::Band(table) => {
                table.iter().map(|bracket| bracket.score).collect()
            }
        };
        grades.push(self.fallback);
        grades
    }

    /// True when thresholds are sorted the way the lookup expects and grades
    /// never improve as the value moves away from the best bracket.
    pub fn is_well_formed(&self) -> bool {
        match self.brackets {
            Brackets::Min(table) => {
                table.windows(2).all(|pair| {
                    pair[0].min > pair[1].min && pair[0].score >= pair[1].score
                }) && table.last().map_or(true, |last| last.score >= self.fallback)
            }
            Brackets::Max(table) => {
                table.windows(2).all(|pair| {
                    pair[0].max < pair[1].max && pair[0].score >= pair[1].score
                }) && table.last().map_or(true, |last| last.score >= self.fallback)
            }
            Brackets::Range(table) | Brackets::Band(table) => {
                table.iter().all(|bracket| bracket.min < bracket.max)
                    && table.windows(2).all(|pair| {
                        pair[0].min >= pair[1].min
                            && pair[0].max <= pair[1].max
                            && pair[0].score >= pair[1].score
                    })
                    && table.last().map_or(true, |last| last.score >= self.fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIGHER: &[MinBracket] = &[
        MinBracket::new(20.0, 100.0),
        MinBracket::new(10.0, 60.0),
        MinBracket::new(0.0, 30.0),
    ];
    const LOWER: &[MaxBracket] = &[
        MaxBracket::new(2.0, 100.0),
        MaxBracket::new(5.0, 70.0),
    ];
    const BAND: &[RangeBracket] = &[
        RangeBracket::new(30.0, 40.0, 100.0),
        RangeBracket::new(20.0, 50.0, 70.0),
    ];

    #[test]
    fn min_brackets_are_inclusive_at_threshold() {
        let grading = Grading::min(HIGHER, 10.0);
        assert_eq!(grading.grade(20.0), 100.0);
        assert_eq!(grading.grade(19.999), 60.0);
        assert_eq!(grading.grade(10.0), 60.0);
        assert_eq!(grading.grade(0.0), 30.0);
        assert_eq!(grading.grade(-0.1), 10.0);
        assert_eq!(grading.grade(1e12), 100.0);
    }

    #[test]
    fn max_brackets_are_inclusive_at_threshold() {
        let grading = Grading::max(LOWER, 15.0);
        assert_eq!(grading.grade(-3.0), 100.0);
        assert_eq!(grading.grade(2.0), 100.0);
        assert_eq!(grading.grade(2.01), 70.0);
        assert_eq!(grading.grade(5.0), 70.0);
        assert_eq!(grading.grade(5.01), 15.0);
    }

    #[test]
    fn range_brackets_are_half_open() {
        let grading = Grading::range(BAND, 25.0);
        assert_eq!(grading.grade(30.0), 100.0);
        assert_eq!(grading.grade(39.99), 100.0);
        assert_eq!(grading.grade(40.0), 70.0);
        assert_eq!(grading.grade(20.0), 70.0);
        assert_eq!(grading.grade(50.0), 25.0);
        assert_eq!(grading.grade(19.0), 25.0);
    }

    #[test]
    fn closed_bands_include_both_edges() {
        let grading = Grading::band(BAND, 25.0);
        assert_eq!(grading.grade(30.0), 100.0);
        assert_eq!(grading.grade(40.0), 100.0);
        assert_eq!(grading.grade(40.01), 70.0);
        assert_eq!(grading.grade(50.0), 70.0);
        assert_eq!(grading.grade(50.01), 25.0);
        assert!(grading.is_well_formed());
    }

    #[test]
    fn non_finite_values_use_the_fallback() {
        let grading = Grading::min(HIGHER, 10.0);
        assert_eq!(grading.grade(f64::NAN), 10.0);
        assert_eq!(grading.grade(f64::INFINITY), 10.0);
    }

    #[test]
    fn empty_table_always_falls_back() {
        let grading = Grading::max(&[], 42.0);
        assert_eq!(grading.grade(0.0), 42.0);
        assert_eq!(grading.grades(), vec![42.0]);
        assert!(grading.is_well_formed());
    }

    #[test]
    fn detects_unsorted_tables() {
        const UNSORTED: &[MinBracket] = &[
            MinBracket::new(5.0, 50.0),
            MinBracket::new(10.0, 80.0),
        ];
        assert!(!Grading::min(UNSORTED, 0.0).is_well_formed());
        assert!(Grading::min(HIGHER, 10.0).is_well_formed());
        assert!(Grading::max(LOWER, 15.0).is_well_formed());
        assert!(Grading::range(BAND, 25.0).is_well_formed());
    }
}
