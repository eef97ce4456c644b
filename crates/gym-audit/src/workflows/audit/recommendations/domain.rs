use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed severity of a rule. Orders `P1` before `P2` before `P3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
}

impl Priority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortLevel {
    Facile,
    Moyen,
    Difficile,
}

impl EffortLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            EffortLevel::Facile => "facile",
            EffortLevel::Moyen => "moyen",
            EffortLevel::Difficile => "difficile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Faible,
    Moyen,
    Fort,
}

impl Confidence {
    pub const fn as_str(self) -> &'static str {
        match self {
            Confidence::Faible => "faible",
            Confidence::Moyen => "moyen",
            Confidence::Fort => "fort",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Finance,
    Commercial,
    Operations,
    General,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Finance => "finance",
            Category::Commercial => "commercial",
            Category::Operations => "operations",
            Category::General => "general",
        }
    }
}

/// An actionable improvement suggested for the audited gym.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub rec_code: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Estimated annual upside in EUR; zero when no estimate applies.
    pub expected_impact_eur: f64,
    pub effort_level: EffortLevel,
    pub confidence: Confidence,
    pub category: Category,
}
