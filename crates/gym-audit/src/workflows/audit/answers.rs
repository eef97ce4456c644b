use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw value captured for one questionnaire entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
}

impl AnswerValue {
    /// Numeric reading of the value. Blank or non-numeric text is treated as
    /// absent, as are non-finite numbers.
    pub fn as_number(&self) -> Option<f64> {
        let parsed = match self {
            AnswerValue::Number(value) => Some(*value),
            AnswerValue::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.replace(',', ".").parse::<f64>().ok()
                }
            }
        };
        parsed.filter(|value| value.is_finite())
    }

    /// Trimmed text of a choice answer; numbers and blank text read as absent.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(raw) => Some(raw.trim()).filter(|text| !text.is_empty()),
            AnswerValue::Number(_) => None,
        }
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One answered (or skipped) question of an audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub block_code: String,
    pub question_code: String,
    #[serde(default)]
    pub value: Option<AnswerValue>,
}

impl Answer {
    pub fn new(block_code: &str, question_code: &str, value: impl Into<AnswerValue>) -> Self {
        Self {
            block_code: block_code.to_string(),
            question_code: question_code.to_string(),
            value: Some(value.into()),
        }
    }

    pub fn blank(block_code: &str, question_code: &str) -> Self {
        Self {
            block_code: block_code.to_string(),
            question_code: question_code.to_string(),
            value: None,
        }
    }

    pub fn number(&self) -> Option<f64> {
        self.value.as_ref().and_then(AnswerValue::as_number)
    }
}

/// Looks up one answer by `(block, question)` and returns its numeric value,
/// or `default` when the answer is missing, blank or not a number. When the
/// same question appears more than once the latest occurrence wins.
pub fn get_answer_value(
    answers: &[Answer],
    block_code: &str,
    question_code: &str,
    default: f64,
) -> f64 {
    answers
        .iter()
        .rev()
        .find(|answer| answer.block_code == block_code && answer.question_code == question_code)
        .and_then(Answer::number)
        .unwrap_or(default)
}

/// Single-pass index over an answer set, keyed by block then question.
#[derive(Debug, Default)]
pub struct AnswerIndex<'a> {
    blocks: HashMap<&'a str, HashMap<&'a str, Option<&'a AnswerValue>>>,
    len: usize,
}

impl<'a> AnswerIndex<'a> {
    pub fn new(answers: &'a [Answer]) -> Self {
        let mut blocks: HashMap<&'a str, HashMap<&'a str, Option<&'a AnswerValue>>> =
            HashMap::new();
        for answer in answers {
            blocks
                .entry(answer.block_code.as_str())
                .or_default()
                .insert(answer.question_code.as_str(), answer.value.as_ref());
        }

        Self {
            blocks,
            len: answers.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn raw(&self, block_code: &str, question_code: &str) -> Option<&'a AnswerValue> {
        self.blocks
            .get(block_code)
            .and_then(|questions| questions.get(question_code))
            .copied()
            .flatten()
    }

    pub fn value(&self, block_code: &str, question_code: &str) -> Option<f64> {
        self.raw(block_code, question_code)
            .and_then(AnswerValue::as_number)
    }

    pub fn text(&self, block_code: &str, question_code: &str) -> Option<&'a str> {
        self.raw(block_code, question_code)
            .and_then(AnswerValue::as_text)
    }

    pub fn value_or(&self, block_code: &str, question_code: &str, default: f64) -> f64 {
        self.value(block_code, question_code).unwrap_or(default)
    }

    /// Sum of several questions of one block, missing ones counting as zero.
    pub fn sum(&self, block_code: &str, question_codes: &[&str]) -> f64 {
        question_codes
            .iter()
            .map(|question| self.value_or(block_code, question, 0.0))
            .sum()
    }

    /// First non-zero value among a primary code and its legacy aliases.
    pub fn first_non_zero(&self, block_code: &str, question_codes: &[&str]) -> f64 {
        question_codes
            .iter()
            .map(|question| self.value_or(block_code, question, 0.0))
            .find(|value| *value != 0.0)
            .unwrap_or(0.0)
    }

    /// True when any of the codes carries a usable numeric answer.
    pub fn is_answered(&self, block_code: &str, question_codes: &[&str]) -> bool {
        question_codes
            .iter()
            .any(|question| self.value(block_code, question).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_default_for_missing_and_blank_answers() {
        let answers = vec![
            Answer::new("structure_base", "nb_membres_actifs_total", 120.0),
            Answer::blank("retention_churn", "nb_resiliations_mois"),
            Answer::new("retention_churn", "anciennes_moyens_mois", "  "),
        ];

        assert_eq!(
            get_answer_value(&answers, "structure_base", "nb_membres_actifs_total", 0.0),
            120.0
        );
        assert_eq!(
            get_answer_value(&answers, "retention_churn", "nb_resiliations_mois", 3.0),
            3.0
        );
        assert_eq!(
            get_answer_value(&answers, "retention_churn", "anciennes_moyens_mois", 22.0),
            22.0
        );
        assert_eq!(get_answer_value(&answers, "unknown", "question", 0.0), 0.0);
    }

    #[test]
    fn text_values_are_parsed_when_numeric() {
        let answers = vec![
            Answer::new("infrastructure_detaillee", "surface_totale", " 280 "),
            Answer::new("capacite_occupation", "taux_occupation_global_pct", "72,5"),
            Answer::new("structure_base", "nb_membres_actifs_total", "beaucoup"),
        ];

        assert_eq!(
            get_answer_value(&answers, "infrastructure_detaillee", "surface_totale", 1.0),
            280.0
        );
        assert_eq!(
            get_answer_value(
                &answers,
                "capacite_occupation",
                "taux_occupation_global_pct",
                0.0
            ),
            72.5
        );
        assert_eq!(
            get_answer_value(&answers, "structure_base", "nb_membres_actifs_total", 0.0),
            0.0
        );
    }

    #[test]
    fn latest_duplicate_wins_in_lookup_and_index() {
        let answers = vec![
            Answer::new("structure_base", "nb_membres_actifs_total", 100.0),
            Answer::new("structure_base", "nb_membres_actifs_total", 140.0),
        ];

        assert_eq!(
            get_answer_value(&answers, "structure_base", "nb_membres_actifs_total", 0.0),
            140.0
        );
        let index = AnswerIndex::new(&answers);
        assert_eq!(
            index.value("structure_base", "nb_membres_actifs_total"),
            Some(140.0)
        );
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn first_non_zero_falls_back_to_legacy_codes() {
        let answers = vec![
            Answer::new("acquisition_conversion", "essais_gratuits_mois", 0.0),
            Answer::new("acquisition_conversion", "nb_essais_mois_actuel", 18.0),
        ];
        let index = AnswerIndex::new(&answers);

        assert_eq!(
            index.first_non_zero(
                "acquisition_conversion",
                &["essais_gratuits_mois", "nb_essais_mois_actuel"]
            ),
            18.0
        );
        assert!(index.is_answered("acquisition_conversion", &["essais_gratuits_mois"]));
        assert!(!index.is_answered("acquisition_conversion", &["conversions_essai_abonne_mois"]));
    }

    #[test]
    fn index_keeps_choice_answers_as_text() {
        let answers = vec![
            Answer::new("localisation", "revenus_moyens_zone", " Élevés (40-60k) "),
            Answer::new("infrastructure_detaillee", "etat_general_materiel", ""),
            Answer::new("structure_base", "nb_membres_actifs_total", 120.0),
        ];
        let index = AnswerIndex::new(&answers);

        assert_eq!(
            index.text("localisation", "revenus_moyens_zone"),
            Some("Élevés (40-60k)")
        );
        assert_eq!(
            index.text("infrastructure_detaillee", "etat_general_materiel"),
            None
        );
        assert_eq!(
            index.text("structure_base", "nb_membres_actifs_total"),
            None
        );
        assert_eq!(index.value("localisation", "revenus_moyens_zone"), None);
    }

    #[test]
    fn answers_deserialize_from_mixed_json_values() {
        let answers: Vec<Answer> = serde_json::from_str(
            r#"[
                {"block_code": "structure_base", "question_code": "nb_membres_actifs_total", "value": 150},
                {"block_code": "infrastructure_detaillee", "question_code": "surface_totale", "value": "300"},
                {"block_code": "retention_churn", "question_code": "nb_resiliations_mois", "value": null},
                {"block_code": "retention_churn", "question_code": "anciennes_moyens_mois"}
            ]"#,
        )
        .expect("answers parse");

        assert_eq!(answers[0].number(), Some(150.0));
        assert_eq!(answers[1].number(), Some(300.0));
        assert_eq!(answers[2].value, None);
        assert_eq!(answers[3].value, None);
    }
}
