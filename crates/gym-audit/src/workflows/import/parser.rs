use super::normalizer::{normalize_code, normalize_value};
use crate::workflows::audit::answers::{Answer, AnswerValue};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<Answer>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut answers = Vec::new();

    for record in csv_reader.deserialize::<AnswerRow>() {
        let row = record?;
        answers.push(Answer {
            block_code: normalize_code(&row.block_code),
            question_code: normalize_code(&row.question_code),
            value: row.value.map(AnswerValue::Text),
        });
    }

    Ok(answers)
}

pub(crate) fn parse_json<R: Read>(reader: R) -> Result<Vec<Answer>, serde_json::Error> {
    let export: JsonExport = serde_json::from_reader(reader)?;
    let answers = match export {
        JsonExport::Bare(answers) => answers,
        JsonExport::Wrapped { answers } => answers,
    };

    Ok(answers.into_iter().map(normalize_answer).collect())
}

fn normalize_answer(answer: Answer) -> Answer {
    let value = match answer.value {
        Some(AnswerValue::Text(raw)) => normalize_value(&raw).map(AnswerValue::Text),
        other => other,
    };

    Answer {
        block_code: normalize_code(&answer.block_code),
        question_code: normalize_code(&answer.question_code),
        value,
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonExport {
    Bare(Vec<Answer>),
    Wrapped { answers: Vec<Answer> },
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    block_code: String,
    question_code: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.as_deref().and_then(normalize_value))
}
