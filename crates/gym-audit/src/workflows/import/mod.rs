//! Readers for questionnaire answer exports.

mod normalizer;
mod parser;

use crate::workflows::audit::answers::Answer;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum AnswerImportError {
    #[error("failed to read answer export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answer CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid answer JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported answer export format: {path} (expected .json or .csv)")]
    UnsupportedFormat { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

pub struct AnswerImporter;

impl AnswerImporter {
    /// Reads an export, picking the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Answer>, AnswerImportError> {
        let path = path.as_ref();
        let format =
            ExportFormat::from_path(path).ok_or_else(|| AnswerImportError::UnsupportedFormat {
                path: path.display().to_string(),
            })?;
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, format)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        format: ExportFormat,
    ) -> Result<Vec<Answer>, AnswerImportError> {
        let answers = match format {
            ExportFormat::Json => Self::from_json_reader(reader)?,
            ExportFormat::Csv => Self::from_csv_reader(reader)?,
        };
        tracing::debug!(answers = answers.len(), ?format, "imported answer export");
        Ok(answers)
    }

    /// Accepts a bare array of answers or an object with an `answers` array.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<Answer>, AnswerImportError> {
        Ok(parser::parse_json(reader)?)
    }

    /// Rows with `block_code,question_code,value` headers.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Answer>, AnswerImportError> {
        Ok(parser::parse_csv(reader)?)
    }
}
