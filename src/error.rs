//! Error types shared by the renderers and the CLI.

use std::path::PathBuf;
use thiserror::Error;

use crate::parser::ParseError;
use crate::validate::Issue;

/// A renderer could not produce valid output from a structurally valid
/// but semantically incomplete model.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("table `{table}`: index `{index}` has no columns")]
    EmptyIndex { table: String, index: String },
    #[error("table `{table}` has no columns, auto-filter range is empty")]
    EmptyFilterRange { table: String },
    #[error("failed to serialize OpenAPI document as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize OpenAPI document as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("workbook sheet `{sheet}`: {source}")]
    Workbook {
        sheet: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
    #[error("failed to assemble workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("schema validation failed with {} issue(s)", .0.len())]
    Validation(Vec<Issue>),
}

pub type Result<T> = std::result::Result<T, Error>;
