//! Render-and-write jobs, one per output target.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::markdown::render_markdown;
use crate::openapi::render_openapi;
use crate::plantuml::render_plantuml;
use crate::schema::Document;
use crate::settings::{OpenApiFormat, Settings};
use crate::sql::render_sql;
use crate::workbook::{render_workbook, WorkbookLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Target {
    Sql,
    Openapi,
    /// PlantUML diagram plus Markdown reference.
    Diagram,
    Workbook,
}

impl Target {
    pub const ALL: [Target; 4] = [Target::Sql, Target::Openapi, Target::Diagram, Target::Workbook];

    pub fn name(self) -> &'static str {
        match self {
            Target::Sql => "sql",
            Target::Openapi => "openapi",
            Target::Diagram => "diagram",
            Target::Workbook => "workbook",
        }
    }
}

/// `<prefix>_<YYYYMMDD>.xlsx`
pub fn workbook_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", prefix, date.format("%Y%m%d"))
}

/// Render `target` from `doc` and write its artifacts under the output
/// directory. Returns the written paths.
pub fn run_target(
    target: Target,
    doc: &Document,
    settings: &Settings,
    today: NaiveDate,
) -> Result<Vec<PathBuf>> {
    let artifacts: Vec<(PathBuf, Vec<u8>)> = match target {
        Target::Sql => vec![(
            settings.output_path(&settings.sql_file),
            render_sql(doc)?.into_bytes(),
        )],
        Target::Openapi => {
            let api = render_openapi(doc);
            let text = match settings.openapi_format {
                OpenApiFormat::Yaml => api.to_yaml()?,
                OpenApiFormat::Json => api.to_json()?,
            };
            vec![(settings.output_path(&settings.openapi_file), text.into_bytes())]
        }
        Target::Diagram => vec![
            (
                settings.output_path(&settings.diagram_file),
                render_plantuml(doc).into_bytes(),
            ),
            (
                settings.output_path(&settings.markdown_file),
                render_markdown(doc).into_bytes(),
            ),
        ],
        Target::Workbook => {
            let layout = WorkbookLayout {
                column_width: settings.column_width,
            };
            vec![(
                settings.output_path(&workbook_file_name(&settings.workbook_prefix, today)),
                render_workbook(doc, &layout)?,
            )]
        }
    };

    let mut written = Vec::with_capacity(artifacts.len());
    for (path, bytes) in artifacts {
        write_artifact(&path, &bytes)?;
        written.push(path);
    }
    Ok(written)
}

/// Write one artifact, creating missing parent directories. Never retried.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, bytes).map_err(io_err)?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote artifact");
    Ok(())
}

/// Read the schema document from disk.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workbook_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(workbook_file_name("schema_spec", date), "schema_spec_20240309.xlsx");
    }

    #[test]
    fn test_write_artifact_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/schema.sql");
        write_artifact(&path, b"SELECT 1;").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"SELECT 1;");
    }

    #[test]
    fn test_write_artifact_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten with a file.
        let err = write_artifact(dir.path(), b"x").unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
