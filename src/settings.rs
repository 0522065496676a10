//! Output settings.
//!
//! Priority: CLI flags > `SCHEMAGEN_*` environment > config file > defaults.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::workbook::DEFAULT_COLUMN_WIDTH;

pub const DEFAULT_CONFIG_FILE: &str = "schemagen.toml";
pub const ENV_PREFIX: &str = "SCHEMAGEN";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OpenApiFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub sql_file: String,
    pub openapi_file: String,
    pub openapi_format: OpenApiFormat,
    pub diagram_file: String,
    pub markdown_file: String,
    /// Workbook files are named `<prefix>_<YYYYMMDD>.xlsx`.
    pub workbook_prefix: String,
    pub column_width: f64,
    pub validate: bool,
    pub strict: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            sql_file: "schema.sql".to_string(),
            openapi_file: "openapi.yaml".to_string(),
            openapi_format: OpenApiFormat::Yaml,
            diagram_file: "schema_er.puml".to_string(),
            markdown_file: "schema.md".to_string(),
            workbook_prefix: "schema_spec".to_string(),
            column_width: DEFAULT_COLUMN_WIDTH,
            validate: false,
            strict: false,
        }
    }
}

impl Settings {
    /// Load settings from `config_file`, or from `./schemagen.toml` when it
    /// exists, then overlay the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        match config_file {
            Some(path) => {
                builder = builder.add_source(File::from(path));
            }
            None => {
                if Path::new(DEFAULT_CONFIG_FILE).exists() {
                    builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE));
                }
            }
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let settings: Settings = builder.build()?.try_deserialize()?;
        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    }

    pub fn output_path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.sql_file, "schema.sql");
        assert_eq!(s.openapi_format, OpenApiFormat::Yaml);
        assert_eq!(s.column_width, 18.0);
        assert_eq!(s.output_path("schema.md"), PathBuf::from("./schema.md"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "output_dir = \"docs\"\nopenapi_format = \"json\"\ncolumn_width = 24.5\nstrict = true"
        )
        .unwrap();

        let s = Settings::load(Some(file.path())).unwrap();
        assert_eq!(s.output_dir, PathBuf::from("docs"));
        assert_eq!(s.openapi_format, OpenApiFormat::Json);
        assert_eq!(s.column_width, 24.5);
        assert!(s.strict);
        // untouched keys keep their defaults
        assert_eq!(s.markdown_file, "schema.md");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/schemagen.toml"))).is_err());
    }
}
