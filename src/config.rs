//! Project-level configuration.
//!
//! A project may carry a `pyforge.toml` at its root to pin CLI defaults.
//! A missing file is not an error; every field has a default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The configuration file name looked up in the project root.
pub const FILE_NAME: &str = "pyforge.toml";

/// Defaults for the document CLI, loaded from `pyforge.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct ProjectConfig {
    /// Default output path for `markdown`.
    pub output: PathBuf,

    /// Default port for `view`.
    pub port: u16,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            port: default_port(),
        }
    }
}

impl ProjectConfig {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content
    /// is invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads `pyforge.toml` from the project root, falling back to the
    /// defaults when the file is absent or unreadable.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        let path = root.join(FILE_NAME);
        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized or the
    /// file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("document.md")
}

const fn default_port() -> u16 {
    8787
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_output")]
        output: PathBuf,

        #[serde(default = "default_port")]
        port: u16,
    },
}

impl From<Versions> for ProjectConfig {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { output, port } => Self { output, port },
        }
    }
}

impl From<ProjectConfig> for Versions {
    fn from(config: ProjectConfig) -> Self {
        Self::V1 {
            output: config.output,
            port: config.port,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\noutput = \"report.md\"\nport = 9000\n")
            .unwrap();

        let config = ProjectConfig::load(file.path()).unwrap();
        assert_eq!(config.output, PathBuf::from("report.md"));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ProjectConfig::load_or_default(tmp.path());
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn empty_file_returns_default() {
        let actual: ProjectConfig = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, ProjectConfig::default());
    }

    #[test]
    fn round_trips_through_save() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(FILE_NAME);

        let config = ProjectConfig {
            output: PathBuf::from("out/doc.md"),
            port: 9999,
        };
        config.save(&path).unwrap();
        assert_eq!(ProjectConfig::load(&path).unwrap(), config);
    }
}
