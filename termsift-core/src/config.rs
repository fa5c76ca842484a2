use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{ALL_SETS, CONFIG_FILE_ENVVAR, DEFAULT_CONFIG_PATH, VERSION};
use crate::types::{ConfigError, TermsiftError};

/// A named data set: one genome or peptide collection living in its own
/// directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    /// Name used on the command line.
    pub name: String,

    /// Directory holding the set's input sequences and per-set term tables.
    pub dir: PathBuf,

    /// Free-form description, e.g. the organism.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Directory receiving the merged and filtered tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDir {
    pub dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Persistent configuration shared by every command.
///
/// The configuration is loaded once per invocation and passed explicitly to
/// the pipeline; nothing in the library reads it from global state.
///
/// # Examples
///
/// ```rust
/// use termsift_core::config::TermsiftConfig;
///
/// let mut config = TermsiftConfig::default();
/// config.define_set("glyma", "data/glyma", None)?;
/// config.define_set("medtr", "data/medtr", Some("Medicago".to_string()))?;
///
/// let sets = config.resolve_set_list(&["all".to_string()])?;
/// assert_eq!(sets, vec!["glyma", "medtr"]);
/// # Ok::<(), termsift_core::types::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermsiftConfig {
    /// Version of the tool that last wrote the file.
    #[serde(default = "default_version")]
    pub version: String,

    /// Label of the simplicity function, see [`crate::simplicity`].
    ///
    /// **Default**: `"none"`
    #[serde(default = "default_simplicity")]
    pub simplicity: String,

    /// Data sets in definition order. `all` expands to this order.
    #[serde(default)]
    pub sets: Vec<DataSet>,

    /// Output directory for intersected and filtered tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryDir>,
}

fn default_version() -> String {
    VERSION.to_string()
}

fn default_simplicity() -> String {
    "none".to_string()
}

impl Default for TermsiftConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            simplicity: default_simplicity(),
            sets: Vec::new(),
            summary: None,
        }
    }
}

/// Per-invocation options that are not part of the persistent configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Only the first N records of each input are used; 0 means all.
    pub first_n: usize,
}

impl TermsiftConfig {
    /// Picks the configuration file path.
    ///
    /// An explicit path wins, then the `TERMSIFT_CONFIG` environment variable,
    /// then `.termsift/config.yaml` under the working directory.
    pub fn locate(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match std::env::var_os(CONFIG_FILE_ENVVAR) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist and
    /// [`TermsiftError::YamlError`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, TermsiftError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        debug!("Reading configuration from \"{}\"", path.display());
        let reader = BufReader::new(File::open(path)?);
        let mut config: TermsiftConfig = serde_yaml::from_reader(reader)?;
        if config.version != VERSION {
            debug!(
                "Configuration version {} differs from {}",
                config.version, VERSION
            );
            config.version = VERSION.to_string();
        }
        Ok(config)
    }

    /// Reads a configuration file, starting a fresh one if it is missing.
    pub fn load_or_default(path: &Path) -> Result<Self, TermsiftError> {
        match Self::load(path) {
            Err(TermsiftError::Config(ConfigError::NotFound(_))) => {
                warn!("Initializing config file \"{}\"", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Writes the configuration, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), TermsiftError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                debug!("Creating config file directory \"{}\"", parent.display());
                fs::create_dir_all(parent).map_err(|source| TermsiftError::OutputPath {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let file = File::create(path).map_err(|source| TermsiftError::OutputPath {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Adds a data set, replacing any existing definition with the same name.
    pub fn define_set(
        &mut self,
        name: &str,
        dir: impl Into<PathBuf>,
        label: Option<String>,
    ) -> Result<(), ConfigError> {
        if name == ALL_SETS {
            return Err(ConfigError::ReservedSetName);
        }
        let set = DataSet {
            name: name.to_string(),
            dir: dir.into(),
            label,
        };
        match self.sets.iter_mut().find(|s| s.name == name) {
            Some(existing) => *existing = set,
            None => self.sets.push(set),
        }
        Ok(())
    }

    pub fn define_summary(&mut self, dir: impl Into<PathBuf>, label: Option<String>) {
        self.summary = Some(SummaryDir {
            dir: dir.into(),
            label,
        });
    }

    pub fn data_set(&self, name: &str) -> Result<&DataSet, ConfigError> {
        self.sets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ConfigError::UnknownSet(name.to_string()))
    }

    pub fn set_dir(&self, name: &str) -> Result<&Path, ConfigError> {
        self.data_set(name).map(|s| s.dir.as_path())
    }

    pub fn summary_dir(&self) -> Result<&Path, ConfigError> {
        self.summary
            .as_ref()
            .map(|s| s.dir.as_path())
            .ok_or(ConfigError::MissingSummary)
    }

    /// Validates a set list from the command line.
    ///
    /// `all` expands to every configured set in definition order and may be
    /// given at most once. Every other name must be a configured set. Each set
    /// appears once, at its first position. An empty result is an error.
    pub fn resolve_set_list(&self, names: &[String]) -> Result<Vec<String>, ConfigError> {
        let mut resolved: Vec<String> = Vec::new();
        let mut push_once = |name: &str| {
            if !resolved.iter().any(|r| r == name) {
                resolved.push(name.to_string());
            }
        };
        let mut all_count = 0;
        for name in names {
            if name == ALL_SETS {
                all_count += 1;
                if all_count > 1 {
                    return Err(ConfigError::AllRepeated);
                }
                for set in &self.sets {
                    push_once(&set.name);
                }
            } else {
                self.data_set(name)?;
                push_once(name);
            }
        }
        if resolved.is_empty() {
            return Err(ConfigError::EmptySetList);
        }
        Ok(resolved)
    }
}
