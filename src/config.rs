use crate::error::{Result, TransformError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved filesystem layout for a run. Roots default to fixed relative
/// paths under the current working directory; an optional `refdata.toml`
/// may override the two roots. No environment variables are consulted.
#[derive(Debug, Clone)]
pub struct Paths {
    pub source_root: PathBuf,
    pub data_root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    paths: Option<PathsConfig>,
}

#[derive(Debug, Deserialize)]
struct PathsConfig {
    source_root: Option<String>,
    data_root: Option<String>,
}

impl Paths {
    /// Load the path layout, applying `refdata.toml` overrides if the file
    /// exists in the working directory.
    pub fn load() -> Result<Self> {
        let mut paths = Self::default();

        let config_path = "refdata.toml";
        if Path::new(config_path).exists() {
            let config_content = fs::read_to_string(config_path).map_err(|e| {
                TransformError::Config(format!(
                    "Failed to read config file '{}': {}",
                    config_path, e
                ))
            })?;
            let config: ConfigFile = toml::from_str(&config_content)?;
            if let Some(overrides) = config.paths {
                if let Some(source_root) = overrides.source_root {
                    paths.source_root = PathBuf::from(source_root);
                }
                if let Some(data_root) = overrides.data_root {
                    paths.data_root = PathBuf::from(data_root);
                }
            }
        }

        Ok(paths)
    }

    /// Layout rooted at an arbitrary directory, for tests.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            source_root: root.join(".source"),
            data_root: root.join(".data"),
        }
    }

    /// Path to a source file under `.source/<Name>/...`.
    pub fn source_file(&self, relative: &str) -> PathBuf {
        self.source_root.join(relative)
    }

    /// Path to an entity output file, `.data/<Namespace>.<EntityType>.tsv`.
    pub fn entity_file(&self, ns: &str, entity_type: &str) -> PathBuf {
        self.data_root.join(format!("{}.{}.tsv", ns, entity_type))
    }

    /// Path to a relationship output file,
    /// `.data/relationships/<Namespace>.<FromType>.<ToType>.tsv`.
    pub fn relationship_file(&self, ns: &str, from_type: &str, to_type: &str) -> PathBuf {
        self.data_root
            .join("relationships")
            .join(format!("{}.{}.{}.tsv", ns, from_type, to_type))
    }

    pub fn relationships_root(&self) -> PathBuf {
        self.data_root.join("relationships")
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(".source"),
            data_root: PathBuf::from(".data"),
        }
    }
}
