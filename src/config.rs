//! Project configuration and check manifests.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Deserialize;

use crate::roots::{DEFAULT_RESOURCES_DIR_NAME, ResourceRootCache};
use crate::rules::{FieldValue, Rule};

const DEFAULT_CONFIG_FILE: &str = "validators.config.json";

/// Discoverable project configuration describing where resource roots live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Directory, relative to the project, that is scanned for resource roots.
    pub assets_dir: String,
    /// Directory name that marks a resource root.
    pub resources_dir_name: String,
    /// Explicit resource roots, relative to the project. Disables discovery when set.
    pub roots: Option<Vec<String>>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            assets_dir: "Assets".into(),
            resources_dir_name: DEFAULT_RESOURCES_DIR_NAME.into(),
            roots: None,
        }
    }
}

impl ValidatorConfig {
    /// Attempt to load configuration from the provided project directory.
    ///
    /// A missing or unparsable file falls back to defaults.
    pub fn discover(project_dir: &Path) -> Self {
        let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!("ignoring {}: {err}", path.display());
                None
            }
        }
    }

    /// Absolute assets directory for `project_dir`.
    pub fn assets_dir_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.assets_dir)
    }

    /// Build the root cache described by this configuration.
    pub fn root_cache(&self, project_dir: &Path) -> Rc<ResourceRootCache> {
        let cache = ResourceRootCache::discover(
            self.assets_dir_path(project_dir),
            self.resources_dir_name.clone(),
        );
        if let Some(roots) = &self.roots {
            cache.pin(Some(roots.iter().map(|root| project_dir.join(root)).collect()));
        }
        Rc::new(cache)
    }
}

/// One value checked against one rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldCheck {
    /// Label reported alongside the result.
    pub field: String,
    /// Rule to apply.
    pub rule: Rule,
    /// Value under test.
    pub value: FieldValue,
}

/// A list of checks loaded from JSON or YAML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CheckManifest {
    /// Checks in file order.
    #[serde(default)]
    pub checks: Vec<FieldCheck>,
}

/// Errors that can occur while loading a check manifest.
#[derive(Debug)]
pub enum ManifestError {
    /// Failed to read the manifest from disk.
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        source: std::io::Error,
    },
    /// Failed to parse a JSON manifest.
    Json {
        /// Path that caused the error.
        path: PathBuf,
        /// Source parse error.
        source: serde_json::Error,
    },
    /// Failed to parse a YAML manifest.
    Yaml {
        /// Path that caused the error.
        path: PathBuf,
        /// Source parse error.
        source: serde_yaml::Error,
    },
}

impl CheckManifest {
    /// Load a manifest, choosing YAML for `.yaml`/`.yml` files and JSON otherwise.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        if is_yaml {
            serde_yaml::from_str(&contents).map_err(|source| ManifestError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            serde_json::from_str(&contents).map_err(|source| ManifestError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::Json { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            Self::Yaml { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Yaml { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{NumericRule, ResourceFileRule};
    use tempfile::tempdir;

    #[test]
    fn discover_falls_back_to_defaults() {
        let temp = tempdir().unwrap();
        assert_eq!(ValidatorConfig::discover(temp.path()), ValidatorConfig::default());

        fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(ValidatorConfig::discover(temp.path()), ValidatorConfig::default());
    }

    #[test]
    fn discover_reads_partial_configuration() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            r#"{"assets_dir": "Content", "roots": ["Content/Shared"]}"#,
        )
        .unwrap();

        let config = ValidatorConfig::discover(temp.path());
        assert_eq!(config.assets_dir, "Content");
        assert_eq!(config.resources_dir_name, "Resources");

        let cache = config.root_cache(temp.path());
        assert_eq!(cache.roots().to_vec(), vec![temp.path().join("Content/Shared")]);
    }

    #[test]
    fn loads_yaml_manifest() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("checks.yaml");
        fs::write(
            &path,
            r#"
checks:
  - field: hero.sprite
    rule:
      kind: resource_file
      prepend_path: Characters
      extension: .png
      allow_empty_path: false
    value: Hero/Idle
  - field: hero.speed
    rule:
      kind: numeric
      constraint: positive
    value: 4.5
"#,
        )
        .unwrap();

        let manifest = CheckManifest::load_from_path(&path).unwrap();
        assert_eq!(manifest.checks.len(), 2);
        assert_eq!(
            manifest.checks[0].rule,
            Rule::from(ResourceFileRule::new("Characters", ".png").allow_empty(false))
        );
        assert_eq!(manifest.checks[1].rule, Rule::from(NumericRule::Positive));
        assert_eq!(manifest.checks[1].value, FieldValue::Double(4.5));
    }

    #[test]
    fn loads_json_manifest() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("checks.json");
        fs::write(
            &path,
            r#"{"checks": [{"field": "spawn", "rule": {"kind": "vector", "constraint": "not_origin"}, "value": [0, 0, 1]}]}"#,
        )
        .unwrap();

        let manifest = CheckManifest::load_from_path(&path).unwrap();
        assert_eq!(manifest.checks[0].value, FieldValue::IntVector(vec![0, 0, 1]));
    }

    #[test]
    fn reports_missing_and_malformed_manifests() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing.json");
        assert!(matches!(
            CheckManifest::load_from_path(&missing),
            Err(ManifestError::Io { .. })
        ));

        let malformed = temp.path().join("malformed.json");
        fs::write(&malformed, r#"{"checks": 3}"#).unwrap();
        assert!(matches!(
            CheckManifest::load_from_path(&malformed),
            Err(ManifestError::Json { .. })
        ));

        let broken = temp.path().join("broken.yml");
        fs::write(&broken, "checks: [").unwrap();
        let err = CheckManifest::load_from_path(&broken).unwrap_err();
        assert!(matches!(err, ManifestError::Yaml { .. }));
        assert!(err.to_string().starts_with("failed to parse"));
    }
}
