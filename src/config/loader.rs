//! Configuration file discovery and loading.
//!
//! Configuration can come from up to three places, lowest tier to highest:
//! 1. **User** - `~/.train-harness/train.yaml` (or `$TRAIN_HARNESS_USER_DIR`)
//! 2. **Project** - `$CWD/train.yaml`
//! 3. **Explicit** - `--config` or `TRAIN_HARNESS_CONFIG_PATH`
//!
//! An explicit path is used alone. Otherwise the user and project files are
//! deep-merged field by field, the project file winning on collisions.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::merge::deep_merge_all;
use super::tree::ConfigTree;

/// Candidate locations for configuration files.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Explicit config file; when set, the tiers below are ignored.
    pub explicit: Option<PathBuf>,
    /// Project-level config file.
    pub project_file: Option<PathBuf>,
    /// User-level config file.
    pub user_file: Option<PathBuf>,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigPaths {
    /// Discover configuration locations from the environment and defaults.
    pub fn discover() -> Self {
        let explicit = std::env::var("TRAIN_HARNESS_CONFIG_PATH")
            .ok()
            .map(PathBuf::from);

        // User file: TRAIN_HARNESS_USER_DIR or ~/.train-harness
        let user_file = std::env::var("TRAIN_HARNESS_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".train-harness")))
            .map(|dir| dir.join("train.yaml"));

        let project_file = Some(PathBuf::from("train.yaml"));

        Self {
            explicit,
            project_file,
            user_file,
        }
    }

    /// An explicit file override, e.g. from the command line.
    pub fn with_explicit(path: impl Into<PathBuf>) -> Self {
        Self {
            explicit: Some(path.into()),
            project_file: None,
            user_file: None,
        }
    }

    /// Specific project/user files, mainly for tests.
    pub fn with_files(project_file: Option<PathBuf>, user_file: Option<PathBuf>) -> Self {
        Self {
            explicit: None,
            project_file,
            user_file,
        }
    }
}

/// Loads and merges configuration files into a [`ConfigTree`].
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Candidate locations this loader searched.
    pub paths: ConfigPaths,
    tree: ConfigTree,
    sources: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration from the discovered locations.
    pub fn load() -> Result<Self> {
        Self::load_with_paths(ConfigPaths::discover())
    }

    /// Load configuration from explicit locations.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        if let Some(ref path) = paths.explicit {
            let tree = ConfigTree::from_value(read_value(path)?)?;
            let sources = vec![path.clone()];
            return Ok(Self {
                paths,
                tree,
                sources,
            });
        }

        let mut documents: Vec<Value> = Vec::new();
        let mut sources = Vec::new();

        // Lowest tier first so later documents win the merge.
        for candidate in [&paths.user_file, &paths.project_file] {
            if let Some(path) = candidate
                && path.exists()
            {
                documents.push(read_value(path)?);
                sources.push(path.clone());
            }
        }

        if documents.is_empty() {
            bail!(
                "no configuration file found (looked for {})",
                describe_candidates(&paths)
            );
        }

        let tree = ConfigTree::from_value(deep_merge_all(documents))?;
        Ok(Self {
            paths,
            tree,
            sources,
        })
    }

    /// The loaded configuration tree.
    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    /// Consume the loader and return the tree.
    pub fn into_tree(self) -> ConfigTree {
        self.tree
    }

    /// Files that contributed to the loaded tree, lowest tier first.
    pub fn source_files(&self) -> &[PathBuf] {
        &self.sources
    }
}

fn read_value(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let value: Value = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(value)
}

fn describe_candidates(paths: &ConfigPaths) -> String {
    let mut candidates = Vec::new();
    if let Some(ref p) = paths.project_file {
        candidates.push(p.display().to_string());
    }
    if let Some(ref p) = paths.user_file {
        candidates.push(p.display().to_string());
    }
    if candidates.is_empty() {
        "no candidate paths".to_string()
    } else {
        candidates.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_a_single_project_file() {
        let temp = TempDir::new().unwrap();
        let project = write(
            &temp,
            "train.yaml",
            "default:\n  runner:\n    model: TestModel\n",
        );

        let loader = ConfigLoader::load_with_paths(ConfigPaths::with_files(Some(project), None))
            .unwrap();

        let section = loader.tree().section("default", "runner").unwrap().unwrap();
        assert_eq!(section.get("model"), Some(&json!("TestModel")));
        assert_eq!(loader.source_files().len(), 1);
    }

    #[test]
    fn project_file_overrides_user_file() {
        let temp = TempDir::new().unwrap();
        let user = write(
            &temp,
            "user.yaml",
            "default:\n  runner:\n    model: TestModel\n    seed: 1\n",
        );
        let project = write(&temp, "train.yaml", "default:\n  runner:\n    seed: 42\n");

        let loader =
            ConfigLoader::load_with_paths(ConfigPaths::with_files(Some(project), Some(user)))
                .unwrap();

        let section = loader.tree().section("default", "runner").unwrap().unwrap();
        // seed comes from the project tier, model survives from the user tier
        assert_eq!(section.get("seed"), Some(&json!(42)));
        assert_eq!(section.get("model"), Some(&json!("TestModel")));
        assert_eq!(loader.source_files().len(), 2);
    }

    #[test]
    fn explicit_path_is_used_alone() {
        let temp = TempDir::new().unwrap();
        let project = write(&temp, "train.yaml", "default:\n  runner:\n    seed: 1\n");
        let explicit = write(&temp, "other.yaml", "default:\n  runner:\n    seed: 99\n");

        let mut paths = ConfigPaths::with_files(Some(project), None);
        paths.explicit = Some(explicit.clone());

        let loader = ConfigLoader::load_with_paths(paths).unwrap();
        let section = loader.tree().section("default", "runner").unwrap().unwrap();
        assert_eq!(section.get("seed"), Some(&json!(99)));
        assert_eq!(loader.source_files().to_vec(), vec![explicit]);
    }

    #[test]
    fn missing_configuration_is_an_error() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_files(
            Some(temp.path().join("absent.yaml")),
            Some(temp.path().join("also-absent.yaml")),
        );
        assert!(ConfigLoader::load_with_paths(paths).is_err());
    }

    #[test]
    fn unparseable_yaml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let bad = write(&temp, "train.yaml", "default: [unclosed\n");
        let paths = ConfigPaths::with_files(Some(bad), None);
        assert!(ConfigLoader::load_with_paths(paths).is_err());
    }
}
