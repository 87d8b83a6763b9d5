//! Configuration system for reword.
//!
//! Loads config from:
//! 1. Global: ~/.config/reword/config.toml (or `$XDG_CONFIG_HOME/reword`)
//! 2. Per-project: .reword/config.toml (overrides global)
//!
//! Every setting is optional and project values override global ones field
//! by field. Command-line flags override both.
//!
//! Example config.toml:
//! ```toml
//! [translate]
//! from = "java"
//! to = "tuff"
//!
//! [typegen]
//! backend = "rust"
//! node_path = "::reword_syntax::Node"
//! derives = ["Debug", "Clone", "PartialEq"]
//!
//! [log]
//! filter = "reword=debug"
//! ```

use crate::error::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Defaults for the `translate` command.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TranslateConfig {
    /// Source language when it cannot be inferred.
    pub from: Option<String>,
    /// Target language.
    pub to: Option<String>,
}

/// Defaults for the `typegen` command.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TypegenConfig {
    pub backend: Option<String>,
    /// Path of the tree type referenced by generated code.
    pub node_path: Option<String>,
    pub derives: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing-subscriber` filter used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RewordConfig {
    pub translate: TranslateConfig,
    pub typegen: TypegenConfig,
    pub log: LogConfig,
}

impl RewordConfig {
    /// Load configuration for a project.
    ///
    /// Missing files are skipped; a file that exists but does not parse is
    /// an error.
    pub fn load(root: &Path) -> Result<Self, Error> {
        Self::load_from(Self::global_config_path().as_deref(), root)
    }

    fn load_from(global: Option<&Path>, root: &Path) -> Result<Self, Error> {
        let mut config = Self::default();

        if let Some(global) = global {
            if let Some(loaded) = Self::load_file(global)? {
                config = config.merge(loaded);
            }
        }

        let project_path = root.join(".reword").join("config.toml");
        if let Some(project) = Self::load_file(&project_path)? {
            config = config.merge(project);
        }

        Ok(config)
    }

    /// Get the global config path.
    pub fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("reword").join("config.toml"))
    }

    /// Load config from a file path, `None` if it does not exist.
    fn load_file(path: &Path) -> Result<Option<Self>, Error> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Some(config))
    }

    /// Merge another config into this one. Values set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            translate: TranslateConfig {
                from: other.translate.from.or(self.translate.from),
                to: other.translate.to.or(self.translate.to),
            },
            typegen: TypegenConfig {
                backend: other.typegen.backend.or(self.typegen.backend),
                node_path: other.typegen.node_path.or(self.typegen.node_path),
                derives: other.typegen.derives.or(self.typegen.derives),
            },
            log: LogConfig {
                filter: other.log.filter.or(self.log.filter),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(file, "{content}").unwrap();
    }

    #[test]
    fn test_no_config_files() {
        let dir = TempDir::new().unwrap();
        let config = RewordConfig::load_from(None, dir.path()).unwrap();
        assert_eq!(config, RewordConfig::default());
    }

    #[test]
    fn test_load_project_config() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir.path().join(".reword").join("config.toml"),
            r#"
[translate]
from = "java"

[typegen]
derives = ["Debug"]
"#,
        );

        let config = RewordConfig::load_from(None, dir.path()).unwrap();
        assert_eq!(config.translate.from.as_deref(), Some("java"));
        assert_eq!(config.translate.to, None);
        assert_eq!(config.typegen.derives, Some(vec!["Debug".to_string()]));
    }

    #[test]
    fn test_project_overrides_global_per_field() {
        let global_dir = TempDir::new().unwrap();
        let global = global_dir.path().join("config.toml");
        write_config(
            &global,
            r#"
[translate]
from = "java"
to = "tuff"

[log]
filter = "info"
"#,
        );

        let project = TempDir::new().unwrap();
        write_config(
            &project.path().join(".reword").join("config.toml"),
            r#"
[log]
filter = "reword=trace"
"#,
        );

        let config = RewordConfig::load_from(Some(&global), project.path()).unwrap();
        assert_eq!(config.translate.from.as_deref(), Some("java"));
        assert_eq!(config.translate.to.as_deref(), Some("tuff"));
        assert_eq!(config.log.filter.as_deref(), Some("reword=trace"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir.path().join(".reword").join("config.toml"),
            "[translate\nfrom = ",
        );
        let err = RewordConfig::load_from(None, dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
