//! Parser configuration (rigdef.yaml).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RigError};
use crate::lookup::{AssumePresent, DirectoryLookup, ResourceLookup};

/// File name looked up next to the rig files when no config is given.
pub const CONFIG_FILE_NAME: &str = "rigdef.yaml";

/// Most argument slices one line can carry.
pub const LINE_MAX_ARGS: usize = 100;

/// Parser settings loaded from rigdef.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Directories searched for textures referenced by `managedmaterials`.
    pub resource_dirs: Vec<PathBuf>,

    /// Demote or skip managed materials whose textures are missing.
    /// When off, every texture is assumed present.
    pub check_textures: bool,

    /// Argument slices kept per line; tokens past this are dropped.
    #[serde(default = "default_max_args")]
    pub max_args: usize,

    /// Strip trailing `;` and `//` comments from data lines.
    #[serde(default = "default_comment_stripping")]
    pub comment_stripping: bool,
}

fn default_max_args() -> usize {
    LINE_MAX_ARGS
}

fn default_comment_stripping() -> bool {
    true
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            resource_dirs: vec![],
            check_textures: false,
            max_args: default_max_args(),
            comment_stripping: default_comment_stripping(),
        }
    }
}

impl ParserConfig {
    /// Load configuration from a rigdef.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RigError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        let mut config = Self::parse(&content)?;
        // Relative resource dirs are relative to the config file.
        if let Some(base) = path.parent() {
            for dir in &mut config.resource_dirs {
                if dir.is_relative() {
                    *dir = base.join(&*dir);
                }
            }
        }
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| RigError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILE_NAME)),
        })
    }

    /// Load `rigdef.yaml` from `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// `max_args` clamped to `1..=LINE_MAX_ARGS`.
    pub fn effective_max_args(&self) -> usize {
        self.max_args.clamp(1, LINE_MAX_ARGS)
    }

    /// Texture lookup matching these settings.
    pub fn resource_lookup(&self) -> Box<dyn ResourceLookup> {
        if self.check_textures {
            Box::new(DirectoryLookup::scan(&self.resource_dirs))
        } else {
            Box::new(AssumePresent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = ParserConfig::parse("{}").unwrap();
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.max_args, 100);
        assert!(config.comment_stripping);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
resource_dirs:
  - textures/
  - /opt/shared
check_textures: true
max_args: 24
comment_stripping: false
"#;
        let config = ParserConfig::parse(yaml).unwrap();

        assert_eq!(
            config.resource_dirs,
            vec![PathBuf::from("textures/"), PathBuf::from("/opt/shared")]
        );
        assert!(config.check_textures);
        assert_eq!(config.max_args, 24);
        assert!(!config.comment_stripping);
    }

    #[test]
    fn test_invalid_config() {
        let err = ParserConfig::parse("max_args: lots").unwrap_err();
        assert!(matches!(err, RigError::Config { .. }));
    }

    #[test]
    fn test_effective_max_args_clamped() {
        let mut config = ParserConfig::default();
        config.max_args = 0;
        assert_eq!(config.effective_max_args(), 1);
        config.max_args = 500;
        assert_eq!(config.effective_max_args(), LINE_MAX_ARGS);
    }

    #[test]
    fn test_load_resolves_relative_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "resource_dirs: [textures]\ncheck_textures: true\n").unwrap();

        let config = ParserConfig::load(&path).unwrap();
        assert_eq!(config.resource_dirs, vec![dir.path().join("textures")]);
    }

    #[test]
    fn test_discover_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ParserConfig::discover(dir.path()).unwrap();
        assert_eq!(config, ParserConfig::default());
    }
}
