pub mod error;

use error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Name of the optional project config file
pub const CONFIG_FILE_NAME: &str = "goref.toml";

/// Project layout conventions used to pair controllers with views.
///
/// Every field is optional in `goref.toml`; missing fields keep the
/// `<root>/ctrls/<Type>.go` <-> `<root>/web/templates/<Type>/<action>.html`
/// layout.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Controller sources, relative to the project root
    pub controllers_dir: String,

    /// View templates, relative to the project root
    pub templates_dir: String,

    /// Stripped from receiver type names to get the view group
    pub controller_suffix: String,

    /// Extension of view templates, without the dot
    pub view_extension: String,

    /// Extension of controller sources, without the dot
    pub source_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controllers_dir: "ctrls".to_string(),
            templates_dir: "web/templates".to_string(),
            controller_suffix: "Controller".to_string(),
            view_extension: "html".to_string(),
            source_extension: "go".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config_data =
            fs::read_to_string(config_path).map_err(|source| ConfigError::ReadFailed {
                path: config_path.display().to_string(),
                source,
            })?;

        let config: Config = toml::from_str(&config_data)?;
        config.validate()?;

        Ok(config)
    }

    /// Look for `goref.toml` upward from the input file. A missing or broken
    /// file falls back to the defaults so the resolver always runs.
    pub fn discover(input_path: impl AsRef<Path>) -> Self {
        let Some(config_path) = find_config_file(input_path.as_ref()) else {
            debug!("No {} found, using default conventions", CONFIG_FILE_NAME);
            return Self::default();
        };

        debug!("Loading configuration from: {}", config_path.display());
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Ignoring {}: {}. Using default conventions",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Validate directory and extension settings
    pub fn validate(&self) -> Result<()> {
        for (key, dir) in [
            ("controllers_dir", &self.controllers_dir),
            ("templates_dir", &self.templates_dir),
        ] {
            if dir_components(dir).is_empty() {
                return Err(ConfigError::Invalid(format!("'{}' must not be empty", key)));
            }
            if Path::new(dir).is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "'{}' must be relative to the project root, got {}",
                    key, dir
                )));
            }
            if Path::new(dir)
                .components()
                .any(|c| matches!(c, Component::ParentDir))
            {
                return Err(ConfigError::Invalid(format!(
                    "'{}' must not contain '..', got {}",
                    key, dir
                )));
            }
        }

        for (key, ext) in [
            ("view_extension", &self.view_extension),
            ("source_extension", &self.source_extension),
        ] {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::Invalid(format!(
                    "'{}' must be a non-empty extension without a leading dot, got {:?}",
                    key, ext
                )));
            }
        }

        Ok(())
    }

    /// Number of directories between the project root and a controller file
    pub fn controllers_depth(&self) -> usize {
        dir_components(&self.controllers_dir).len()
    }

    /// Number of directories between the project root and the templates directory
    pub fn templates_depth(&self) -> usize {
        dir_components(&self.templates_dir).len()
    }

    /// Last component of the templates directory, `templates` by default
    pub fn templates_dir_name(&self) -> &str {
        dir_components(&self.templates_dir)
            .last()
            .copied()
            .unwrap_or_default()
    }
}

fn dir_components(dir: &str) -> Vec<&str> {
    dir.split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

/// Find goref.toml by searching upward from the given path
fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let current_dir = if start_path.is_file() {
        start_path.parent()?
    } else {
        start_path
    };
    let current_dir = if current_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        current_dir
    };

    // Convert to absolute path
    let mut current_dir = current_dir.canonicalize().ok()?;

    loop {
        let config_path = current_dir.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        // Move to parent directory
        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return None, // Reached root
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.controllers_depth(), 1);
        assert_eq!(config.templates_depth(), 2);
        assert_eq!(config.templates_dir_name(), "templates");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.templates_dir = String::new();
        assert!(config.validate().is_err());

        config.templates_dir = "/abs/templates".to_string();
        assert!(config.validate().is_err());

        config.templates_dir = "../templates".to_string();
        assert!(config.validate().is_err());

        config.templates_dir = "views/".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.templates_depth(), 1);
        assert_eq!(config.templates_dir_name(), "views");

        config.view_extension = ".html".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_keeps_defaults() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "templates_dir = \"app/views\"\nview_extension = \"tmpl\"\n")?;

        let config = Config::load(&config_path)?;
        assert_eq!(config.templates_dir, "app/views");
        assert_eq!(config.view_extension, "tmpl");
        assert_eq!(config.controllers_dir, "ctrls");
        assert_eq!(config.controller_suffix, "Controller");

        Ok(())
    }

    #[test]
    fn test_load_rejects_invalid_toml() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "templates_dir = [")?;

        assert!(matches!(
            Config::load(&config_path),
            Err(ConfigError::ParseFailed(_))
        ));

        Ok(())
    }

    #[test]
    fn test_discover_from_nested_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "controllers_dir = \"app/ctrls\"\n",
        )?;

        let ctrls = temp_dir.path().join("app").join("ctrls");
        fs::create_dir_all(&ctrls)?;
        let file = ctrls.join("UserController.go");
        fs::write(&file, "package ctrls\n")?;

        // Should find config from the file's directory upward
        let found = find_config_file(&file).expect("config found");
        assert_eq!(
            found.canonicalize()?,
            temp_dir.path().join(CONFIG_FILE_NAME).canonicalize()?
        );

        let config = Config::discover(&file);
        assert_eq!(config.controllers_dir, "app/ctrls");
        assert_eq!(config.controllers_depth(), 2);

        Ok(())
    }

    #[test]
    fn test_discover_broken_file_falls_back() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "view_extension = \"\"\n",
        )?;
        let file = temp_dir.path().join("Foo.go");
        fs::write(&file, "package ctrls\n")?;

        assert_eq!(Config::discover(&file), Config::default());

        Ok(())
    }

    #[test]
    fn test_discover_missing_path_uses_defaults() {
        let config = Config::discover("/nonexistent/project/ctrls/Foo.go");
        assert_eq!(config, Config::default());
    }
}
