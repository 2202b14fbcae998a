//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `records.path`
//! - `records.bucket`
//! - `collapse.state_file`
//!
//! ## Example
//!
//! ```toml
//! [records]
//! path = "${DOCS_DIR:-content}/pages.json"
//! bucket = "orm"
//!
//! [tree]
//! section_depth = 2
//! index_segment = "index"
//!
//! [collapse]
//! key = "path"
//!
//! [location]
//! special_paths = ["/legacy"]
//! ```

mod expand;

use std::path::{Path, PathBuf};

use docnav_tree::{
    ActiveMatcher, CollapseKey, DEFAULT_INDEX_SEGMENT, DEFAULT_SECTION_DEPTH, TreeOptions,
    ViewOptions,
};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override record file path.
    pub records_path: Option<PathBuf>,
    /// Override navigation bucket.
    pub bucket: Option<String>,
    /// Override collapse key mode.
    pub collapse_key: Option<CollapseKey>,
    /// Override state file path.
    pub state_file: Option<PathBuf>,
    /// Override state persistence flag.
    pub persist: Option<bool>,
    /// Override hidden page filtering.
    pub skip_hidden: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Project data directory, relative to the config file.
const PROJECT_DIRNAME: &str = ".docnav";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record source (paths are relative strings from TOML).
    records: RecordsConfigRaw,
    /// Tree construction settings.
    pub tree: TreeConfig,
    /// Collapse state settings (paths are relative strings from TOML).
    collapse: CollapseConfigRaw,
    /// Active-path settings.
    pub location: LocationConfig,
    /// Render view settings.
    pub view: ViewConfig,

    /// Resolved records configuration (set after loading).
    #[serde(skip)]
    pub records_resolved: RecordsConfig,
    /// Resolved collapse configuration (set after loading).
    #[serde(skip)]
    pub collapse_resolved: CollapseConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    #[allow(clippy::derivable_impls)]
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw records configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RecordsConfigRaw {
    path: Option<String>,
    bucket: Option<String>,
}

/// Resolved records configuration with absolute paths.
#[derive(Debug, Default)]
pub struct RecordsConfig {
    /// Record file (JSON or YAML).
    pub path: PathBuf,
    /// Only build the tree for this first path segment.
    pub bucket: Option<String>,
}

/// Tree construction settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Segment count of a top-level section landing page.
    pub section_depth: usize,
    /// Segment name marking a section landing page.
    pub index_segment: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            section_depth: DEFAULT_SECTION_DEPTH,
            index_segment: DEFAULT_INDEX_SEGMENT.to_owned(),
        }
    }
}

/// Raw collapse configuration as parsed from TOML.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct CollapseConfigRaw {
    key: CollapseKey,
    state_file: Option<String>,
    persist: bool,
}

impl Default for CollapseConfigRaw {
    fn default() -> Self {
        Self {
            key: CollapseKey::default(),
            state_file: None,
            persist: true,
        }
    }
}

/// Resolved collapse configuration with absolute paths.
#[derive(Debug, Default)]
pub struct CollapseConfig {
    /// How nodes are keyed in the collapse store.
    pub key: CollapseKey,
    /// Collapse state snapshot file.
    pub state_file: PathBuf,
    /// Whether collapse state is read from and written to `state_file`.
    pub persist: bool,
}

/// Active-path settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Location suffixes stripped before matching.
    pub special_paths: Vec<String>,
}

/// Render view settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Omit pages flagged `hidePage`.
    pub skip_hidden: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { skip_hidden: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`records.path`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(records_path) = &settings.records_path {
            self.records_resolved.path.clone_from(records_path);
        }
        if let Some(bucket) = &settings.bucket {
            self.records_resolved.bucket = Some(bucket.clone());
        }
        if let Some(key) = settings.collapse_key {
            self.collapse_resolved.key = key;
        }
        if let Some(state_file) = &settings.state_file {
            self.collapse_resolved.state_file.clone_from(state_file);
        }
        if let Some(persist) = settings.persist {
            self.collapse_resolved.persist = persist;
        }
        if let Some(skip_hidden) = settings.skip_hidden {
            self.view.skip_hidden = skip_hidden;
        }
    }

    /// Tree builder options.
    #[must_use]
    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            section_depth: self.tree.section_depth,
            index_segment: self.tree.index_segment.clone(),
        }
    }

    /// Active-path matcher.
    #[must_use]
    pub fn active_matcher(&self) -> ActiveMatcher {
        ActiveMatcher {
            special_paths: self.location.special_paths.clone(),
            index_segment: self.tree.index_segment.clone(),
        }
    }

    /// Render view options.
    #[must_use]
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            skip_hidden: self.view.skip_hidden,
            materialize_all: false,
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            records: RecordsConfigRaw::default(),
            tree: TreeConfig::default(),
            collapse: CollapseConfigRaw::default(),
            location: LocationConfig::default(),
            view: ViewConfig::default(),
            records_resolved: RecordsConfig {
                path: base.join("pages.json"),
                bucket: None,
            },
            collapse_resolved: CollapseConfig {
                key: CollapseKey::default(),
                state_file: base.join(PROJECT_DIRNAME).join("state.json"),
                persist: true,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called by [`Config::load`] once CLI settings are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_tree()?;
        self.validate_location()?;
        if let Some(bucket) = &self.records_resolved.bucket {
            require_non_empty(bucket, "records.bucket")?;
        }
        Ok(())
    }

    /// Validate tree configuration.
    fn validate_tree(&self) -> Result<(), ConfigError> {
        if self.tree.section_depth == 0 {
            return Err(ConfigError::Validation(
                "tree.section_depth must be greater than 0".to_owned(),
            ));
        }

        require_non_empty(&self.tree.index_segment, "tree.index_segment")?;
        if self.tree.index_segment.contains('/') {
            return Err(ConfigError::Validation(
                "tree.index_segment cannot contain '/'".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate location configuration.
    fn validate_location(&self) -> Result<(), ConfigError> {
        for special in &self.location.special_paths {
            require_non_empty(special, "location.special_paths")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.records.path {
            self.records.path = Some(expand::expand_env(path, "records.path")?);
        }
        if let Some(ref bucket) = self.records.bucket {
            self.records.bucket = Some(expand::expand_env(bucket, "records.bucket")?);
        }
        if let Some(ref state_file) = self.collapse.state_file {
            self.collapse.state_file =
                Some(expand::expand_env(state_file, "collapse.state_file")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.records_resolved = RecordsConfig {
            path: config_dir.join(self.records.path.as_deref().unwrap_or("pages.json")),
            bucket: self.records.bucket.clone(),
        };

        let state_file = match self.collapse.state_file.as_deref() {
            Some(file) => config_dir.join(file),
            None => config_dir.join(PROJECT_DIRNAME).join("state.json"),
        };
        self.collapse_resolved = CollapseConfig {
            key: self.collapse.key,
            state_file,
            persist: self.collapse.persist,
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.records_resolved.path, PathBuf::from("/test/pages.json"));
        assert!(config.records_resolved.bucket.is_none());
        assert_eq!(config.tree.section_depth, 2);
        assert_eq!(config.tree.index_segment, "index");
        assert_eq!(config.collapse_resolved.key, CollapseKey::Label);
        assert_eq!(
            config.collapse_resolved.state_file,
            PathBuf::from("/test/.docnav/state.json")
        );
        assert!(config.collapse_resolved.persist);
        assert!(config.location.special_paths.is_empty());
        assert!(config.view.skip_hidden);
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.tree.section_depth, 2);
        assert_eq!(config.tree.index_segment, "index");
    }

    #[test]
    fn test_parse_tree_config() {
        let toml = r#"
[tree]
section_depth = 3
index_segment = "_index"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let options = config.tree_options();
        assert_eq!(options.section_depth, 3);
        assert_eq!(options.index_segment, "_index");
    }

    #[test]
    fn test_parse_collapse_key_path() {
        let toml = r#"
[collapse]
key = "path"
persist = false
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.collapse_resolved.key, CollapseKey::Path);
        assert!(!config.collapse_resolved.persist);
    }

    #[test]
    fn test_parse_invalid_collapse_key_fails() {
        let toml = r#"
[collapse]
key = "title"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_location_config() {
        let toml = r#"
[location]
special_paths = ["/legacy", "-old"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let matcher = config.active_matcher();
        assert_eq!(
            matcher.special_paths,
            vec!["/legacy".to_owned(), "-old".to_owned()]
        );
        assert_eq!(matcher.index_segment, "index");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[records]
path = "content/pages.yaml"
bucket = "orm"

[collapse]
state_file = "state/nav.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.records_resolved.path,
            PathBuf::from("/project/content/pages.yaml")
        );
        assert_eq!(config.records_resolved.bucket.as_deref(), Some("orm"));
        assert_eq!(
            config.collapse_resolved.state_file,
            PathBuf::from("/project/state/nav.json")
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.records_resolved.path,
            PathBuf::from("/project/pages.json")
        );
        assert_eq!(
            config.collapse_resolved.state_file,
            PathBuf::from("/project/.docnav/state.json")
        );
    }

    #[test]
    fn test_validate_zero_section_depth() {
        let toml = r"
[tree]
section_depth = 0
";
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("section_depth"));
    }

    #[test]
    fn test_validate_index_segment_with_slash() {
        let toml = r#"
[tree]
index_segment = "a/index"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("index_segment"));
    }

    #[test]
    fn test_validate_empty_special_path() {
        let toml = r#"
[location]
special_paths = [""]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("location.special_paths"));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("docnav.toml");
        std::fs::write(
            &config_path,
            r#"
[records]
path = "content/pages.json"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(
            config.records_resolved.path,
            temp_dir.path().join("content/pages.json")
        );
        assert_eq!(config.config_path, Some(config_path));
    }

    #[test]
    fn test_load_expands_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_TEST_CONTENT_DIR", "/srv/content");
        }
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("docnav.toml");
        std::fs::write(
            &config_path,
            r#"
[records]
path = "${DOCNAV_TEST_CONTENT_DIR}/pages.json"
bucket = "${DOCNAV_TEST_UNSET_NAV_BUCKET:-orm}"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(
            config.records_resolved.path,
            PathBuf::from("/srv/content/pages.json")
        );
        assert_eq!(config.records_resolved.bucket.as_deref(), Some("orm"));
        unsafe {
            std::env::remove_var("DOCNAV_TEST_CONTENT_DIR");
        }
    }

    #[test]
    fn test_load_missing_explicit_config() {
        let result = Config::load(Some(Path::new("/nonexistent/docnav.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("docnav.toml");
        std::fs::write(&config_path, "[tree\nsection_depth = 2").unwrap();

        let result = Config::load(Some(&config_path), None);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_validates_file_values() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("docnav.toml");
        std::fs::write(&config_path, "[records]\nbucket = \"\"\n").unwrap();

        let result = Config::load(Some(&config_path), None);

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_validates_cli_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("docnav.toml");
        std::fs::write(&config_path, "").unwrap();
        let overrides = CliSettings {
            bucket: Some(String::new()),
            ..Default::default()
        };

        let err = Config::load(Some(&config_path), Some(&overrides)).unwrap_err();

        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("records.bucket"));
    }

    #[test]
    fn test_apply_cli_settings_records() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            records_path: Some(PathBuf::from("/custom/pages.yaml")),
            bucket: Some("platform".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.records_resolved.path,
            PathBuf::from("/custom/pages.yaml")
        );
        assert_eq!(config.records_resolved.bucket.as_deref(), Some("platform"));
        assert_eq!(
            config.collapse_resolved.state_file,
            PathBuf::from("/test/.docnav/state.json")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_collapse() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            collapse_key: Some(CollapseKey::Path),
            state_file: Some(PathBuf::from("/tmp/state.json")),
            persist: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.collapse_resolved.key, CollapseKey::Path);
        assert_eq!(
            config.collapse_resolved.state_file,
            PathBuf::from("/tmp/state.json")
        );
        assert!(!config.collapse_resolved.persist);
    }

    #[test]
    fn test_apply_cli_settings_skip_hidden() {
        let mut config = Config::default_with_base(Path::new("/test"));
        assert!(config.view_options().skip_hidden);

        let overrides = CliSettings {
            skip_hidden: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(!config.view_options().skip_hidden);
    }
}
