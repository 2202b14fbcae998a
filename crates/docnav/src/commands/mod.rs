//! CLI command implementations.

pub(crate) mod state;
pub(crate) mod toggle;
pub(crate) mod tree;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use docnav_config::{CliSettings, Config};
use docnav_tree::CollapseKey;

use crate::error::CliError;

pub(crate) use state::StateArgs;
pub(crate) use toggle::ToggleArgs;
pub(crate) use tree::TreeArgs;

/// Collapse key mode as a CLI value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum KeyArg {
    /// Key by segment label.
    Label,
    /// Key by full segment path.
    Path,
}

impl From<KeyArg> for CollapseKey {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::Label => Self::Label,
            KeyArg::Path => Self::Path,
        }
    }
}

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page record file, JSON or YAML (overrides config).
    #[arg(short, long, env = "DOCNAV_RECORDS")]
    records: Option<PathBuf>,

    /// Only build the tree for this bucket (overrides config).
    #[arg(short, long)]
    bucket: Option<String>,

    /// Collapse state file (overrides config).
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Do not read or write the collapse state file.
    #[arg(long)]
    no_persist: bool,

    /// How collapse state is keyed (overrides config).
    #[arg(long, value_enum)]
    key: Option<KeyArg>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load config with these arguments applied on top.
    pub(crate) fn load_config(&self, skip_hidden: Option<bool>) -> Result<Config, CliError> {
        let settings = self.cli_settings(skip_hidden);
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }

    fn cli_settings(&self, skip_hidden: Option<bool>) -> CliSettings {
        CliSettings {
            records_path: self.records.clone(),
            bucket: self.bucket.clone(),
            collapse_key: self.key.map(CollapseKey::from),
            state_file: self.state_file.clone(),
            persist: self.no_persist.then_some(false),
            skip_hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn test_cli_settings_defaults() {
        let cli = TestCli::parse_from(["docnav"]);

        let settings = cli.common.cli_settings(None);

        assert!(settings.bucket.is_none());
        assert!(settings.collapse_key.is_none());
        assert!(settings.persist.is_none());
        assert!(settings.skip_hidden.is_none());
    }

    #[test]
    fn test_cli_settings_overrides() {
        let cli = TestCli::parse_from([
            "docnav",
            "--records",
            "content/pages.yaml",
            "--bucket",
            "orm",
            "--key",
            "path",
            "--state-file",
            "/tmp/nav.json",
            "--no-persist",
        ]);

        let settings = cli.common.cli_settings(Some(false));

        assert_eq!(settings.records_path, Some(PathBuf::from("content/pages.yaml")));
        assert_eq!(settings.bucket.as_deref(), Some("orm"));
        assert_eq!(settings.collapse_key, Some(CollapseKey::Path));
        assert_eq!(settings.state_file, Some(PathBuf::from("/tmp/nav.json")));
        assert_eq!(settings.persist, Some(false));
        assert_eq!(settings.skip_hidden, Some(false));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let result = TestCli::try_parse_from(["docnav", "--key", "title"]);

        assert!(result.is_err());
    }
}
