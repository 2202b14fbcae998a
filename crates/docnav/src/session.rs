//! Loaded navigation state shared by the commands.
//!
//! A [`Session`] holds the tree built from the configured record file and
//! the collapse store restored from the state file.

use std::path::Path;

use docnav_config::Config;
use docnav_tree::{ActiveMatcher, CollapseSnapshot, CollapseStore, NavTree, TreeBuilder, load_records};

use crate::error::CliError;

/// Project data directory created next to the config file.
const PROJECT_DIRNAME: &str = ".docnav";

/// Tree and collapse state for one command invocation.
pub(crate) struct Session {
    pub(crate) config: Config,
    pub(crate) tree: NavTree,
    pub(crate) store: CollapseStore,
    pub(crate) matcher: ActiveMatcher,
}

impl Session {
    /// Build the tree and restore collapse state.
    pub(crate) fn open(config: Config) -> Result<Self, CliError> {
        let records = load_records(&config.records_resolved.path)?;

        let mut builder = TreeBuilder::new(config.tree_options());
        if let Some(bucket) = &config.records_resolved.bucket {
            builder = builder.bucket(bucket.clone());
        }
        let tree = builder.build(&records);

        let mut store = CollapseStore::new(config.collapse_resolved.key);
        if config.collapse_resolved.persist
            && let Some(snapshot) = read_snapshot(&config.collapse_resolved.state_file)?
        {
            store.restore(snapshot);
        }
        store.seed(&tree);

        tracing::info!(
            records = records.len(),
            nodes = tree.len(),
            path = %config.records_resolved.path.display(),
            "Navigation tree loaded"
        );

        let matcher = config.active_matcher();
        Ok(Self {
            config,
            tree,
            store,
            matcher,
        })
    }

    /// Persist collapse state if enabled.
    pub(crate) fn save(&self) -> Result<(), CliError> {
        if !self.config.collapse_resolved.persist {
            return Ok(());
        }
        write_snapshot(&self.config.collapse_resolved.state_file, &self.store.snapshot())
    }
}

/// Read a collapse snapshot. A missing file yields `None`.
pub(crate) fn read_snapshot(path: &Path) -> Result<Option<CollapseSnapshot>, CliError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let snapshot = serde_json::from_str(&content).map_err(|source| CliError::State {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(snapshot))
}

/// Write a collapse snapshot, creating parent directories.
pub(crate) fn write_snapshot(path: &Path, snapshot: &CollapseSnapshot) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        ensure_state_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "Collapse state saved");
    Ok(())
}

/// Create the state directory, with a `.gitignore` inside `.docnav/`.
fn ensure_state_dir(dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(dir)?;

    if dir.file_name().is_some_and(|name| name == PROJECT_DIRNAME) {
        let gitignore_path = dir.join(".gitignore");
        if !gitignore_path.exists() {
            let _ = std::fs::write(&gitignore_path, "# Automatically created by docnav\n*\n");
        }
    }

    Ok(())
}
