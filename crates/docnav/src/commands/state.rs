//! `docnav state` command implementation.

use clap::Args;
use docnav_tree::CollapseStore;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::session::{read_snapshot, write_snapshot};

/// Arguments for the state command.
#[derive(Args)]
pub(crate) struct StateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Forget all saved collapse state.
    #[arg(long)]
    reset: bool,
}

impl StateArgs {
    /// Execute the state command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config(None)?;
        let collapse = &config.collapse_resolved;

        if !collapse.persist {
            output.warning("Collapse state persistence is disabled");
            return Ok(());
        }

        let snapshot = read_snapshot(&collapse.state_file)?;

        if self.reset {
            let mut store = CollapseStore::new(collapse.key);
            let cleared = snapshot.as_ref().map_or(0, |snapshot| snapshot.collapsed.len());
            if let Some(snapshot) = snapshot {
                store.restore(snapshot);
            }
            store.reset();
            write_snapshot(&collapse.state_file, &store.snapshot())?;
            output.success(&format!(
                "Cleared {cleared} entries from {}",
                collapse.state_file.display()
            ));
            return Ok(());
        }

        match snapshot {
            Some(snapshot) => output.print(&serde_json::to_string_pretty(&snapshot)?),
            None => output.info(&format!(
                "No collapse state at {}",
                collapse.state_file.display()
            )),
        }
        Ok(())
    }
}
