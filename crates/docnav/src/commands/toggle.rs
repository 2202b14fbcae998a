//! `docnav toggle` command implementation.

use clap::Args;
use docnav_tree::{NavTree, TreeNode};

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::session::Session;

/// Arguments for the toggle command.
#[derive(Args)]
pub(crate) struct ToggleArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Node to toggle: a full path (`/orm/client`), a URL or a segment label.
    node: String,

    /// Collapse every other node except the ancestors of this one.
    #[arg(short, long)]
    exclusive: bool,
}

impl ToggleArgs {
    /// Execute the toggle command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config(None)?;
        let mut session = Session::open(config)?;

        if !session.config.collapse_resolved.persist {
            output.warning("Collapse state is not persisted; the toggle has no lasting effect");
        }

        let node = find_node(&session.tree, &self.node)?;
        let result = session.store.toggle_node(node, self.exclusive);

        match describe(node, result) {
            Outcome::Changed(msg) => output.success(&msg),
            Outcome::Unchanged(msg) => output.warning(&msg),
        }

        session.save()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Changed(String),
    Unchanged(String),
}

fn describe(node: &TreeNode, result: Option<bool>) -> Outcome {
    let title = node.display_title();
    match result {
        Some(true) => Outcome::Changed(format!("Expanded {title}")),
        Some(false) => Outcome::Changed(format!("Collapsed {title}")),
        None if node.is_pinned() => Outcome::Unchanged(format!("{title} is always expanded")),
        None => Outcome::Unchanged(format!("{title} has no children to toggle")),
    }
}

/// Resolve a node argument. Values starting with `/` are full paths or URLs.
fn find_node<'a>(tree: &'a NavTree, node: &str) -> Result<&'a TreeNode, CliError> {
    let found = if node.starts_with('/') {
        tree.find(node).or_else(|| tree.find_by_url(node))
    } else {
        tree.find_by_label(node)
    };
    found.ok_or_else(|| CliError::Validation(format!("Node not found: {node}")))
}
