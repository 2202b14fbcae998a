//! `docnav tree` command implementation.

use std::fmt::Write;

use clap::Args;
use docnav_tree::{RenderContext, ViewNode, render};

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::session::Session;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Current page location; marks and expands the active trail.
    #[arg(short, long)]
    location: Option<String>,

    /// Print JSON instead of an indented tree.
    #[arg(long)]
    json: bool,

    /// Include children of collapsed nodes.
    #[arg(long)]
    all: bool,

    /// Include pages flagged hidePage.
    #[arg(long)]
    show_hidden: bool,
}

impl TreeArgs {
    /// Execute the tree command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self
            .common
            .load_config(self.show_hidden.then_some(false))?;
        let mut session = Session::open(config)?;

        if let Some(location) = &self.location {
            let expanded = session
                .store
                .expand_active(&session.tree, location, &session.matcher);
            tracing::info!(location = %location, expanded = expanded.len(), "Active trail expanded");
        }

        let mut options = session.config.view_options();
        options.materialize_all = self.all;
        let ctx = RenderContext {
            store: &session.store,
            matcher: &session.matcher,
            location: self.location.as_deref(),
            options,
        };
        let view = render(&session.tree, &ctx);

        if self.json {
            output.print(&serde_json::to_string_pretty(&view)?);
        } else if view.is_empty() {
            output.warning("Navigation tree is empty");
        } else {
            for line in format_lines(&view) {
                if line.current {
                    output.print_highlight(&line.text);
                } else if line.top_level {
                    output.print_bold(&line.text);
                } else {
                    output.print(&line.text);
                }
            }
        }

        session.save()?;
        Ok(())
    }
}

/// One line of the indented tree.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TreeLine {
    pub(crate) text: String,
    pub(crate) top_level: bool,
    pub(crate) current: bool,
}

/// Format a rendered view as indented lines.
///
/// `▾`/`▸` mark expanded/collapsed nodes, `-` nodes without a toggle.
/// The current page trail ends with `*`.
pub(crate) fn format_lines(nodes: &[ViewNode]) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    for node in nodes {
        push_lines(node, &mut lines);
    }
    lines
}

fn push_lines(node: &ViewNode, lines: &mut Vec<TreeLine>) {
    let marker = match (node.has_toggle, node.expanded) {
        (true, true) => "▾",
        (true, false) => "▸",
        (false, _) => "-",
    };

    let mut text = format!("{}{marker} {}", "  ".repeat(node.depth), node.title);
    for badge in badges(node) {
        let _ = write!(text, " [{badge}]");
    }
    if let Some(url) = &node.url {
        let _ = write!(text, "  ({url})");
    }
    if node.is_current {
        text.push_str(" *");
    }

    lines.push(TreeLine {
        text,
        top_level: node.is_top_level,
        current: node.is_current,
    });

    for child in &node.children {
        push_lines(child, lines);
    }
}

fn badges(node: &ViewNode) -> Vec<String> {
    let flags = &node.flags;
    let mut badges = Vec::new();
    if flags.preview {
        badges.push("preview".to_owned());
    }
    if flags.early_access {
        badges.push("early access".to_owned());
    }
    if flags.deprecated {
        badges.push("deprecated".to_owned());
    }
    if let Some(duration) = &flags.duration {
        badges.push(duration.clone());
    }
    badges
}

#[cfg(test)]
mod tests {
    use docnav_tree::{
        ActiveMatcher, CollapseKey, CollapseStore, PageFlags, PageRecord, ViewOptions, build_tree,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn lines_for(records: &[PageRecord], location: Option<&str>) -> Vec<String> {
        let tree = build_tree(records);
        let mut store = CollapseStore::from_tree(&tree, CollapseKey::Label);
        let matcher = ActiveMatcher::default();
        if let Some(location) = location {
            store.expand_active(&tree, location, &matcher);
        }
        let ctx = RenderContext {
            store: &store,
            matcher: &matcher,
            location,
            options: ViewOptions::default(),
        };
        format_lines(&render(&tree, &ctx))
            .into_iter()
            .map(|line| line.text)
            .collect()
    }

    #[test]
    fn test_format_collapsed_tree() {
        let records = vec![
            PageRecord::new("/orm/index", "ORM"),
            PageRecord::new("/orm/client/index", "Client"),
            PageRecord::new("/orm/client/queries", "Queries"),
            PageRecord::new("/orm/overview", "Overview"),
        ];

        let lines = lines_for(&records, None);

        assert_eq!(
            lines,
            vec![
                "- ORM  (/orm)",
                "  ▸ Client  (/orm/client)",
                "  - Overview  (/orm/overview)",
            ]
        );
    }

    #[test]
    fn test_format_active_trail() {
        let records = vec![
            PageRecord::new("/orm/index", "ORM"),
            PageRecord::new("/orm/client/index", "Client"),
            PageRecord::new("/orm/client/queries", "Queries"),
        ];

        let lines = lines_for(&records, Some("/orm/client/queries"));

        assert_eq!(
            lines,
            vec![
                "- ORM  (/orm) *",
                "  ▾ Client  (/orm/client) *",
                "    - Queries  (/orm/client/queries) *",
            ]
        );
    }

    #[test]
    fn test_format_badges() {
        let flags = PageFlags {
            preview: true,
            deprecated: true,
            duration: Some("5 min".to_owned()),
            ..PageFlags::default()
        };
        let records = vec![PageRecord::new("/guide", "Guide").with_flags(flags)];

        let lines = lines_for(&records, None);

        assert_eq!(lines, vec!["- Guide [preview] [deprecated] [5 min]  (/guide)"]);
    }

    #[test]
    fn test_format_structural_node_without_url() {
        let records = vec![PageRecord::new("/orm/index", "ORM"), PageRecord::new("/orm/reference/api", "API")];

        let lines = lines_for(&records, None);

        assert_eq!(lines, vec!["- ORM  (/orm)", "  ▸ reference"]);
    }

    #[test]
    fn test_format_line_flags() {
        let tree = build_tree(&[PageRecord::new("/orm/index", "ORM")]);
        let store = CollapseStore::from_tree(&tree, CollapseKey::Label);
        let matcher = ActiveMatcher::default();
        let ctx = RenderContext {
            store: &store,
            matcher: &matcher,
            location: None,
            options: ViewOptions::default(),
        };

        let lines = format_lines(&render(&tree, &ctx));

        assert_eq!(
            lines,
            vec![TreeLine {
                text: "- ORM  (/orm)".to_owned(),
                top_level: true,
                current: false,
            }]
        );
    }
}
