//! Render view over a navigation tree.
//!
//! [`render`] walks a [`NavTree`] without mutating it and returns a new
//! structure ready for presentation:
//! - siblings sorted by label (case-sensitive byte order)
//! - the `/` node suppressed
//! - collapsed subtrees left out
//! - `is_last_level`, `has_toggle` and `is_current` precomputed

use serde::Serialize;

use crate::active::ActiveMatcher;
use crate::collapse::CollapseStore;
use crate::record::PageFlags;
use crate::tree::{NavTree, TreeNode};

/// Options for [`render`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Omit nodes flagged `hidePage`.
    pub skip_hidden: bool,
    /// Include children of collapsed nodes.
    pub materialize_all: bool,
}

/// Inputs shared by every node of a render pass.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    /// Collapse state.
    pub store: &'a CollapseStore,
    /// Active-path matcher.
    pub matcher: &'a ActiveMatcher,
    /// Current location, if any.
    pub location: Option<&'a str>,
    /// Render options.
    pub options: ViewOptions,
}

/// Rendered navigation node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewNode {
    /// Path segment.
    pub label: String,
    /// Display title (nav title, title, or label).
    pub title: String,
    /// Link target. `None` for structural nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Presentation flags.
    #[serde(flatten)]
    pub flags: PageFlags,
    /// Nesting depth, 0 for root items.
    pub depth: usize,
    /// Top-level section.
    pub is_top_level: bool,
    /// No child of this node has children of its own.
    pub is_last_level: bool,
    /// Node has a disclosure control.
    pub has_toggle: bool,
    /// Subtree is visible.
    pub expanded: bool,
    /// Node matches the current location.
    pub is_current: bool,
    /// Rendered children. Empty when collapsed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
}

/// Render a tree into an ordered view.
#[must_use]
pub fn render(tree: &NavTree, ctx: &RenderContext<'_>) -> Vec<ViewNode> {
    render_level(tree.items(), 0, ctx)
}

fn is_visible(node: &TreeNode, options: ViewOptions) -> bool {
    if node.url.as_deref() == Some("/") {
        return false;
    }
    !(options.skip_hidden && node.flags.hide_page)
}

fn visible_children<'a>(
    nodes: &'a [TreeNode],
    options: ViewOptions,
) -> impl Iterator<Item = &'a TreeNode> {
    nodes.iter().filter(move |node| is_visible(node, options))
}

fn render_level(nodes: &[TreeNode], depth: usize, ctx: &RenderContext<'_>) -> Vec<ViewNode> {
    let mut sorted: Vec<&TreeNode> = visible_children(nodes, ctx.options).collect();
    sorted.sort_by(|a, b| a.label.cmp(&b.label));
    sorted
        .into_iter()
        .map(|node| render_node(node, depth, ctx))
        .collect()
}

fn render_node(node: &TreeNode, depth: usize, ctx: &RenderContext<'_>) -> ViewNode {
    let has_children = visible_children(&node.children, ctx.options).next().is_some();
    let expanded = has_children && ctx.store.is_expanded(node);
    let is_last_level = visible_children(&node.children, ctx.options)
        .all(|child| visible_children(&child.children, ctx.options).next().is_none());

    let children = if expanded || ctx.options.materialize_all {
        render_level(&node.children, depth + 1, ctx)
    } else {
        Vec::new()
    };

    ViewNode {
        label: node.label.clone(),
        title: node.display_title().to_owned(),
        url: node.url.clone(),
        flags: node.flags.clone(),
        depth,
        is_top_level: node.is_top_level,
        is_last_level,
        has_toggle: has_children && !node.is_pinned(),
        expanded,
        is_current: ctx
            .location
            .is_some_and(|location| ctx.matcher.is_current_node(location, node)),
        children,
    }
}
