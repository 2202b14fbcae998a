//! Active-path resolution.
//!
//! A node is current when the location path includes its URL. Because the
//! test is a substring match, every ancestor of the active page is current
//! too, which is what lets [`CollapseStore::expand_active`] open the trail
//! down to the page being viewed.

use crate::collapse::CollapseStore;
use crate::tree::{DEFAULT_INDEX_SEGMENT, NavTree, TreeNode};
use crate::url::strip_index;

/// Decides which nodes match the current location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveMatcher {
    /// Location suffixes stripped before matching (legacy redirects).
    pub special_paths: Vec<String>,
    /// Segment name that marks a section landing page.
    pub index_segment: String,
}

impl Default for ActiveMatcher {
    fn default() -> Self {
        Self {
            special_paths: Vec::new(),
            index_segment: DEFAULT_INDEX_SEGMENT.to_owned(),
        }
    }
}

impl ActiveMatcher {
    /// Create a matcher with the given special-path suffixes.
    #[must_use]
    pub fn new(special_paths: Vec<String>) -> Self {
        Self {
            special_paths,
            ..Self::default()
        }
    }

    fn normalize_location<'a>(&self, location: &'a str) -> &'a str {
        let location = location.strip_suffix('/').unwrap_or(location);
        self.special_paths
            .iter()
            .find_map(|suffix| location.strip_suffix(suffix.as_str()))
            .unwrap_or(location)
    }

    /// Whether `url` is current for `location`.
    ///
    /// The root URL `/` is never current.
    #[must_use]
    pub fn is_current(&self, location: &str, url: &str) -> bool {
        let url = strip_index(url, &self.index_segment);
        if url == "/" {
            return false;
        }
        self.normalize_location(location).contains(url)
    }

    /// Whether a node is current. Structural nodes never are.
    #[must_use]
    pub fn is_current_node(&self, location: &str, node: &TreeNode) -> bool {
        node.url
            .as_deref()
            .is_some_and(|url| self.is_current(location, url))
    }

    /// Full paths of current nodes in pre-order.
    #[must_use]
    pub fn active_trail<'a>(&self, tree: &'a NavTree, location: &str) -> Vec<&'a str> {
        tree.walk()
            .filter(|node| self.is_current_node(location, node))
            .map(|node| node.full_path.as_str())
            .collect()
    }
}

impl CollapseStore {
    /// Expand current nodes that have a disclosure control.
    ///
    /// Each key is expanded at most once across calls (and across restored
    /// snapshots), so a node collapsed after auto-expansion stays collapsed.
    ///
    /// Returns the keys that were expanded.
    pub fn expand_active(
        &mut self,
        tree: &NavTree,
        location: &str,
        matcher: &ActiveMatcher,
    ) -> Vec<String> {
        let mut expanded = Vec::new();

        for node in tree.walk() {
            if !node.has_toggle() || !matcher.is_current_node(location, node) {
                continue;
            }
            let key = self.mode.key_for(node);
            if self.auto_expanded.contains(key) {
                continue;
            }
            self.auto_expanded.insert(key.to_owned());
            if self.is_collapsed(key) {
                self.collapsed.insert(key.to_owned(), false);
                tracing::debug!(key, location, "Expanded active node");
                expanded.push(key.to_owned());
            }
        }

        expanded
    }
}
