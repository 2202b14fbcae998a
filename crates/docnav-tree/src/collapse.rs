//! Collapse state for navigation nodes.
//!
//! [`CollapseStore`] maps node keys to a collapsed flag. It outlives any
//! single [`NavTree`] and is mutated only by [`toggle`](CollapseStore::toggle)
//! and [`expand_active`](CollapseStore::expand_active).
//!
//! # Keys
//!
//! Nodes are keyed by label ([`CollapseKey::Label`]) or by full segment path
//! ([`CollapseKey::Path`]). Label keys are the default. With label keys, two
//! branches that share a folder name (e.g. `overview`) share collapse state.
//!
//! # Defaults
//!
//! - Top-level sections and static links are pinned: always expanded, no toggle.
//! - Every other node is collapsed until toggled.
//! - A key the store has never seen reads as collapsed.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::tree::{NavTree, TreeNode};

/// How nodes are addressed in the collapse store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollapseKey {
    /// Key by segment label.
    #[default]
    Label,
    /// Key by full segment path.
    Path,
}

impl CollapseKey {
    /// Store key for a node.
    #[must_use]
    pub fn key_for(self, node: &TreeNode) -> &str {
        match self {
            Self::Label => &node.label,
            Self::Path => &node.full_path,
        }
    }

    /// Keys of a node's ancestors, root first.
    #[must_use]
    pub fn ancestor_keys(self, node: &TreeNode) -> Vec<String> {
        match self {
            Self::Label => node.parents.clone(),
            Self::Path => {
                let segments: Vec<&str> =
                    node.full_path.split('/').filter(|s| !s.is_empty()).collect();
                (1..segments.len())
                    .map(|end| format!("/{}", segments[..end].join("/")))
                    .collect()
            }
        }
    }
}

/// Serializable collapse state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapseSnapshot {
    /// Key mode the entries were recorded with.
    pub key: CollapseKey,
    /// Collapsed flag per key.
    pub collapsed: BTreeMap<String, bool>,
    /// Keys already expanded for the active page.
    pub auto_expanded: Vec<String>,
}

/// Collapse state keyed by node label or path.
#[derive(Clone, Debug, Default)]
pub struct CollapseStore {
    pub(crate) mode: CollapseKey,
    pub(crate) collapsed: BTreeMap<String, bool>,
    pub(crate) pinned: BTreeSet<String>,
    pub(crate) auto_expanded: BTreeSet<String>,
}

impl CollapseStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(mode: CollapseKey) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Create a store seeded from a tree.
    #[must_use]
    pub fn from_tree(tree: &NavTree, mode: CollapseKey) -> Self {
        let mut store = Self::new(mode);
        store.seed(tree);
        store
    }

    /// Key mode of this store.
    #[must_use]
    pub fn mode(&self) -> CollapseKey {
        self.mode
    }

    /// Register every node of `tree` with its default state.
    ///
    /// A key is pinned only when every node that maps to it is pinned. With
    /// label keys an unpinned node sharing a pinned node's label stays
    /// collapsible. Existing entries keep their value.
    pub fn seed(&mut self, tree: &NavTree) {
        let mut pinned = BTreeSet::new();
        let mut collapsible = BTreeSet::new();
        for node in tree.walk() {
            let key = self.mode.key_for(node).to_owned();
            if node.is_pinned() {
                pinned.insert(key);
            } else {
                collapsible.insert(key);
            }
        }

        for key in &collapsible {
            self.pinned.remove(key);
            self.collapsed.entry(key.clone()).or_insert(true);
        }
        self.pinned
            .extend(pinned.into_iter().filter(|key| !collapsible.contains(key)));

        tracing::trace!(
            known = self.collapsed.len(),
            pinned = self.pinned.len(),
            "Collapse store seeded"
        );
    }

    /// Whether `key` is collapsed. Unknown keys are collapsed.
    #[must_use]
    pub fn is_collapsed(&self, key: &str) -> bool {
        if self.pinned.contains(key) {
            return false;
        }
        self.collapsed.get(key).copied().unwrap_or(true)
    }

    /// Whether a node's subtree is visible.
    #[must_use]
    pub fn is_expanded(&self, node: &TreeNode) -> bool {
        node.is_pinned() || !self.is_collapsed(self.mode.key_for(node))
    }

    /// Whether every node with `key` is pinned.
    #[must_use]
    pub fn is_pinned(&self, key: &str) -> bool {
        self.pinned.contains(key)
    }

    /// Known collapsible keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.collapsed.keys().map(String::as_str)
    }

    /// Toggle a key.
    ///
    /// With `exclusive`, every other known key outside `restrict_to` is
    /// collapsed and `key` is expanded. Otherwise only `key` flips. Pinned
    /// keys are never force-collapsed.
    ///
    /// Returns the new expanded state, or `None` for pinned keys, which
    /// have no toggle.
    pub fn toggle(
        &mut self,
        key: &str,
        exclusive: bool,
        restrict_to: Option<&[String]>,
    ) -> Option<bool> {
        if self.pinned.contains(key) {
            tracing::debug!(key, "Ignoring toggle of pinned node");
            return None;
        }
        Some(self.flip(key, exclusive, restrict_to))
    }

    /// Toggle a node, keeping its ancestors open when `exclusive`.
    ///
    /// Returns `None` without touching the store when the node has no
    /// disclosure control (pinned or childless).
    pub fn toggle_node(&mut self, node: &TreeNode, exclusive: bool) -> Option<bool> {
        if !node.has_toggle() {
            tracing::debug!(path = %node.full_path, "Ignoring toggle of node without disclosure control");
            return None;
        }
        let key = self.mode.key_for(node).to_owned();
        let ancestors = self.mode.ancestor_keys(node);
        Some(self.flip(&key, exclusive, Some(ancestors.as_slice())))
    }

    fn flip(&mut self, key: &str, exclusive: bool, restrict_to: Option<&[String]>) -> bool {
        let expanded = if exclusive {
            for (other, collapsed) in &mut self.collapsed {
                if other == key
                    || self.pinned.contains(other)
                    || restrict_to.is_some_and(|keep| keep.contains(other))
                {
                    continue;
                }
                *collapsed = true;
            }
            self.collapsed.insert(key.to_owned(), false);
            true
        } else {
            let collapsed = self.collapsed.entry(key.to_owned()).or_insert(true);
            *collapsed = !*collapsed;
            !*collapsed
        };

        tracing::debug!(key, exclusive, expanded, "Collapse state toggled");
        expanded
    }

    /// Capture the persistent part of the state.
    #[must_use]
    pub fn snapshot(&self) -> CollapseSnapshot {
        CollapseSnapshot {
            key: self.mode,
            collapsed: self.collapsed.clone(),
            auto_expanded: self.auto_expanded.iter().cloned().collect(),
        }
    }

    /// Replace the state with a snapshot.
    ///
    /// A snapshot recorded with a different key mode is ignored.
    pub fn restore(&mut self, snapshot: CollapseSnapshot) {
        if snapshot.key != self.mode {
            tracing::warn!(
                expected = ?self.mode,
                found = ?snapshot.key,
                "Ignoring collapse state recorded with a different key mode"
            );
            return;
        }
        self.collapsed = snapshot.collapsed;
        self.auto_expanded = snapshot.auto_expanded.into_iter().collect();
    }

    /// Forget all entries, keeping the key mode and pinned keys.
    pub fn reset(&mut self) {
        self.collapsed.clear();
        self.auto_expanded.clear();
    }
}
