//! Navigation tree builder.
//!
//! Converts a flat list of [`PageRecord`]s into a [`NavTree`]: an implicit
//! root whose children are [`TreeNode`]s, one per path segment.
//!
//! # Construction Rules
//!
//! - Every directory segment produces a node, even without a page of its own
//!   (a structural node with no URL).
//! - A record ending in the index segment (`/orm/client/index`) is the
//!   landing page of its directory: its fields are copied onto the directory
//!   node and no separate `index` leaf is created.
//! - Re-processing a segment updates the existing node. Later records win.
//! - Children keep insertion order here. [`render`](crate::render) sorts.
//!
//! # Example
//!
//! ```
//! use docnav_tree::{PageRecord, build_tree};
//!
//! let records = vec![
//!     PageRecord::new("/orm/index", "ORM"),
//!     PageRecord::new("/orm/client/index", "Client"),
//!     PageRecord::new("/orm/client/queries", "Queries"),
//! ];
//! let tree = build_tree(&records);
//!
//! let orm = &tree.items()[0];
//! assert_eq!(orm.url.as_deref(), Some("/orm"));
//! assert_eq!(orm.children[0].children[0].label, "queries");
//! ```

use serde::Serialize;

use crate::record::{PageFlags, PageRecord};
use crate::url::page_url;

/// Segment count of a top-level section landing page (`/<section>/index`).
pub const DEFAULT_SECTION_DEPTH: usize = 2;

/// Segment name that marks a section landing page.
pub const DEFAULT_INDEX_SEGMENT: &str = "index";

/// Options controlling tree construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeOptions {
    /// Number of path segments (including the index segment) at which a
    /// section landing page is a top-level section.
    pub section_depth: usize,
    /// Segment name that marks a section landing page.
    pub index_segment: String,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            section_depth: DEFAULT_SECTION_DEPTH,
            index_segment: DEFAULT_INDEX_SEGMENT.to_owned(),
        }
    }
}

impl TreeOptions {
    /// Whether a record with these segments is a top-level section.
    fn is_top_level(&self, segments: &[&str]) -> bool {
        segments.len() == self.section_depth
            && segments.last() == Some(&self.index_segment.as_str())
    }
}

/// Navigation tree node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Path segment this node represents.
    pub label: String,
    /// Slash-joined segment path from the root (e.g. "/orm/client").
    pub full_path: String,
    /// Resolved URL. `None` for structural nodes without a page.
    pub url: Option<String>,
    /// Page title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Navigation title override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_title: Option<String>,
    /// Presentation flags.
    #[serde(flatten)]
    pub flags: PageFlags,
    /// Top-level section landing page.
    pub is_top_level: bool,
    /// Ancestor labels, root first, excluding index segments.
    pub parents: Vec<String>,
    /// Child nodes in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn structural(label: &str, full_path: &str, parents: Vec<String>) -> Self {
        Self {
            label: label.to_owned(),
            full_path: full_path.to_owned(),
            parents,
            ..Self::default()
        }
    }

    fn apply_page(&mut self, record: &PageRecord, url: String, top_level: bool) {
        self.url = Some(url);
        self.title = Some(record.title.clone());
        self.nav_title.clone_from(&record.nav_title);
        self.flags = record.flags.clone();
        self.is_top_level = top_level;
    }

    /// True if a page record was merged onto this node.
    #[must_use]
    pub fn is_page(&self) -> bool {
        self.url.is_some()
    }

    /// Label shown in the sidebar: nav title, then title, then segment.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.nav_title
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or(&self.label)
    }

    /// Pinned nodes are always expanded and have no toggle.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.is_top_level || self.flags.static_link
    }

    /// Whether the node has a disclosure control.
    #[must_use]
    pub fn has_toggle(&self) -> bool {
        !self.children.is_empty() && !self.is_pinned()
    }

    /// Direct child by label.
    #[must_use]
    pub fn child(&self, label: &str) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.label == label)
    }
}

/// Navigation tree with an implicit root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NavTree {
    /// Direct children of the root.
    pub items: Vec<TreeNode>,
}

impl NavTree {
    /// Direct children of the root.
    #[must_use]
    pub fn items(&self) -> &[TreeNode] {
        &self.items
    }

    /// Pre-order traversal over every node.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.items.iter().rev().collect(),
        }
    }

    /// Total number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    /// True if the root has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Node by full segment path (e.g. "/orm/client").
    #[must_use]
    pub fn find(&self, full_path: &str) -> Option<&TreeNode> {
        let mut segments = full_path.split('/').filter(|s| !s.is_empty());
        let first = segments.next()?;
        let mut node = self.items.iter().find(|n| n.label == first)?;
        for segment in segments {
            node = node.child(segment)?;
        }
        Some(node)
    }

    /// First node in pre-order with the given label.
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<&TreeNode> {
        self.walk().find(|node| node.label == label)
    }

    /// First node in pre-order with the given resolved URL.
    #[must_use]
    pub fn find_by_url(&self, url: &str) -> Option<&TreeNode> {
        self.walk().find(|node| node.url.as_deref() == Some(url))
    }
}

/// Pre-order iterator over tree nodes.
pub struct Walk<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Builder for [`NavTree`] instances.
#[derive(Clone, Debug, Default)]
pub struct TreeBuilder {
    options: TreeOptions,
    bucket: Option<String>,
}

impl TreeBuilder {
    /// Create a builder with the given options.
    #[must_use]
    pub fn new(options: TreeOptions) -> Self {
        Self {
            options,
            bucket: None,
        }
    }

    /// Restrict the tree to records whose first segment is `bucket`.
    #[must_use]
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Build the tree from records.
    #[must_use]
    pub fn build(&self, records: &[PageRecord]) -> NavTree {
        let mut tree = NavTree::default();
        let mut inserted = 0usize;

        for record in records {
            if !self.in_bucket(record) {
                continue;
            }
            if self.insert(&mut tree.items, record) {
                inserted += 1;
            }
        }

        tracing::debug!(
            record_count = records.len(),
            inserted,
            node_count = tree.len(),
            bucket = ?self.bucket,
            "Navigation tree built"
        );

        tree
    }

    fn in_bucket(&self, record: &PageRecord) -> bool {
        let Some(bucket) = &self.bucket else {
            return true;
        };
        record.path.split('/').find(|s| !s.is_empty()) == Some(bucket.as_str())
    }

    /// Insert one record. Returns `false` for records with no segments.
    fn insert(&self, items: &mut Vec<TreeNode>, record: &PageRecord) -> bool {
        let segments: Vec<&str> = record.path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((&last, dirs)) = segments.split_last() else {
            tracing::trace!(path = %record.path, "Skipping record without path segments");
            return false;
        };

        let index = self.options.index_segment.as_str();
        let is_landing = last == index;
        let top_level = self.options.is_top_level(&segments);
        let normalized = format!("/{}", segments.join("/"));
        let url = page_url(&normalized, record.lang(), record.db(), index);

        let mut level = items;
        let mut full_path = String::new();
        let mut parents = Vec::new();

        for (i, &segment) in dirs.iter().enumerate() {
            full_path.push('/');
            full_path.push_str(segment);

            let pos = if let Some(pos) = level.iter().position(|n| n.label == segment) {
                pos
            } else {
                level.push(TreeNode::structural(segment, &full_path, parents.clone()));
                level.len() - 1
            };
            let node = &mut level[pos];

            // Landing page: the directory node is the page
            if is_landing && i + 1 == dirs.len() {
                node.apply_page(record, url, top_level);
                return true;
            }

            if segment != index {
                parents.push(segment.to_owned());
            }
            level = &mut node.children;
        }

        full_path.push('/');
        full_path.push_str(last);

        if let Some(existing) = level.iter_mut().find(|n| n.label == last) {
            existing.apply_page(record, url, top_level);
        } else {
            let mut node = TreeNode::structural(last, &full_path, parents);
            node.apply_page(record, url, top_level);
            level.push(node);
        }
        true
    }
}

/// Build a tree with default options.
#[must_use]
pub fn build_tree(records: &[PageRecord]) -> NavTree {
    TreeBuilder::default().build(records)
}
