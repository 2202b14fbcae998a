//! Sidebar navigation trees for documentation sites.
//!
//! This crate provides:
//! - [`build_tree`] / [`TreeBuilder`]: flat [`PageRecord`]s to a [`NavTree`]
//! - [`CollapseStore`]: persistent expand/collapse state with accordion toggles
//! - [`ActiveMatcher`]: current-page detection and trail auto-expansion
//! - [`render`]: an ordered, non-mutating view of a tree for presentation
//!
//! # Quick Start
//!
//! ```
//! use docnav_tree::{
//!     ActiveMatcher, CollapseKey, CollapseStore, PageRecord, RenderContext, ViewOptions,
//!     build_tree, render,
//! };
//!
//! let records = vec![
//!     PageRecord::new("/orm/index", "ORM"),
//!     PageRecord::new("/orm/client/index", "Client"),
//!     PageRecord::new("/orm/client/queries", "Queries"),
//! ];
//! let tree = build_tree(&records);
//!
//! let mut store = CollapseStore::from_tree(&tree, CollapseKey::Label);
//! let matcher = ActiveMatcher::default();
//! store.expand_active(&tree, "/orm/client/queries", &matcher);
//!
//! let ctx = RenderContext {
//!     store: &store,
//!     matcher: &matcher,
//!     location: Some("/orm/client/queries"),
//!     options: ViewOptions::default(),
//! };
//! let view = render(&tree, &ctx);
//! assert_eq!(view[0].children[0].children[0].label, "queries");
//! ```

mod active;
mod collapse;
mod record;
mod tree;
pub mod url;
mod view;

pub use active::ActiveMatcher;
pub use collapse::{CollapseKey, CollapseSnapshot, CollapseStore};
pub use record::{PageFlags, PageRecord, RecordError, RecordFormat, load_records, parse_records};
pub use tree::{
    DEFAULT_INDEX_SEGMENT, DEFAULT_SECTION_DEPTH, NavTree, TreeBuilder, TreeNode, TreeOptions,
    Walk, build_tree,
};
pub use view::{RenderContext, ViewNode, ViewOptions, render};
