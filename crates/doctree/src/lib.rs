#![forbid(unsafe_code)]

//! Doctree public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates and offers a lightweight
//! prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use doctree_core::builder::{
    OPEN_KEY, SELECTED_KEY, TreeBuilder, open_ancestors_records, records_to_tree,
};
pub use doctree_core::emitter::{EventChannel, ListenerId};
pub use doctree_core::error::TreeError;
pub use doctree_core::headings::{HeadingRecord, heading_outline};
pub use doctree_core::node::{FlatRecord, NO_LINK, NodeKind, ParentRef, TreeNode};

// --- Widget re-exports ------------------------------------------------------

pub use doctree_widgets::arena::{Element, ElementArena, ElementId};
pub use doctree_widgets::select::{
    Click, ClickResult, Direction, FocusToken, SelectTree, TreeOptions,
};
pub use doctree_widgets::simple::{
    EVENT_ACTION, EVENT_CREATED, EVENT_SELECT, SimpleTree, TreeEvent,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Click, ClickResult, Direction, ElementId, FlatRecord, NodeKind, ParentRef, SelectTree,
        SimpleTree, TreeBuilder, TreeError, TreeEvent, TreeNode, TreeOptions,
        open_ancestors_records, records_to_tree,
    };

    pub use crate::{core, widgets};
}

pub use doctree_core as core;
pub use doctree_widgets as widgets;
