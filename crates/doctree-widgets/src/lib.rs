//! Hierarchical selection-tree widgets for API documentation navigation.
//!
//! The structural layer ([`SimpleTree`]) renders nested nodes into an
//! element arena and answers ancestor/sibling/children queries. The
//! selection layer ([`SelectTree`]) adds a single selection marker,
//! debounced focus restoration, keyboard navigation over visible elements,
//! and click semantics, plus JSON ingestion and static HTML rendering.

#![forbid(unsafe_code)]

pub mod arena;
pub mod html;
pub mod ingest;
pub mod select;
pub mod simple;

pub use arena::{Element, ElementArena, ElementId};
pub use select::{Click, ClickResult, Direction, FocusToken, SelectTree, TreeOptions};
pub use simple::{EVENT_ACTION, EVENT_CREATED, EVENT_SELECT, SimpleTree, TreeEvent};
