#![forbid(unsafe_code)]

//! Core data model and pure transforms for doctree.
//!
//! A documentation index emits an ordered flat list of records, each carrying
//! its own id and a reference to its parent's id. This crate turns that list
//! into a nested tree ([`TreeBuilder`]), marks the selected record's ancestor
//! chain open ([`TreeBuilder::open_ancestors`]), and provides the
//! single-threaded pub/sub primitive ([`EventChannel`]) the widget layer
//! emits its lifecycle events on.
//!
//! All transforms here are pure and synchronous; malformed input degrades
//! (missing branches, no auto-expand) instead of aborting, with the single
//! exception of cyclic ancestry, which fails fast with
//! [`TreeError::CycleDetected`].

pub mod builder;
pub mod emitter;
pub mod error;
pub mod headings;
pub mod node;

pub use builder::{OPEN_KEY, SELECTED_KEY, TreeBuilder, open_ancestors_records, records_to_tree};
pub use emitter::{EventChannel, ListenerId};
pub use error::TreeError;
pub use headings::{HeadingRecord, heading_outline};
pub use node::{FlatRecord, NO_LINK, NodeKind, ParentRef, TreeNode};
