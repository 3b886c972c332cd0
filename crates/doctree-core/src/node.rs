//! Wire and nested data model for navigation-tree records.
//!
//! A documentation index produces an ordered list of [`FlatRecord`]s, each
//! referencing its parent by id. The builder re-expresses the same records
//! as nested [`TreeNode`]s with an explicit `children` field.
//!
//! # Design Notes
//!
//! - `TreeNode::children` is `None` for leaves, never an empty vec: consumers
//!   that branch on field presence must be able to tell a leaf apart from a
//!   branch whose children all failed to match.
//! - The root sentinel (JSON `0`, `null`, or a missing parent field) is a
//!   reserved value distinct from any real id; see [`ParentRef`].

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Placeholder link meaning "no navigation".
pub const NO_LINK: &str = "#";

/// Kind of a tree node: an expandable group or a leaf action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Expandable group (namespace, heading section).
    Folder,
    /// Leaf action (class, interface, trait, function group).
    File,
}

/// Reference to a record's parent: the reserved root sentinel or another
/// record's id.
///
/// On the wire the sentinel is the number `0`; `null` and an absent field
/// parse to it as well. Any string, including the empty string, is an id —
/// an empty-string parent is simply a dangling reference and the record is
/// omitted from the built tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ParentRef {
    /// Top-level record.
    #[default]
    Root,
    /// Id of the parent record.
    Id(String),
}

impl ParentRef {
    /// Shorthand for `ParentRef::Id`.
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    /// The parent id, or `None` for the root sentinel.
    #[must_use]
    pub fn as_id(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Id(id) => Some(id),
        }
    }

    /// Whether this is the root sentinel.
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Root => serializer.serialize_u64(0),
            Self::Id(id) => serializer.serialize_str(id),
        }
    }
}

impl<'de> Deserialize<'de> for ParentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParentRefVisitor;

        impl<'de> Visitor<'de> for ParentRefVisitor {
            type Value = ParentRef;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a parent id string or the root sentinel 0")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ParentRef, E> {
                Ok(if v == 0 {
                    ParentRef::Root
                } else {
                    ParentRef::Id(v.to_string())
                })
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ParentRef, E> {
                Ok(if v == 0 {
                    ParentRef::Root
                } else {
                    ParentRef::Id(v.to_string())
                })
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ParentRef, E> {
                Ok(ParentRef::Id(v.to_owned()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<ParentRef, E> {
                Ok(ParentRef::Root)
            }

            fn visit_none<E: de::Error>(self) -> Result<ParentRef, E> {
                Ok(ParentRef::Root)
            }
        }

        deserializer.deserialize_any(ParentRefVisitor)
    }
}

fn default_link() -> String {
    NO_LINK.to_owned()
}

fn is_no_link(link: &str) -> bool {
    link == NO_LINK
}

/// One record of the flat wire format produced by a documentation index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    /// Unique id across the whole flat list.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Informational tag from the producer (namespace, class, heading, ...).
    #[serde(
        rename = "elementType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub element_type: Option<String>,
    /// Folder or file.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Whether this node's subtree is expanded on initial render.
    #[serde(default)]
    pub open: bool,
    /// Whether this node is the current page's node. At most one record per
    /// list may carry it.
    #[serde(default)]
    pub selected: bool,
    /// Parent id, or the root sentinel for top-level records.
    #[serde(default)]
    pub parent_id: ParentRef,
    /// Target URL, or [`NO_LINK`].
    #[serde(default = "default_link", skip_serializing_if = "is_no_link")]
    pub link: String,
}

impl FlatRecord {
    /// Create a top-level folder record with defaults.
    #[must_use]
    pub fn folder(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Folder)
    }

    /// Create a top-level file record with defaults.
    #[must_use]
    pub fn file(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::File)
    }

    fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            element_type: None,
            kind,
            open: false,
            selected: false,
            parent_id: ParentRef::Root,
            link: default_link(),
        }
    }

    /// Set the parent reference.
    #[must_use]
    pub fn with_parent(mut self, parent: ParentRef) -> Self {
        self.parent_id = parent;
        self
    }

    /// Set the target URL.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Set the initial expand flag.
    #[must_use]
    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Mark this record as the current page's node.
    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set the informational element tag.
    #[must_use]
    pub fn with_element_type(mut self, tag: impl Into<String>) -> Self {
        self.element_type = Some(tag.into());
        self
    }

    /// Whether the record carries a real navigation target.
    #[must_use]
    pub fn has_link(&self) -> bool {
        !self.link.is_empty() && self.link != NO_LINK
    }
}

/// A node of the nested tree form: the same fields as [`FlatRecord`] plus
/// an optional ordered `children` sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique id across the whole tree.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Informational tag from the producer.
    #[serde(
        rename = "elementType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub element_type: Option<String>,
    /// Folder or file.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Whether this node's subtree is expanded on initial render.
    #[serde(default)]
    pub open: bool,
    /// Whether this node is the current page's node.
    #[serde(default)]
    pub selected: bool,
    /// Parent id carried over from the flat form.
    #[serde(default)]
    pub parent_id: ParentRef,
    /// Target URL, or [`NO_LINK`].
    #[serde(default = "default_link", skip_serializing_if = "is_no_link")]
    pub link: String,
    /// Child nodes in input order. `None` for leaves — never an empty vec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Create a folder node with defaults.
    #[must_use]
    pub fn folder(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Folder)
    }

    /// Create a file node with defaults.
    #[must_use]
    pub fn file(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::File)
    }

    fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            element_type: None,
            kind,
            open: false,
            selected: false,
            parent_id: ParentRef::Root,
            link: default_link(),
            children: None,
        }
    }

    /// Set the target URL.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Set the initial expand flag.
    #[must_use]
    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Mark this node as the current page's node.
    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set the child sequence.
    #[must_use]
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Whether the node carries a real navigation target.
    #[must_use]
    pub fn has_link(&self) -> bool {
        !self.link.is_empty() && self.link != NO_LINK
    }

    /// Whether the node declares no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parent_ref_wire_round_trip() {
        let root: ParentRef = serde_json::from_value(json!(0)).unwrap();
        assert_eq!(root, ParentRef::Root);

        let id: ParentRef = serde_json::from_value(json!("ns1")).unwrap();
        assert_eq!(id, ParentRef::id("ns1"));

        assert_eq!(serde_json::to_value(ParentRef::Root).unwrap(), json!(0));
        assert_eq!(
            serde_json::to_value(ParentRef::id("ns1")).unwrap(),
            json!("ns1")
        );
    }

    #[test]
    fn parent_ref_null_is_root() {
        let parent: ParentRef = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(parent, ParentRef::Root);
    }

    #[test]
    fn parent_ref_empty_string_is_a_dangling_id() {
        let parent: ParentRef = serde_json::from_value(json!("")).unwrap();
        assert_eq!(parent, ParentRef::id(""));
        assert!(!parent.is_root());
    }

    #[test]
    fn flat_record_parses_index_output() {
        let record: FlatRecord = serde_json::from_value(json!({
            "id": "ns1\\Foo",
            "name": "Foo",
            "elementType": "class",
            "type": "file",
            "open": false,
            "selected": true,
            "parent_id": "ns1",
            "link": "foo.html",
        }))
        .unwrap();

        assert_eq!(record.kind, NodeKind::File);
        assert_eq!(record.parent_id, ParentRef::id("ns1"));
        assert!(record.selected);
        assert!(record.has_link());
    }

    #[test]
    fn flat_record_defaults_flags_and_link() {
        let record: FlatRecord = serde_json::from_value(json!({
            "id": "ns1",
            "name": "ns1",
            "type": "folder",
        }))
        .unwrap();

        assert!(!record.open);
        assert!(!record.selected);
        assert_eq!(record.parent_id, ParentRef::Root);
        assert_eq!(record.link, NO_LINK);
        assert!(!record.has_link());
    }

    #[test]
    fn leaf_serializes_without_children_field() {
        let leaf = TreeNode::file("a", "a");
        let value = serde_json::to_value(&leaf).unwrap();
        assert!(value.get("children").is_none());
    }

    #[test]
    fn branch_with_children_keeps_the_field() {
        let branch = TreeNode::folder("ns", "ns").with_children(vec![TreeNode::file("a", "a")]);
        let value = serde_json::to_value(&branch).unwrap();
        assert_eq!(value["children"].as_array().unwrap().len(), 1);
    }
}
