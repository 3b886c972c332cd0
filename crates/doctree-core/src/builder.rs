//! Flat-list-to-tree transformation.
//!
//! [`TreeBuilder`] groups a flat list of JSON records by their parent field
//! and recursively attaches each group as the `children` of the record whose
//! id it is keyed by. Field names are configurable so the same engine serves
//! differently-named schemas (documentation index records, markdown heading
//! outlines).
//!
//! Sibling order preserves input order within each parent group throughout;
//! the builder never sorts.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::error::TreeError;
use crate::node::{FlatRecord, TreeNode};

/// Field name carrying the initial-expand flag in wire records.
pub const OPEN_KEY: &str = "open";
/// Field name carrying the current-page marker in wire records.
pub const SELECTED_KEY: &str = "selected";

type Group = Vec<Map<String, Value>>;

/// Converts a flat record list into a nested tree.
///
/// Records whose parent value equals the root sentinel become the top level;
/// records whose parent matches no id (dangling references) are silently
/// omitted. A record that is its own transitive ancestor fails with
/// [`TreeError::CycleDetected`] instead of looping.
///
/// # Example
///
/// ```
/// use doctree_core::TreeBuilder;
/// use serde_json::json;
///
/// let flat = vec![
///     json!({ "id": "ns1", "parent_id": 0 }),
///     json!({ "id": "ns1\\Foo", "parent_id": "ns1" }),
/// ];
/// let tree = TreeBuilder::new().build(&flat).unwrap();
/// assert_eq!(tree.len(), 1);
/// assert_eq!(tree[0]["children"].as_array().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    id_key: String,
    parent_key: String,
    children_key: String,
    root_key: String,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Builder for the default wire schema (`id` / `parent_id` / `children`,
    /// root sentinel `0`).
    #[must_use]
    pub fn new() -> Self {
        Self {
            id_key: "id".to_owned(),
            parent_key: "parent_id".to_owned(),
            children_key: "children".to_owned(),
            root_key: "0".to_owned(),
        }
    }

    /// Set the field name holding each record's id.
    #[must_use]
    pub fn with_id_key(mut self, key: impl Into<String>) -> Self {
        self.id_key = key.into();
        self
    }

    /// Set the field name holding each record's parent reference.
    #[must_use]
    pub fn with_parent_key(mut self, key: impl Into<String>) -> Self {
        self.parent_key = key.into();
        self
    }

    /// Set the field name the nested children are attached under.
    #[must_use]
    pub fn with_children_key(mut self, key: impl Into<String>) -> Self {
        self.children_key = key.into();
        self
    }

    /// Set the root sentinel. Parent values equal to it mark top-level
    /// records. JSON numbers normalize to their decimal string, so the
    /// default `"0"` matches a numeric `0` on the wire.
    #[must_use]
    pub fn with_root_key(mut self, key: impl Into<String>) -> Self {
        self.root_key = key.into();
        self
    }

    /// Build the nested tree.
    ///
    /// Returns an empty vec when no record uses the root sentinel.
    pub fn build(&self, flat: &[Value]) -> Result<Vec<Value>, TreeError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("tree_build", records = flat.len()).entered();

        let mut grouped: HashMap<String, Group> = HashMap::new();
        for value in flat {
            let record = value.as_object().ok_or(TreeError::NotAnObject)?.clone();
            let parent = self.group_key(record.get(&self.parent_key));
            grouped.entry(parent).or_default().push(record);
        }

        let Some(roots) = grouped.get(&self.root_key) else {
            return Ok(Vec::new());
        };

        let mut visited = HashSet::new();
        self.attach(roots.clone(), &grouped, &mut visited)
    }

    /// Mark every ancestor of the selected record open.
    ///
    /// Finds the unique record whose [`SELECTED_KEY`] field is `true` and
    /// walks its parent chain, setting [`OPEN_KEY`] to `true` on each record
    /// visited, up to and including the top-level ancestor. Zero or multiple
    /// selected records degrade to a no-op; a dangling parent stops the walk.
    pub fn open_ancestors(&self, flat: &mut [Value]) {
        let mut selected = flat.iter().enumerate().filter_map(|(index, value)| {
            value
                .get(SELECTED_KEY)
                .and_then(Value::as_bool)
                .unwrap_or(false)
                .then_some(index)
        });
        let (Some(mut current), None) = (selected.next(), selected.next()) else {
            return;
        };

        let mut seen = HashSet::new();
        loop {
            if !seen.insert(current) {
                // cyclic parent chain; stop rather than loop
                return;
            }
            let parent = self.group_key(flat[current].get(&self.parent_key));
            if parent == self.root_key {
                return;
            }
            let Some(next) = flat
                .iter()
                .position(|value| self.value_id(value).as_deref() == Some(parent.as_str()))
            else {
                return;
            };
            if let Some(record) = flat[next].as_object_mut() {
                record.insert(OPEN_KEY.to_owned(), Value::Bool(true));
            }
            current = next;
        }
    }

    fn attach(
        &self,
        records: Group,
        grouped: &HashMap<String, Group>,
        visited: &mut HashSet<String>,
    ) -> Result<Vec<Value>, TreeError> {
        let mut out = Vec::with_capacity(records.len());
        for mut record in records {
            let id = self.record_id(&record)?;
            if !visited.insert(id.clone()) {
                return Err(TreeError::CycleDetected { id });
            }
            if let Some(children) = grouped.get(&id) {
                let nested = self.attach(children.clone(), grouped, visited)?;
                record.insert(self.children_key.clone(), Value::Array(nested));
            }
            out.push(Value::Object(record));
        }
        Ok(out)
    }

    fn record_id(&self, record: &Map<String, Value>) -> Result<String, TreeError> {
        match record.get(&self.id_key) {
            Some(Value::String(id)) => Ok(id.clone()),
            Some(Value::Number(id)) => Ok(id.to_string()),
            _ => Err(TreeError::MissingField {
                field: self.id_key.clone(),
            }),
        }
    }

    fn value_id(&self, value: &Value) -> Option<String> {
        match value.get(&self.id_key) {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Normalize a parent value to a grouping key. Numbers become their
    /// decimal string, absent and null parents the root sentinel. The empty
    /// string stays a (dangling) key of its own.
    fn group_key(&self, value: Option<&Value>) -> String {
        match value {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            None | Some(Value::Null) => self.root_key.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Build the nested tree for a typed record list using the default wire
/// schema.
pub fn records_to_tree(records: &[FlatRecord]) -> Result<Vec<TreeNode>, TreeError> {
    let flat = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| TreeError::Schema(err.to_string()))?;
    let nested = TreeBuilder::new().build(&flat)?;
    serde_json::from_value(Value::Array(nested)).map_err(|err| TreeError::Schema(err.to_string()))
}

/// Typed counterpart of [`TreeBuilder::open_ancestors`]: mark every ancestor
/// of the unique selected record open. Zero or multiple selected records
/// degrade to a no-op.
pub fn open_ancestors_records(records: &mut [FlatRecord]) {
    let mut selected = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| record.selected.then_some(index));
    let (Some(mut current), None) = (selected.next(), selected.next()) else {
        return;
    };

    let mut seen = HashSet::new();
    loop {
        if !seen.insert(current) {
            return;
        }
        let Some(parent) = records[current].parent_id.as_id().map(str::to_owned) else {
            return;
        };
        let Some(next) = records.iter().position(|record| record.id == parent) else {
            return;
        };
        records[next].open = true;
        current = next;
    }
}
