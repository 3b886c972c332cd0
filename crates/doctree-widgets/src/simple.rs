//! Structural tree layer.
//!
//! [`SimpleTree`] turns nodes into rendered elements (folders are disclosure
//! groups, files are leaf actions) and answers structural queries. It holds
//! no selection state; that belongs to [`crate::select::SelectTree`].

use doctree_core::{EventChannel, NodeKind, TreeNode};

use crate::arena::{Element, ElementArena, ElementId};

/// Event name for element construction.
pub const EVENT_CREATED: &str = "created";
/// Event name for selection changes.
pub const EVENT_SELECT: &str = "select";
/// Event name for file activation.
pub const EVENT_ACTION: &str = "action";

/// Events emitted by the tree widgets on their [`EventChannel`].
#[derive(Debug, Clone)]
pub enum TreeEvent {
    /// An element was built from a node.
    Created {
        /// Handle of the new element.
        element: ElementId,
        /// The node it was built from, after the interrupt hook ran.
        node: TreeNode,
    },
    /// The selection moved to an element.
    Select {
        /// The newly selected element.
        element: ElementId,
    },
    /// The active file element was activated.
    Action {
        /// The active element.
        element: ElementId,
    },
}

type NodeHook = Box<dyn FnMut(TreeNode) -> TreeNode>;

/// Renders nested nodes into a navigable hierarchical structure and exposes
/// structural queries over it.
pub struct SimpleTree {
    arena: ElementArena,
    channel: EventChannel<TreeEvent>,
    interrupt: Option<NodeHook>,
}

impl Default for SimpleTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: ElementArena::new(),
            channel: EventChannel::new(),
            interrupt: None,
        }
    }

    /// The channel lifecycle events are emitted on. Clone it to subscribe.
    #[must_use]
    pub fn channel(&self) -> &EventChannel<TreeEvent> {
        &self.channel
    }

    /// The element arena.
    #[must_use]
    pub fn arena(&self) -> &ElementArena {
        &self.arena
    }

    pub(crate) fn arena_mut(&mut self) -> &mut ElementArena {
        &mut self.arena
    }

    /// Install a transform applied to every node immediately before its
    /// element is built. Identity by default.
    pub fn set_interrupt(&mut self, hook: impl FnMut(TreeNode) -> TreeNode + 'static) {
        self.interrupt = Some(Box::new(hook));
    }

    /// Remove the interrupt hook.
    pub fn clear_interrupt(&mut self) {
        self.interrupt = None;
    }

    /// Build a leaf file element labeled `node.name`, linking to its target
    /// (or nothing if the node carries the placeholder link). Inserts before
    /// `before` when given, else appends. Emits [`EVENT_CREATED`].
    pub fn file(
        &mut self,
        node: TreeNode,
        parent: Option<ElementId>,
        before: Option<ElementId>,
    ) -> ElementId {
        self.build(node, NodeKind::File, parent, before).0
    }

    /// Build a folder (disclosure) element whose heading is `node.name` and
    /// whose initial expand state is `node.open`. The heading is navigable
    /// when the node carries a real link. Emits [`EVENT_CREATED`].
    pub fn folder(
        &mut self,
        node: TreeNode,
        parent: Option<ElementId>,
        before: Option<ElementId>,
    ) -> ElementId {
        self.build(node, NodeKind::Folder, parent, before).0
    }

    /// Representatives from `element` up to the tree root, innermost first.
    /// Empty when `element` is not in this tree.
    #[must_use]
    pub fn ancestors(&self, element: ElementId) -> Vec<ElementId> {
        if !self.arena.contains(element) {
            return Vec::new();
        }
        let mut list = Vec::new();
        let mut current = Some(element);
        while let Some(id) = current {
            list.push(id);
            current = self.arena.get(id).and_then(Element::parent);
        }
        list
    }

    /// Siblings at `element`'s level, in order, each normalized to its
    /// representative. Empty when `element` is not in this tree.
    #[must_use]
    pub fn siblings(&self, element: ElementId) -> Vec<ElementId> {
        let Some(record) = self.arena.get(element) else {
            return Vec::new();
        };
        match record.parent() {
            Some(parent) => self
                .arena
                .get(parent)
                .map(|p| p.children().to_vec())
                .unwrap_or_default(),
            None => self.arena.roots().to_vec(),
        }
    }

    /// Direct children of a folder element, in order. Empty for files,
    /// childless folders, and foreign handles.
    #[must_use]
    pub fn children(&self, folder: ElementId) -> Vec<ElementId> {
        match self.arena.get(folder) {
            Some(element) if element.kind() == NodeKind::Folder => element.children().to_vec(),
            _ => Vec::new(),
        }
    }

    /// Shared construction path. Returns the handle and the post-hook node
    /// so the selection layer can seed initial selection.
    pub(crate) fn build(
        &mut self,
        node: TreeNode,
        kind: NodeKind,
        parent: Option<ElementId>,
        before: Option<ElementId>,
    ) -> (ElementId, TreeNode) {
        let node = match self.interrupt.as_mut() {
            Some(hook) => hook(node),
            None => node,
        };
        let parent = self.closest_folder(parent);
        let href = node.has_link().then(|| node.link.clone());
        let open = kind == NodeKind::Folder && node.open;

        let element = Element::new(kind, node.name.clone(), href, open);
        let id = self.arena.attach(element, parent, before);
        self.channel.emit(
            EVENT_CREATED,
            &TreeEvent::Created {
                element: id,
                node: node.clone(),
            },
        );
        (id, node)
    }

    /// Resolve an insertion parent to its nearest containing folder; a file
    /// handle resolves to the folder holding it, a foreign handle to the
    /// top level.
    fn closest_folder(&self, parent: Option<ElementId>) -> Option<ElementId> {
        let mut current = parent;
        while let Some(id) = current {
            match self.arena.get(id) {
                Some(element) if element.kind() == NodeKind::Folder => return Some(id),
                Some(element) => current = element.parent(),
                None => return None,
            }
        }
        None
    }
}
