//! Element arena backing the tree widgets.
//!
//! Rendered elements are plain records addressed by stable [`ElementId`]
//! handles. Selection and disclosure state live on the records themselves;
//! structural queries and visibility are computed from parent links and
//! open flags, keeping the algorithms independent of any UI toolkit.

use doctree_core::NodeKind;

/// Stable handle to a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

impl ElementId {
    /// Arena index, for hosts keeping a parallel handle-to-view mapping.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A rendered element: a leaf file action, or a folder with disclosure
/// state whose heading doubles as its representative.
#[derive(Debug, Clone)]
pub struct Element {
    kind: NodeKind,
    label: String,
    href: Option<String>,
    open: bool,
    selected: bool,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    pub(crate) fn new(kind: NodeKind, label: String, href: Option<String>, open: bool) -> Self {
        Self {
            kind,
            label,
            href,
            open,
            selected: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Folder or file.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Navigation target, if the element has a real one.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Disclosure state. Always `false` for files.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether this element carries the selection marker.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Containing folder, or `None` at the top level.
    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Child elements in sibling order. Empty for files.
    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// Owning store of all rendered elements of one widget instance.
#[derive(Debug, Default)]
pub struct ElementArena {
    elements: Vec<Element>,
    roots: Vec<ElementId>,
}

impl ElementArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Link `element` under `parent` (or at the top level), inserting before
    /// `before` when that handle is among the siblings, else appending.
    pub(crate) fn attach(
        &mut self,
        mut element: Element,
        parent: Option<ElementId>,
        before: Option<ElementId>,
    ) -> ElementId {
        element.parent = parent;
        let id = ElementId(self.elements.len());
        self.elements.push(element);

        let siblings = match parent {
            Some(parent) => &mut self.elements[parent.0].children,
            None => &mut self.roots,
        };
        match before.and_then(|b| siblings.iter().position(|&s| s == b)) {
            Some(position) => siblings.insert(position, id),
            None => siblings.push(id),
        }
        id
    }

    /// Look up an element.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// Whether `id` belongs to this arena.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        id.0 < self.elements.len()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the arena holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Top-level elements in sibling order.
    #[must_use]
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// All elements in document (preorder) order.
    #[must_use]
    pub fn preorder(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.elements.len());
        for &root in &self.roots {
            self.walk(root, &mut out);
        }
        out
    }

    /// Whether `id` has a nonzero rendered height: every ancestor folder is
    /// open. A collapsed folder's own heading is still visible.
    #[must_use]
    pub fn is_visible(&self, id: ElementId) -> bool {
        let Some(element) = self.get(id) else {
            return false;
        };
        let mut current = element.parent;
        while let Some(ancestor) = current {
            let ancestor = &self.elements[ancestor.0];
            if !ancestor.open {
                return false;
            }
            current = ancestor.parent;
        }
        true
    }

    /// The element currently carrying the selection marker, if any.
    /// Derived by scan rather than cached, so it never goes stale.
    #[must_use]
    pub fn selected_element(&self) -> Option<ElementId> {
        self.elements
            .iter()
            .position(Element::is_selected)
            .map(ElementId)
    }

    /// Clear the selection marker everywhere. Returns how many elements
    /// carried it.
    pub(crate) fn clear_selected(&mut self) -> usize {
        let mut cleared = 0;
        for element in &mut self.elements {
            if element.selected {
                element.selected = false;
                cleared += 1;
            }
        }
        cleared
    }

    pub(crate) fn set_selected(&mut self, id: ElementId) {
        if let Some(element) = self.get_mut(id) {
            element.selected = true;
        }
    }

    pub(crate) fn set_open(&mut self, id: ElementId, open: bool) {
        if let Some(element) = self.get_mut(id) {
            element.open = open;
        }
    }

    fn walk(&self, id: ElementId, out: &mut Vec<ElementId>) {
        out.push(id);
        for &child in &self.elements[id.0].children {
            self.walk(child, out);
        }
    }
}
