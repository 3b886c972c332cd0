//! Selection layer over the structural tree.
//!
//! [`SelectTree`] adds a single selection marker, debounced focus
//! restoration, keyboard navigation over the visible elements, and
//! click/activation semantics. It composes a [`SimpleTree`] rather than
//! inheriting from it; structural calls are delegated.
//!
//! # Focus debounce
//!
//! Selecting an element arms a pending focus request identified by a
//! [`FocusToken`]; re-arming invalidates the previous token. The host
//! schedules a short timer for each token it observes and calls
//! [`SelectTree::complete_focus`] when it fires — the focus move happens
//! only if the token is still current and the document holds focus, so a
//! background window never steals focus.

use doctree_core::{EventChannel, NodeKind, TreeNode};

use crate::arena::{Element, ElementArena, ElementId};
use crate::simple::{EVENT_ACTION, EVENT_SELECT, SimpleTree, TreeEvent};

/// Scan direction for keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the next visible element in document order.
    Forward,
    /// Towards the previous visible element.
    Backward,
}

/// Options recognized by the selection layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    /// Enable arrow-key navigation.
    pub navigate: bool,
    /// Mark the rendered root with the dark theme class.
    pub dark: bool,
    /// Do not keep a pending focus request alive when a file action fires.
    pub no_focus_on_action: bool,
}

impl TreeOptions {
    /// Enable arrow-key navigation.
    #[must_use]
    pub fn with_navigate(mut self, navigate: bool) -> Self {
        self.navigate = navigate;
        self
    }

    /// Use the dark theme marker.
    #[must_use]
    pub fn with_dark(mut self, dark: bool) -> Self {
        self.dark = dark;
        self
    }

    /// Suppress focus restoration on file actions.
    #[must_use]
    pub fn with_no_focus_on_action(mut self, suppress: bool) -> Self {
        self.no_focus_on_action = suppress;
        self
    }
}

/// Token identifying a pending debounced focus request. Re-arming hands out
/// a new token and silently invalidates every earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusToken(u64);

/// A pointer gesture as reported by the host toolkit.
#[derive(Debug, Clone, Copy)]
pub struct Click {
    /// Element under the pointer, if any.
    pub target: Option<ElementId>,
    /// Click count within the multi-click window (1 = single).
    pub count: u32,
    /// `false` for coordinate-less, keyboard-synthesized activations.
    pub has_coords: bool,
    /// Whether the press landed inside the clickable glyph region.
    pub in_glyph: bool,
}

impl Click {
    /// A genuine single primary click on `target`.
    #[must_use]
    pub fn single(target: ElementId) -> Self {
        Self {
            target: Some(target),
            count: 1,
            has_coords: true,
            in_glyph: true,
        }
    }

    /// A double click on `target`.
    #[must_use]
    pub fn double(target: Option<ElementId>) -> Self {
        Self {
            target,
            count: 2,
            has_coords: true,
            in_glyph: true,
        }
    }

    /// A keyboard-synthesized activation (no coordinates).
    #[must_use]
    pub fn keyboard() -> Self {
        Self {
            target: None,
            count: 1,
            has_coords: false,
            in_glyph: false,
        }
    }
}

/// Outcome of a pointer gesture, telling the host what to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickResult {
    /// Nothing happened; let the default behavior run.
    Ignored,
    /// Suppress default navigation; native disclosure handles the gesture.
    DefaultSuppressed,
    /// The active file element fired its action; suppress default
    /// navigation so the host can route instead of reloading.
    Action(ElementId),
    /// A multi-click moved the selection to this element.
    Selected(ElementId),
    /// A multi-click landed on chrome; focus was re-armed on the active
    /// element.
    FocusRestored(ElementId),
}

/// Stateful, keyboard-navigable, single-selection tree.
pub struct SelectTree {
    tree: SimpleTree,
    options: TreeOptions,
    next_focus_token: u64,
    pending_focus: Option<(FocusToken, ElementId)>,
    focused: Option<ElementId>,
}

impl Default for SelectTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectTree {
    /// Create an empty tree with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(TreeOptions::default())
    }

    /// Create an empty tree with the given options.
    #[must_use]
    pub fn with_options(options: TreeOptions) -> Self {
        Self {
            tree: SimpleTree::new(),
            options,
            next_focus_token: 0,
            pending_focus: None,
            focused: None,
        }
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> TreeOptions {
        self.options
    }

    /// The channel lifecycle events are emitted on.
    #[must_use]
    pub fn channel(&self) -> &EventChannel<TreeEvent> {
        self.tree.channel()
    }

    /// The element arena.
    #[must_use]
    pub fn arena(&self) -> &ElementArena {
        self.tree.arena()
    }

    /// Install the pre-build node transform. See [`SimpleTree::set_interrupt`].
    pub fn set_interrupt(&mut self, hook: impl FnMut(TreeNode) -> TreeNode + 'static) {
        self.tree.set_interrupt(hook);
    }

    /// Build a file element; a node flagged `selected` becomes the active
    /// element immediately. See [`SimpleTree::file`].
    pub fn file(
        &mut self,
        node: TreeNode,
        parent: Option<ElementId>,
        before: Option<ElementId>,
    ) -> ElementId {
        let (id, node) = self.tree.build(node, NodeKind::File, parent, before);
        if node.selected {
            self.select(id);
        }
        id
    }

    /// Build a folder element; a node flagged `selected` becomes the active
    /// element immediately. See [`SimpleTree::folder`].
    pub fn folder(
        &mut self,
        node: TreeNode,
        parent: Option<ElementId>,
        before: Option<ElementId>,
    ) -> ElementId {
        let (id, node) = self.tree.build(node, NodeKind::Folder, parent, before);
        if node.selected {
            self.select(id);
        }
        id
    }

    /// Representatives from `element` to the root. See [`SimpleTree::ancestors`].
    #[must_use]
    pub fn ancestors(&self, element: ElementId) -> Vec<ElementId> {
        self.tree.ancestors(element)
    }

    /// Siblings at `element`'s level. See [`SimpleTree::siblings`].
    #[must_use]
    pub fn siblings(&self, element: ElementId) -> Vec<ElementId> {
        self.tree.siblings(element)
    }

    /// Children of a folder element. See [`SimpleTree::children`].
    #[must_use]
    pub fn children(&self, folder: ElementId) -> Vec<ElementId> {
        self.tree.children(folder)
    }

    /// Set a folder's disclosure state (the host's native toggle reporting
    /// back, or programmatic expansion).
    pub fn set_open(&mut self, folder: ElementId, open: bool) {
        if self
            .arena()
            .get(folder)
            .is_some_and(|e| e.kind() == NodeKind::Folder)
        {
            self.tree.arena_mut().set_open(folder, open);
        }
    }

    /// Move the selection marker to `target`, clearing it everywhere else,
    /// arm a debounced focus request, and emit [`EVENT_SELECT`]. A foreign
    /// handle is a no-op.
    pub fn select(&mut self, target: ElementId) {
        if !self.arena().contains(target) {
            return;
        }
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("tree_select", element = target.index()).entered();

        // clear every stale marker, enforcing at-most-one even if state drifted
        self.tree.arena_mut().clear_selected();
        self.tree.arena_mut().set_selected(target);
        self.request_focus(target);
        self.tree
            .channel()
            .emit(EVENT_SELECT, &TreeEvent::Select { element: target });
    }

    /// The element currently carrying the selection marker. Recomputed on
    /// demand, never cached.
    #[must_use]
    pub fn active(&self) -> Option<ElementId> {
        self.arena().selected_element()
    }

    /// Select the nearest visible element after (forward) or before
    /// (backward) the active one in document order, skipping everything
    /// hidden inside collapsed folders. No active element or no visible
    /// candidate is a no-op.
    pub fn navigate(&mut self, direction: Direction) -> Option<ElementId> {
        let active = self.active()?;
        let order = self.arena().preorder();
        let index = order.iter().position(|&e| e == active)?;

        let next = match direction {
            Direction::Forward => order[index + 1..]
                .iter()
                .copied()
                .find(|&e| self.arena().is_visible(e)),
            Direction::Backward => order[..index]
                .iter()
                .rev()
                .copied()
                .find(|&e| self.arena().is_visible(e)),
        }?;
        self.select(next);
        Some(next)
    }

    /// Arrow-key input. Returns `true` when the key was consumed (navigation
    /// enabled), so the host suppresses the default scroll.
    pub fn key(&mut self, direction: Direction) -> bool {
        if !self.options.navigate {
            return false;
        }
        self.navigate(direction);
        true
    }

    /// A pointer gesture or keyboard-synthesized activation.
    pub fn click(&mut self, click: Click) -> ClickResult {
        if click.count > 1 {
            return self.multi_click(click.target);
        }

        // keyboard activation, or a genuine click on the active element:
        // fire the action for an active file
        let activates = !click.has_coords || click.target == self.active();
        if activates {
            if let Some(active) = self.active() {
                if self.arena().get(active).map(Element::kind) == Some(NodeKind::File) {
                    if self.options.no_focus_on_action {
                        self.pending_focus = None;
                    }
                    self.tree
                        .channel()
                        .emit(EVENT_ACTION, &TreeEvent::Action { element: active });
                    return ClickResult::Action(active);
                }
            }
        }

        if click.has_coords && click.in_glyph {
            // groups toggle natively; only the link default is suppressed
            return ClickResult::DefaultSuppressed;
        }
        ClickResult::Ignored
    }

    /// The host reports focus landing on an element (e.g. the user tabbed
    /// around): keep the selection in sync.
    pub fn focus_in(&mut self, target: ElementId) {
        self.focused = Some(target);
        if self.active() != Some(target) {
            self.select(target);
        }
    }

    /// The window regained focus: re-arm the debounced focus restore on the
    /// active element.
    pub fn window_focus(&mut self) -> Option<FocusToken> {
        let active = self.active()?;
        Some(self.request_focus(active))
    }

    /// The pending focus request, if one is armed.
    #[must_use]
    pub fn pending_focus(&self) -> Option<(FocusToken, ElementId)> {
        self.pending_focus
    }

    /// The host's debounce timer for `token` fired. Consumes the request if
    /// the token is still current; the focus move happens only when the
    /// document holds focus. Stale tokens are no-ops.
    pub fn complete_focus(&mut self, token: FocusToken, document_focused: bool) -> Option<ElementId> {
        match self.pending_focus {
            Some((current, target)) if current == token => {
                self.pending_focus = None;
                if document_focused {
                    self.focused = Some(target);
                    Some(target)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// The element input focus last landed on, as far as the widget knows.
    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    fn multi_click(&mut self, target: Option<ElementId>) -> ClickResult {
        let active = self.active();
        if let Some(target) = target {
            if Some(target) != active && self.arena().contains(target) {
                self.select(target);
                return ClickResult::Selected(target);
            }
        }
        if let Some(active) = active {
            self.request_focus(active);
            return ClickResult::FocusRestored(active);
        }
        ClickResult::Ignored
    }

    fn request_focus(&mut self, target: ElementId) -> FocusToken {
        self.next_focus_token += 1;
        let token = FocusToken(self.next_focus_token);
        self.pending_focus = Some((token, target));
        token
    }
}
