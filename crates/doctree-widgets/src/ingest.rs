//! Bridge from nested tree nodes to imperative widget build calls.

use doctree_core::{NodeKind, TreeNode};

use crate::arena::ElementId;
use crate::select::SelectTree;

impl SelectTree {
    /// Walk `nodes` in order under `parent`: folders are built and recursed
    /// into when they declare children, everything else becomes a file.
    /// Sibling order in the rendered tree follows input order.
    pub fn ingest(&mut self, nodes: &[TreeNode], parent: Option<ElementId>) {
        for node in nodes {
            match node.kind {
                NodeKind::Folder => {
                    let folder = self.folder(node.clone(), parent, None);
                    if let Some(children) = &node.children {
                        self.ingest(children, Some(folder));
                    }
                }
                NodeKind::File => {
                    self.file(node.clone(), parent, None);
                }
            }
        }
    }
}
