//! Static HTML rendering of a built tree.
//!
//! Markup contract: the root carries `simple-tree select-tree` (plus `dark`
//! with the dark option), folders are `<details data-type="folder">` with a
//! `<summary>` heading (anchor-wrapped when the folder has a real link),
//! files are `<a data-type="file">`, and the selected representative carries
//! the `selected` class.

use doctree_core::{NO_LINK, NodeKind};

use crate::arena::{ElementArena, ElementId};
use crate::select::SelectTree;

impl SelectTree {
    /// Render the whole tree to static HTML.
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        let mut classes = String::from("simple-tree select-tree");
        if self.options().dark {
            classes.push_str(" dark");
        }
        out.push_str(&format!("<div class=\"{classes}\">\n"));
        out.push_str("<details open>\n<summary></summary>\n");
        for &root in self.arena().roots() {
            render_element(self.arena(), root, &mut out);
        }
        out.push_str("</details>\n</div>\n");
        out
    }
}

fn render_element(arena: &ElementArena, id: ElementId, out: &mut String) {
    let Some(element) = arena.get(id) else {
        return;
    };
    let label = escape_text(element.label());

    match element.kind() {
        NodeKind::File => {
            let href = escape_attr(element.href().unwrap_or(NO_LINK));
            let mut classes = String::from("text-reset");
            if element.is_selected() {
                classes.push_str(" selected");
            }
            out.push_str(&format!(
                "<a href=\"{href}\" class=\"{classes}\" data-type=\"file\">{label}</a>\n"
            ));
        }
        NodeKind::Folder => {
            let open = if element.is_open() { " open" } else { "" };
            out.push_str(&format!("<details data-type=\"folder\"{open}>\n"));

            let selected = if element.is_selected() {
                " class=\"selected\""
            } else {
                ""
            };
            match element.href() {
                Some(href) => {
                    let href = escape_attr(href);
                    out.push_str(&format!(
                        "<summary{selected} data-href=\"{href}\">\
                         <a href=\"{href}\" class=\"text-reset summary\">{label}</a>\
                         </summary>\n"
                    ));
                }
                None => {
                    out.push_str(&format!("<summary{selected}>{label}</summary>\n"));
                }
            }

            for &child in element.children() {
                render_element(arena, child, out);
            }
            out.push_str("</details>\n");
        }
    }
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::TreeOptions;
    use doctree_core::TreeNode;

    #[test]
    fn root_carries_the_widget_classes() {
        let tree = SelectTree::new();
        let html = tree.render_html();
        assert!(html.contains("class=\"simple-tree select-tree\""));
        assert!(!html.contains("dark"));

        let dark = SelectTree::with_options(TreeOptions::default().with_dark(true));
        assert!(dark.render_html().contains("class=\"simple-tree select-tree dark\""));
    }

    #[test]
    fn files_render_as_tagged_anchors() {
        let mut tree = SelectTree::new();
        tree.file(TreeNode::file("a", "Alpha").with_link("alpha.html"), None, None);
        let html = tree.render_html();
        assert!(html.contains(
            "<a href=\"alpha.html\" class=\"text-reset\" data-type=\"file\">Alpha</a>"
        ));
    }

    #[test]
    fn files_without_a_link_get_the_placeholder() {
        let mut tree = SelectTree::new();
        tree.file(TreeNode::file("a", "Alpha"), None, None);
        assert!(tree.render_html().contains("<a href=\"#\""));
    }

    #[test]
    fn folders_render_disclosure_state_and_heading() {
        let mut tree = SelectTree::new();
        let ns = tree.folder(TreeNode::folder("ns", "ns").with_open(true), None, None);
        tree.file(TreeNode::file("x", "x"), Some(ns), None);
        tree.folder(TreeNode::folder("closed", "closed"), None, None);

        let html = tree.render_html();
        assert!(html.contains("<details data-type=\"folder\" open>"));
        assert!(html.contains("<details data-type=\"folder\">"));
        assert!(html.contains("<summary>ns</summary>"));
    }

    #[test]
    fn linked_folder_headings_become_anchors() {
        let mut tree = SelectTree::new();
        tree.folder(TreeNode::folder("ns", "ns").with_link("ns.html"), None, None);
        let html = tree.render_html();
        assert!(html.contains("data-href=\"ns.html\""));
        assert!(html.contains("<a href=\"ns.html\" class=\"text-reset summary\">ns</a>"));
    }

    #[test]
    fn selected_element_carries_the_marker_class() {
        let mut tree = SelectTree::new();
        tree.file(
            TreeNode::file("a", "Alpha").with_selected(true).with_link("a.html"),
            None,
            None,
        );
        assert!(tree.render_html().contains("class=\"text-reset selected\""));
    }

    #[test]
    fn labels_and_hrefs_are_escaped() {
        let mut tree = SelectTree::new();
        tree.file(
            TreeNode::file("g", "Vec<T> & Co").with_link("a\"b.html"),
            None,
            None,
        );
        let html = tree.render_html();
        assert!(html.contains("Vec&lt;T&gt; &amp; Co"));
        assert!(html.contains("href=\"a&quot;b.html\""));
    }
}
