//! Full pipeline: flat records through tree building, auto-expansion,
//! ingestion, interaction, and static rendering.

use std::cell::RefCell;
use std::rc::Rc;

use doctree_core::{
    FlatRecord, ParentRef, TreeNode, open_ancestors_records, records_to_tree,
};
use doctree_widgets::{
    Click, ClickResult, Direction, EVENT_ACTION, EVENT_SELECT, SelectTree, TreeEvent,
    TreeOptions,
};

/// Namespace index fixture: two top-level namespaces, one holding the
/// currently documented class.
fn fixture() -> Vec<FlatRecord> {
    vec![
        FlatRecord::folder("ns1", "ns1"),
        FlatRecord::file("ns1\\Foo", "Foo")
            .with_parent(ParentRef::id("ns1"))
            .with_link("foo.html")
            .with_selected(true)
            .with_element_type("class"),
        FlatRecord::file("ns1\\Bar", "Bar")
            .with_parent(ParentRef::id("ns1"))
            .with_link("bar.html")
            .with_element_type("class"),
        FlatRecord::folder("ns2", "ns2"),
        FlatRecord::file("ns2\\Baz", "Baz")
            .with_parent(ParentRef::id("ns2"))
            .with_link("baz.html")
            .with_element_type("interface"),
    ]
}

fn built_tree(options: TreeOptions) -> SelectTree {
    let mut records = fixture();
    open_ancestors_records(&mut records);
    let nested = records_to_tree(&records).unwrap();

    let mut tree = SelectTree::with_options(options);
    tree.ingest(&nested, None);
    tree
}

#[test]
fn selected_records_expand_their_ancestors_and_become_active() {
    let tree = built_tree(TreeOptions::default());
    let arena = tree.arena();

    let roots = arena.roots();
    assert_eq!(roots.len(), 2);
    let ns1 = arena.get(roots[0]).unwrap();
    let ns2 = arena.get(roots[1]).unwrap();
    assert!(ns1.is_open(), "the selected file's group is expanded");
    assert!(!ns2.is_open(), "unrelated groups stay collapsed");

    let active = tree.active().expect("the selected record seeds selection");
    let foo = arena.get(active).unwrap();
    assert_eq!(foo.label(), "Foo");
    assert_eq!(foo.href(), Some("foo.html"));
    assert!(arena.is_visible(active));
}

#[test]
fn keyboard_navigation_walks_only_visible_elements() {
    let mut tree = built_tree(TreeOptions::default().with_navigate(true));

    // active is Foo; forward lands on Bar, then ns2's heading, and the
    // collapsed Baz is skipped
    let bar = tree.navigate(Direction::Forward).unwrap();
    assert_eq!(tree.arena().get(bar).unwrap().label(), "Bar");
    let ns2 = tree.navigate(Direction::Forward).unwrap();
    assert_eq!(tree.arena().get(ns2).unwrap().label(), "ns2");
    assert_eq!(tree.navigate(Direction::Forward), None);
}

#[test]
fn activating_the_current_file_reports_its_link_for_routing() {
    let mut tree = built_tree(TreeOptions::default());
    let fired = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&fired);
    tree.channel().on(EVENT_ACTION, move |event| {
        if let TreeEvent::Action { element } = event {
            sink.borrow_mut().push(*element);
        }
    });

    let active = tree.active().unwrap();
    assert_eq!(tree.click(Click::keyboard()), ClickResult::Action(active));
    assert_eq!(*fired.borrow(), vec![active]);
    assert_eq!(tree.arena().get(active).unwrap().href(), Some("foo.html"));
}

#[test]
fn multi_click_moves_the_selection_and_notifies() {
    let mut tree = built_tree(TreeOptions::default());
    let selections = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&selections);
    tree.channel().on(EVENT_SELECT, move |event| {
        if let TreeEvent::Select { element } = event {
            sink.borrow_mut().push(*element);
        }
    });

    let foo = tree.active().unwrap();
    let bar = tree.siblings(foo)[1];
    assert_eq!(tree.click(Click::double(Some(bar))), ClickResult::Selected(bar));
    assert_eq!(tree.active(), Some(bar));
    assert_eq!(*selections.borrow(), vec![bar]);

    // the pending focus restore completes only in a focused document
    let (token, target) = tree.pending_focus().unwrap();
    assert_eq!(target, bar);
    assert_eq!(tree.complete_focus(token, true), Some(bar));
}

#[test]
fn rendered_html_reflects_structure_state_and_selection() {
    let tree = built_tree(TreeOptions::default().with_dark(true));
    let html = tree.render_html();

    assert!(html.contains("class=\"simple-tree select-tree dark\""));
    assert!(html.contains("<details data-type=\"folder\" open>")); // ns1
    assert!(html.contains("<details data-type=\"folder\">")); // ns2
    assert!(html.contains(
        "<a href=\"foo.html\" class=\"text-reset selected\" data-type=\"file\">Foo</a>"
    ));
    assert!(html.contains(
        "<a href=\"bar.html\" class=\"text-reset\" data-type=\"file\">Bar</a>"
    ));
}

#[test]
fn interrupt_hook_rewrites_every_ingested_node() {
    let mut records = fixture();
    open_ancestors_records(&mut records);
    let nested = records_to_tree(&records).unwrap();

    let mut tree = SelectTree::new();
    tree.set_interrupt(|mut node: TreeNode| {
        if node.name == "Bar" {
            node.link = "rewritten.html".to_owned();
        }
        node
    });
    tree.ingest(&nested, None);

    assert!(tree.render_html().contains("href=\"rewritten.html\""));
}
