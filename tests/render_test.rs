//! Tests for the plain-tree, GraphML and class-list printers

use std::collections::HashSet;

use apkdetails::domain::{DexClass, Tree, TreeBuilder};
use apkdetails::render::{
    ClassListPrinter, ClassTreeAdapter, GraphMlAdapter, GraphMlPrinter, TreePrinter,
};

fn build(names: &[&str]) -> Tree<DexClass> {
    let classes: Vec<DexClass> = names.iter().map(|n| DexClass::new(*n).unwrap()).collect();
    TreeBuilder::default().build(classes).unwrap()
}

// ============================================================
// Plain tree
// ============================================================

#[test]
fn given_root_a_b_when_printing_tree_then_two_indented_lines() {
    let tree = build(&["A.B"]);

    let out = TreePrinter::new(ClassTreeAdapter).render(tree.root()).unwrap();

    assert_eq!(out, "  A\n    B\n");
}

#[test]
fn given_packages_when_printing_tree_then_labels_are_segments() {
    let tree = build(&["com.example.Main", "com.example.ui.Screen", "org.Other"]);

    let out = TreePrinter::new(ClassTreeAdapter).render(tree.root()).unwrap();

    assert_eq!(
        out,
        "  com\n    example\n      Main\n      ui\n        Screen\n  org\n    Other\n"
    );
}

#[test]
fn given_empty_tree_when_printing_tree_then_no_lines() {
    let tree = build(&[]);

    let out = TreePrinter::new(ClassTreeAdapter).render(tree.root()).unwrap();

    assert!(out.is_empty());
}

// ============================================================
// GraphML
// ============================================================

#[test]
fn given_root_a_b_when_printing_graph_then_three_nodes_two_edges() {
    let tree = build(&["A.B"]);
    let printer = GraphMlPrinter::new(GraphMlAdapter::default());

    let doc = printer.collect(tree.root());

    assert_eq!(doc.nodes.len(), 3);
    assert_eq!(doc.edges.len(), 2);
    let ids: HashSet<&str> = doc.nodes.iter().map(|(id, _)| id.as_str()).collect();
    for (source, target) in &doc.edges {
        assert!(ids.contains(source.as_str()));
        assert!(ids.contains(target.as_str()));
    }
    // class node carries the fully-qualified name
    assert_eq!(doc.nodes[2].1, "A.B");
}

#[test]
fn given_tree_when_printing_graph_then_every_node_once_and_edges_after_nodes() {
    let tree = build(&["a.util.X", "b.util.Y", "a.Z"]);
    let printer = GraphMlPrinter::new(GraphMlAdapter::new("apk"));

    let doc = printer.collect(tree.root());
    let out = printer.render(tree.root()).unwrap();

    assert_eq!(doc.nodes.len(), tree.root().node_count());
    assert_eq!(doc.edges.len(), tree.root().node_count() - 1);
    let unique: HashSet<&str> = doc.nodes.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(unique.len(), doc.nodes.len());
    assert_eq!(doc.nodes[0].1, "apk");

    let last_node = out.rfind("<node ").unwrap();
    let first_edge = out.find("<edge ").unwrap();
    assert!(last_node < first_edge);
}

#[test]
fn given_empty_tree_when_printing_graph_then_root_only() {
    let tree = build(&[]);

    let doc = GraphMlPrinter::new(GraphMlAdapter::default()).collect(tree.root());

    assert_eq!(doc.nodes, vec![("n0".to_string(), "root".to_string())]);
    assert!(doc.edges.is_empty());
}

// ============================================================
// Class list
// ============================================================

#[test]
fn given_unsorted_classes_when_printing_list_then_alphabetical() {
    let classes: Vec<DexClass> = ["com.z.Last", "com.a.First", "Main", "com.a.Able"]
        .iter()
        .map(|n| DexClass::new(*n).unwrap())
        .collect();

    let mut out = Vec::new();
    ClassListPrinter.print(&mut out, &classes).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Main\ncom.a.Able\ncom.a.First\ncom.z.Last\n"
    );
}
