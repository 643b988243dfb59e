//! Tests for TreeBuilder over class names

use rstest::rstest;

use apkdetails::domain::{DexClass, DomainError, Node, Tree, TreeBuilder, TreePath};
use apkdetails::util::testing;

fn classes(names: &[&str]) -> Vec<DexClass> {
    names
        .iter()
        .map(|n| DexClass::new(*n).expect("valid class name"))
        .collect()
}

/// Labels from the root down to every node carrying a value, joined by `.`.
fn valued_paths(root: &Node<DexClass>) -> Vec<(String, String)> {
    fn walk(node: &Node<DexClass>, prefix: &mut Vec<String>, out: &mut Vec<(String, String)>) {
        for child in node.children() {
            prefix.push(child.label().to_string());
            if let Some(class) = child.value() {
                out.push((prefix.join("."), class.name().to_string()));
            }
            walk(child, prefix, out);
            prefix.pop();
        }
    }
    let mut out = Vec::new();
    walk(root, &mut Vec::new(), &mut out);
    out
}

// ============================================================
// Reachability
// ============================================================

#[rstest]
#[case(&["a.b.C"])]
#[case(&["a.b.C", "a.b.D", "a.X", "z.Y"])]
#[case(&["Main", "com.example.Main", "com.example.ui.MainActivity"])]
fn given_class_names_when_building_then_every_name_reachable_by_its_path(#[case] names: &[&str]) {
    testing::init_test_setup();

    let tree = TreeBuilder::default().build(classes(names)).unwrap();

    let mut paths = valued_paths(tree.root());
    paths.sort();
    let mut expected: Vec<(String, String)> = names
        .iter()
        .map(|n| (n.to_string(), n.to_string()))
        .collect();
    expected.sort();
    assert_eq!(paths, expected);
}

#[test]
fn given_class_names_when_building_then_no_duplicate_siblings() {
    let tree = TreeBuilder::default()
        .build(classes(&["a.b.C", "a.b.D", "a.c.E", "a.b.F"]))
        .unwrap();

    for (_, node) in tree.root().iter() {
        let mut labels: Vec<&str> = node.children().iter().map(|c| c.label()).collect();
        let before = labels.len();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), before, "duplicate child under {:?}", node.label());
    }
}

#[test]
fn given_class_names_when_building_then_siblings_keep_insertion_order() {
    let tree = TreeBuilder::default()
        .build(classes(&["z.Last", "a.First", "m.Middle"]))
        .unwrap();

    let labels: Vec<&str> = tree.root().children().iter().map(|c| c.label()).collect();
    assert_eq!(labels, vec!["z", "a", "m"]);
}

// ============================================================
// Idempotence
// ============================================================

#[test]
fn given_same_input_when_building_twice_then_trees_identical() {
    let input = classes(&["a.b.C", "a.b.D", "x.Y"]);

    let first = TreeBuilder::default().build(input.clone()).unwrap();
    let second = TreeBuilder::default().build(input).unwrap();

    assert_eq!(first, second);
}

#[test]
fn given_duplicate_name_when_inserting_then_node_set_unchanged() {
    let mut tree: Tree<DexClass> = Tree::new();
    tree.add_children(classes(&["a.b.C", "a.b.D"])).unwrap();
    let before = tree.root().node_count();

    tree.add_children(classes(&["a.b.C"])).unwrap();

    assert_eq!(tree.root().node_count(), before);
    assert_eq!(tree.root().node_count(), 5);
}

// ============================================================
// Edge cases
// ============================================================

#[test]
fn given_empty_input_when_building_then_root_only() {
    let tree = TreeBuilder::default().build(Vec::<DexClass>::new()).unwrap();

    assert!(tree.is_empty());
    assert_eq!(tree.root().node_count(), 1);
    assert!(tree.root().value().is_none());
}

#[test]
fn given_invalid_identifier_when_parsing_then_errors() {
    let result = DexClass::new("com..Broken");

    assert_eq!(
        result,
        Err(DomainError::InvalidIdentifier("com..Broken".to_string()))
    );
}

/// Path item that skips `DexClass` validation.
#[derive(Debug)]
struct RawPath(&'static str);

impl TreePath for RawPath {
    fn tree_path(&self) -> &str {
        self.0
    }
}

#[rstest]
#[case("a..b")]
#[case("")]
#[case(".a")]
#[case("a.")]
fn given_path_with_empty_segment_when_building_then_invalid_identifier(#[case] path: &'static str) {
    let result = TreeBuilder::default().build(vec![RawPath(path)]);

    assert_eq!(
        result.map(|_| ()),
        Err(DomainError::InvalidIdentifier(path.to_string()))
    );
}

#[test]
fn given_invalid_path_after_valid_ones_when_inserting_then_error_and_no_partial_node() {
    let mut tree: Tree<RawPath> = Tree::new();
    TreeBuilder::default()
        .insert_all(&mut tree, vec![RawPath("a.B")])
        .unwrap();

    let result = TreeBuilder::default().insert(&mut tree, RawPath("c..D"));

    assert!(result.is_err());
    assert!(tree.root().child("c").is_none());
    assert_eq!(tree.root().node_count(), 3);
}
