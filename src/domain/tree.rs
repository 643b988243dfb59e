//! Generic ownership tree.
//!
//! A [`Tree`] owns exactly one root [`Node`]; every node owns its children in
//! insertion order. There are no parent pointers, so cycles cannot be built.

use crate::domain::builder::TreeBuilder;
use crate::domain::error::DomainResult;

/// Items that can be placed into a [`Tree`] by their delimited path.
pub trait TreePath {
    /// Full delimited path of the item, e.g. `com.example.Main`.
    fn tree_path(&self) -> &str;
}

/// Tree node: one path segment, an optional payload and its children.
///
/// Synthetic nodes (package segments, the root) carry no value. Children are
/// only attached through [`Node::child_or_insert`], so sibling labels are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    label: String,
    value: Option<T>,
    children: Vec<Node<T>>,
}

impl<T> Node<T> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
            children: Vec::new(),
        }
    }

    pub fn with_value(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    /// Appends `child` unchecked; test fixtures only.
    #[cfg(test)]
    pub(crate) fn with_child(mut self, child: Node<T>) -> Self {
        self.children.push(child);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Stores `value` on this node, returning the previous one.
    pub fn set_value(&mut self, value: T) -> Option<T> {
        self.value.replace(value)
    }

    pub fn children(&self) -> &[Node<T>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Direct child with exactly this label (case-sensitive).
    pub fn child(&self, label: &str) -> Option<&Node<T>> {
        self.children.iter().find(|c| c.label == label)
    }

    /// Returns the child labelled `label`, appending a new one if absent.
    pub fn child_or_insert(&mut self, label: &str) -> &mut Node<T> {
        let pos = match self.children.iter().position(|c| c.label == label) {
            Some(pos) => pos,
            None => {
                self.children.push(Node::new(label));
                self.children.len() - 1
            }
        };
        &mut self.children[pos]
    }

    /// Follows `path` segment by segment starting below this node.
    pub fn find<'a, I>(&self, path: I) -> Option<&Node<T>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        path.into_iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Number of levels including this node.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|(_, node)| node.is_leaf()).count()
    }

    /// Pre-order traversal yielding `(depth, node)`, this node at depth 0.
    pub fn iter(&self) -> PreOrderIter<'_, T> {
        PreOrderIter {
            stack: vec![(0, self)],
        }
    }
}

pub struct PreOrderIter<'a, T> {
    stack: Vec<(usize, &'a Node<T>)>,
}

impl<'a, T> Iterator for PreOrderIter<'a, T> {
    type Item = (usize, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

/// Owns the synthetic root of one hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<T> {
    root: Node<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self {
            root: Node::new(""),
        }
    }

    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Node<T> {
        &mut self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    /// Inserts every item by its `.`-delimited path.
    pub fn add_children<I>(&mut self, items: I) -> DomainResult<()>
    where
        T: TreePath,
        I: IntoIterator<Item = T>,
    {
        TreeBuilder::default().insert_all(self, items)
    }
}
