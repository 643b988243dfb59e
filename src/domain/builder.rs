//! Tree builder: inserts delimited paths into a shared hierarchy.

use tracing::{debug, instrument};

use crate::domain::class::PACKAGE_DELIMITER;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{Tree, TreePath};

/// Constructs class hierarchies from fully-qualified names.
///
/// Every prefix of an inserted path maps to exactly one node; intermediate
/// package nodes are created on demand and carry no value. The builder keeps
/// first-insertion order and never sorts.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    delimiter: char,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(PACKAGE_DELIMITER)
    }
}

impl TreeBuilder {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Build a fresh tree from `items`.
    #[instrument(level = "debug", skip_all)]
    pub fn build<T, I>(&self, items: I) -> DomainResult<Tree<T>>
    where
        T: TreePath,
        I: IntoIterator<Item = T>,
    {
        let mut tree = Tree::new();
        self.insert_all(&mut tree, items)?;
        debug!(nodes = tree.root().node_count(), "built tree");
        Ok(tree)
    }

    pub fn insert_all<T, I>(&self, tree: &mut Tree<T>, items: I) -> DomainResult<()>
    where
        T: TreePath,
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .try_for_each(|item| self.insert(tree, item))
    }

    /// Walk from the root one segment at a time, reusing matching children,
    /// and store `item` on the node of the final segment.
    ///
    /// Re-inserting an identical path replaces the value and adds no node.
    #[instrument(level = "trace", skip_all, fields(path = item.tree_path()))]
    pub fn insert<T: TreePath>(&self, tree: &mut Tree<T>, item: T) -> DomainResult<()> {
        let path = item.tree_path();
        if path.split(self.delimiter).any(str::is_empty) {
            return Err(DomainError::InvalidIdentifier(path.to_string()));
        }

        let mut node = tree.root_mut();
        for segment in path.split(self.delimiter) {
            node = node.child_or_insert(segment);
        }
        node.set_value(item);
        Ok(())
    }
}
