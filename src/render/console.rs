/*
Console rendering via termtree: box-drawing output for interactive use.
The file outputs use the indented TreePrinter instead.
 */
use termtree::Tree;

use crate::domain::Node;
use crate::render::adapter::RenderAdapter;

/// Label shown for the synthetic root.
const ROOT_LABEL: &str = ".";

pub trait TreeNodeConvert<T> {
    fn to_tree_string<A: RenderAdapter<T>>(&self, adapter: &A) -> Tree<String>;
}

impl<T> TreeNodeConvert<T> for Node<T> {
    fn to_tree_string<A: RenderAdapter<T>>(&self, adapter: &A) -> Tree<String> {
        let label = if self.label().is_empty() {
            ROOT_LABEL.to_string()
        } else {
            adapter.label(self)
        };

        // Recursively construct the children
        let leaves: Vec<_> = self
            .children()
            .iter()
            .filter(|c| adapter.is_renderable(c))
            .map(|c| c.to_tree_string(adapter))
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}
