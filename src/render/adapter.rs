//! Render adapters: per-output decisions about how a node is shown.

use std::fmt::Display;

use crate::domain::Node;

/// Maps tree nodes to output elements for one output variant.
///
/// The variant is picked when a printer is constructed; printers are generic
/// over the adapter so dispatch is static.
pub trait RenderAdapter<T> {
    /// Display label of `node`.
    fn label(&self, node: &Node<T>) -> String;

    /// Whether `node` is emitted as its own element.
    fn is_renderable(&self, _node: &Node<T>) -> bool {
        true
    }

    /// Identifier of `node` within one render pass, `ordinal` being the
    /// pre-order visitation counter.
    fn node_id(&self, _node: &Node<T>, ordinal: usize) -> String {
        format!("n{ordinal}")
    }
}

/// Plain indented tree: each node shows its own path segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassTreeAdapter;

impl<T> RenderAdapter<T> for ClassTreeAdapter {
    fn label(&self, node: &Node<T>) -> String {
        node.label().to_string()
    }
}

/// GraphML: class nodes show the fully-qualified value, package nodes their
/// segment, the synthetic root a fixed label.
#[derive(Debug, Clone)]
pub struct GraphMlAdapter {
    root_label: String,
}

impl Default for GraphMlAdapter {
    fn default() -> Self {
        Self::new("root")
    }
}

impl GraphMlAdapter {
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            root_label: root_label.into(),
        }
    }
}

impl<T: Display> RenderAdapter<T> for GraphMlAdapter {
    fn label(&self, node: &Node<T>) -> String {
        match node.value() {
            Some(value) => value.to_string(),
            // only the root has an empty segment
            None if node.label().is_empty() => self.root_label.clone(),
            None => node.label().to_string(),
        }
    }
}
