//! GraphML printer.
//!
//! Nodes are numbered in pre-order. Edges are collected during the same walk
//! and written after the last node, so every edge references a node that is
//! already declared.

use std::io::{self, Write};
use std::marker::PhantomData;

use crate::domain::Node;
use crate::render::adapter::RenderAdapter;

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">
  <key id="label" for="node" attr.name="label" attr.type="string"/>
  <graph id="G" edgedefault="directed">"#;

const FOOTER: &str = "  </graph>\n</graphml>";

/// Element list of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDocument {
    /// `(id, label)` in pre-order
    pub nodes: Vec<(String, String)>,
    /// `(source id, target id)` in pre-order of the target
    pub edges: Vec<(String, String)>,
}

pub struct GraphMlPrinter<T, A> {
    adapter: A,
    _payload: PhantomData<fn(&T)>,
}

impl<T, A: RenderAdapter<T>> GraphMlPrinter<T, A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            _payload: PhantomData,
        }
    }

    /// Walk the tree once, assigning ids and deferring edges.
    ///
    /// A node the adapter does not render is dropped and its children are
    /// attached to the nearest rendered ancestor.
    pub fn collect(&self, root: &Node<T>) -> GraphDocument {
        let mut doc = GraphDocument::default();
        let mut ordinal = 0;
        // (node, id of nearest rendered ancestor)
        let mut stack: Vec<(&Node<T>, Option<String>)> = vec![(root, None)];

        while let Some((node, parent_id)) = stack.pop() {
            let own_id = if self.adapter.is_renderable(node) {
                let id = self.adapter.node_id(node, ordinal);
                ordinal += 1;
                doc.nodes.push((id.clone(), self.adapter.label(node)));
                if let Some(parent) = &parent_id {
                    doc.edges.push((parent.clone(), id.clone()));
                }
                Some(id)
            } else {
                parent_id
            };

            for child in node.children().iter().rev() {
                stack.push((child, own_id.clone()));
            }
        }

        doc
    }

    pub fn print<W: Write>(&self, out: &mut W, root: &Node<T>) -> io::Result<()> {
        let doc = self.collect(root);

        writeln!(out, "{HEADER}")?;
        for (id, label) in &doc.nodes {
            writeln!(out, "    <node id=\"{}\">", escape_xml(id))?;
            writeln!(out, "      <data key=\"label\">{}</data>", escape_xml(label))?;
            writeln!(out, "    </node>")?;
        }
        for (index, (source, target)) in doc.edges.iter().enumerate() {
            writeln!(
                out,
                "    <edge id=\"e{index}\" source=\"{}\" target=\"{}\"/>",
                escape_xml(source),
                escape_xml(target)
            )?;
        }
        writeln!(out, "{FOOTER}")?;
        out.flush()
    }

    pub fn render(&self, root: &Node<T>) -> io::Result<String> {
        let mut buf = Vec::new();
        self.print(&mut buf, root)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Escape the five XML special characters.
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
