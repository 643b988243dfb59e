//! Indented plain-text tree printer.

use std::io::{self, Write};
use std::marker::PhantomData;

use crate::domain::Node;
use crate::render::adapter::RenderAdapter;

/// Spaces per depth level unless configured otherwise.
pub const DEFAULT_INDENT: usize = 2;

/// Writes one line per node, indented by `depth * indent` spaces.
///
/// The root is not written; its children start at depth 1.
pub struct TreePrinter<T, A> {
    adapter: A,
    indent: usize,
    _payload: PhantomData<fn(&T)>,
}

impl<T, A: RenderAdapter<T>> TreePrinter<T, A> {
    pub fn new(adapter: A) -> Self {
        Self::with_indent(adapter, DEFAULT_INDENT)
    }

    pub fn with_indent(adapter: A, indent: usize) -> Self {
        Self {
            adapter,
            indent,
            _payload: PhantomData,
        }
    }

    pub fn print<W: Write>(&self, out: &mut W, root: &Node<T>) -> io::Result<()> {
        for (depth, node) in root.iter().filter(|(depth, _)| *depth > 0) {
            if !self.adapter.is_renderable(node) {
                continue;
            }
            let width = depth * self.indent;
            writeln!(out, "{:width$}{}", "", self.adapter.label(node))?;
        }
        out.flush()
    }

    /// Convenience wrapper rendering into a `String`.
    pub fn render(&self, root: &Node<T>) -> io::Result<String> {
        let mut buf = Vec::new();
        self.print(&mut buf, root)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::adapter::ClassTreeAdapter;

    #[test]
    fn test_root_a_b_prints_two_indented_lines() {
        let root: Node<()> = Node::new("").with_child(Node::new("A").with_child(Node::new("B")));
        let printer = TreePrinter::new(ClassTreeAdapter);
        assert_eq!(printer.render(&root).unwrap(), "  A\n    B\n");
    }

    #[test]
    fn test_custom_indent() {
        let root: Node<()> = Node::new("").with_child(Node::new("A").with_child(Node::new("B")));
        let printer = TreePrinter::with_indent(ClassTreeAdapter, 4);
        assert_eq!(printer.render(&root).unwrap(), "    A\n        B\n");
    }

    #[test]
    fn test_root_only_prints_nothing() {
        let root: Node<()> = Node::new("");
        assert_eq!(TreePrinter::new(ClassTreeAdapter).render(&root).unwrap(), "");
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_propagates() {
        let root: Node<()> = Node::new("").with_child(Node::new("A"));
        let err = TreePrinter::new(ClassTreeAdapter)
            .print(&mut FailingSink, &root)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
