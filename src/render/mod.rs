//! Render layer: adapters and printers writing trees to `io::Write` sinks.

pub mod adapter;
pub mod class_list;
pub mod console;
pub mod graphml;
pub mod tree_printer;

pub use adapter::{ClassTreeAdapter, GraphMlAdapter, RenderAdapter};
pub use class_list::ClassListPrinter;
pub use console::TreeNodeConvert;
pub use graphml::{GraphDocument, GraphMlPrinter};
pub use tree_printer::{TreePrinter, DEFAULT_INDENT};
