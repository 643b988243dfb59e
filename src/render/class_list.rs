//! Flat class listing.

use std::io::{self, Write};

use itertools::Itertools;

use crate::domain::DexClass;

/// Writes fully-qualified class names, one per line, alphabetically.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassListPrinter;

impl ClassListPrinter {
    pub fn print<'a, W, I>(&self, out: &mut W, classes: I) -> io::Result<()>
    where
        W: Write,
        I: IntoIterator<Item = &'a DexClass>,
    {
        for class in classes.into_iter().sorted_by(|a, b| a.name().cmp(b.name())) {
            writeln!(out, "{}", class.name())?;
        }
        out.flush()
    }
}
