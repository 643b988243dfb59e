//! apkdetails: reports over packaged Android applications.
//!
//! Layers, leaf-first:
//! - [`domain`]: class trees and native-library grouping
//! - [`render`]: adapters and printers for plain-tree, GraphML and class-list output
//! - [`application`]: report service writing every output independently
//! - [`infrastructure`]: ZIP archive and class-list readers
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod render;
pub mod util;
