//! Formwork CLI library: command implementations behind the `formwork` binary.

pub mod cli;
pub mod demo;
pub mod inspect;
pub mod render;
pub mod table;

pub use cli::{Cli, Commands, OutputFormat};
