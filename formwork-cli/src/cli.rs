//! CLI definition for the formwork command-line interface.
//!
//! Depends only on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Formwork - render declarative form layouts.
///
/// Loads a layout description (YAML or JSON), renders it with the demo
/// renderer registry against an optional values snapshot, and prints the
/// result as a table or as HTML.
#[derive(Parser, Debug)]
#[command(name = "formwork")]
#[command(version)]
#[command(about = "Render declarative form layouts")]
#[command(
    long_about = "Formwork renders declarative form layouts into HTML or a field table.\n\n\
    Presentation defaults are read from ~/.formwork/form.{toml,yaml,yml,json} and \
    ./.formwork/form.{toml,yaml,yml,json}, then from --config, then from the environment.\n\n\
    Environment variables:\n  \
    FORMWORK_LABEL_POSITION       top or left\n  \
    FORMWORK_INPUT_CLASS_NAME     Classes appended to every built-in input\n  \
    FORMWORK_SPAN_STRATEGY__KIND  grid, named or percent\n  \
    RUST_LOG                      Log filter when --debug is not given"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file overriding the discovered ones
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the fields of a layout with their resolved spans and renderers
    Inspect {
        /// Layout description file (.yaml, .yml or .json)
        layout: PathBuf,
    },

    /// Render a layout against a values snapshot
    Render {
        /// Layout description file (.yaml, .yml or .json)
        layout: PathBuf,
        /// JSON object of field values overlaid on the layout's initial values
        #[arg(long, value_name = "FILE")]
        values: Option<PathBuf>,
        /// JSON object of field error messages
        #[arg(long, value_name = "FILE")]
        errors: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Show the submit button and attempt a submit after rendering
        #[arg(long)]
        submit: bool,
        /// Render in the loading state
        #[arg(long)]
        loading: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Html,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let cli = Cli::parse_from(["formwork", "render", "signup.yaml"]);
        assert!(!cli.debug);
        match cli.command {
            Commands::Render {
                layout,
                values,
                format,
                submit,
                loading,
                ..
            } => {
                assert_eq!(layout, PathBuf::from("signup.yaml"));
                assert!(values.is_none());
                assert_eq!(format, OutputFormat::Table);
                assert!(!submit);
                assert!(!loading);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "formwork",
            "inspect",
            "signup.json",
            "--debug",
            "--config",
            "form.toml",
        ]);
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("form.toml")));
        assert!(matches!(cli.command, Commands::Inspect { .. }));
    }

    #[test]
    fn test_html_format() {
        let cli = Cli::parse_from(["formwork", "render", "a.yaml", "--format", "html", "--submit"]);
        assert!(matches!(
            cli.command,
            Commands::Render {
                format: OutputFormat::Html,
                submit: true,
                ..
            }
        ));
    }
}
