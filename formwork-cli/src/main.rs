//! Formwork CLI - render declarative form layouts.
//!
//! Commands:
//! - `formwork inspect <layout>`: Show fields with resolved spans and renderers
//! - `formwork render <layout>`: Render a layout as a table or HTML
//!
//! Environment variables:
//! - FORMWORK_*: Override configuration values (see `formwork --help`)
//! - RUST_LOG: Log filter when `--debug` is not given
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use formwork::render::RenderOptions;
use formwork::{inspect, render};
use formwork::{Cli, Commands};
use formwork_config::ConfigProvider;

/// Map a command result to an exit code, printing the error chain.
fn handle_result(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut provider = ConfigProvider::new();
    if let Some(path) = &cli.config {
        provider = provider.with_file(path);
    }
    let config = provider.load_form_config()?;

    match cli.command {
        Commands::Inspect { layout } => inspect::run_inspect(&layout, config),
        Commands::Render {
            layout,
            values,
            errors,
            format,
            submit,
            loading,
        } => {
            let options = RenderOptions {
                values,
                errors,
                format,
                submit,
                loading,
            };
            render::run_render(&layout, &options, config)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("formwork=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(handle_result(run(cli)));
}
