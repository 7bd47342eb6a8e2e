// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! isowall CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use isowall::cli::{Reporter, Runner};
use isowall::config::{ExtractConfig, OutputSchema};
use isowall::projection::FitMode;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "isowall")]
#[command(about = "Extract isometric wall outlines from a scene description", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./isowall.toml plus ISOWALL_* variables)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract walls from a JSON scene file
    Extract {
        /// Input scene file
        input: PathBuf,

        /// Output JSON file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output schema (canonical, legacy)
        #[arg(long, value_parser = parse_schema)]
        schema: Option<OutputSchema>,

        /// Leave pixel coordinates out of the document
        #[arg(long)]
        no_pixels: bool,

        /// Camera fit strategy (bounds, fixed)
        #[arg(long, value_parser = parse_fit)]
        fit: Option<FitMode>,

        /// Write a sprite render plan to this file
        #[arg(long, value_name = "FILE")]
        render_plan: Option<PathBuf>,

        /// Process objects one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Write it to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        write: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn parse_schema(value: &str) -> std::result::Result<OutputSchema, String> {
    match value {
        "canonical" => Ok(OutputSchema::Canonical),
        "legacy" => Ok(OutputSchema::Legacy),
        other => Err(format!("unknown schema '{other}' (expected canonical or legacy)")),
    }
}

fn parse_fit(value: &str) -> std::result::Result<FitMode, String> {
    match value {
        "bounds" => Ok(FitMode::Bounds),
        "fixed" => Ok(FitMode::Fixed),
        other => Err(format!("unknown fit '{other}' (expected bounds or fixed)")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => ExtractConfig::from_file(path)?,
        None => ExtractConfig::load()?,
    };

    match cli.command {
        Commands::Extract {
            input,
            output,
            schema,
            no_pixels,
            fit,
            render_plan,
            sequential,
        } => {
            let mut config = config;
            if let Some(schema) = schema {
                config.schema = schema;
            }
            if no_pixels {
                config.emit_pixel_space = false;
            }
            if let Some(fit) = fit {
                config.fit = fit;
            }
            if sequential {
                config.parallel = false;
            }
            extract_command(config, &input, output.as_deref(), render_plan, cli.verbose)?;
        }
        Commands::Config { write } => match write {
            Some(path) => {
                config.save(&path)?;
                Reporter::success(&format!("Wrote configuration -> {}", path.display()));
            }
            None => print!("{}", config.to_toml()?),
        },
        Commands::Version => {
            println!("isowall v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn extract_command(
    config: ExtractConfig,
    input: &Path,
    output: Option<&Path>,
    render_plan: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    if !input.exists() {
        Reporter::report_error(&format!("Input file not found: {}", input.display()));
        std::process::exit(1);
    }

    let mut runner = Runner::new(config);
    if let Some(path) = render_plan {
        runner = runner.with_render_plan(path);
    }

    let result = runner.run(input, output)?;

    match output {
        Some(path) => {
            if verbose {
                Reporter::report_extraction(&input.display().to_string(), &result.report, result.duration);
            }
            Reporter::success(&format!(
                "Extracted {} wall(s) -> {}",
                result.report.walls.len(),
                path.display()
            ));
        }
        None => println!("{}", result.json),
    }

    if let Some(plan) = &result.render_plan {
        Reporter::report_info(&format!("Planned {} sprite render(s)", plan.len()));
    }

    if !result.report.failures.is_empty() {
        for failure in &result.report.failures {
            Reporter::report_warning(&format!("{}: {}", failure.object, failure.message));
        }
        std::process::exit(2);
    }

    Ok(())
}
