// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// prezi-demo — builds a sample IIIF manifest and prints or writes it.
//
// Entry point. Initialises logging, loads the presentation configuration, and
// runs the chosen demo or re-emits a manifest read from a file.

mod demos;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use prezi_core::{PresentationConfig, Result};
use prezi_model::Manifest;

use demos::Demo;

/// Build a sample IIIF Presentation 3 manifest
#[derive(Parser, Debug)]
#[command(name = "prezi-demo")]
#[command(version, about, long_about = None)]
struct Args {
    /// Which manifest to build
    #[arg(value_enum, default_value = "image")]
    demo: Demo,

    /// Read this manifest document instead of building a demo
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Presentation settings as a JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force indented output regardless of the configuration
    #[arg(long)]
    pretty: bool,

    /// Print the document's SHA-256 fingerprint to stderr
    #[arg(long)]
    fingerprint: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!(demo = ?args.demo, "prezi-demo starting");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "demo failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PresentationConfig::from_json_file(path)?,
        None => PresentationConfig::default(),
    };
    if args.pretty {
        config.pretty = true;
    }

    let manifest = match &args.input {
        Some(path) => Manifest::from_json(&std::fs::read_to_string(path)?)?,
        None => args.demo.build(&config.default_language)?,
    };
    let document = manifest.to_document_with(&config)?;

    if args.fingerprint {
        eprintln!("sha256:{}", document.fingerprint()?);
    }

    match &args.output {
        Some(path) => document.write_to(path)?,
        None if config.pretty => println!("{}", document.to_json_pretty()?),
        None => println!("{}", document.to_json()?),
    }
    Ok(())
}
