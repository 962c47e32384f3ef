//! CLI tool for extracting text from local files
//!
//! Runs the same extraction pipeline as the HTTP service against files on
//! disk, for scripting and diagnostics.
//!
//! Usage:
//!   extract-file [--json] [--output <path>] [--verbose] <file>...
//!
//! Options:
//!   --json        Emit the full JSON extraction result per file
//!   --output, -o  Write output to a file instead of stdout
//!   --verbose     Enable verbose logging

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use extract_api::config::ExtractionConfig;
use extract_api::models::{ExtractionResponse, FileInfo};
use extract_api::services::ExtractionService;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut json_output = false;
    let mut output: Option<PathBuf> = None;
    let mut verbose = false;
    let mut files: Vec<PathBuf> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => {
                json_output = true;
            }
            "--output" | "-o" => {
                if i + 1 < args.len() {
                    output = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--verbose" | "-v" => {
                verbose = true;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => files.push(PathBuf::from(other)),
        }
        i += 1;
    }

    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    if files.is_empty() {
        print_help();
        anyhow::bail!("No input files given");
    }

    // No cache: every file is read exactly once
    let service = ExtractionService::new(ExtractionConfig::default(), None);

    let mut rendered = Vec::new();
    let mut failures = 0;

    for path in &files {
        match extract_path(&service, path).await {
            Ok(result) => {
                if json_output {
                    rendered.push(serde_json::to_string_pretty(&result)?);
                } else {
                    rendered.push(result.extracted_text);
                }
            }
            Err(e) => {
                eprintln!("{}: {:#}", path.display(), e);
                failures += 1;
            }
        }
    }

    let combined = rendered.join("\n");
    match output {
        Some(path) => std::fs::write(&path, combined)
            .with_context(|| format!("Failed to write output to {}", path.display()))?,
        None => println!("{}", combined),
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

async fn extract_path(service: &ExtractionService, path: &Path) -> Result<ExtractionResponse> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("invalid file name: {}", path.display()))?;

    let data =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let format = service.resolve_format(&filename).map_err(anyhow::Error::new)?;
    let file_info = FileInfo::new(data.len() as u64, Some(format));
    let extraction = service
        .extract(&filename, format, data)
        .await
        .map_err(anyhow::Error::new)?;

    Ok(ExtractionResponse::new(filename, extraction.text, file_info))
}

fn print_help() {
    println!(
        r#"extract-file {}

Extract plain text from local documents.

USAGE:
    extract-file [OPTIONS] <FILE>...

OPTIONS:
    --json              Emit the full JSON extraction result per file
    -o, --output PATH   Write output to PATH instead of stdout
    -v, --verbose       Enable verbose logging
    -h, --help          Print this help message

Exits with status 1 if any file fails to extract."#,
        env!("CARGO_PKG_VERSION")
    );
}
