//! Generates classes from a metadata document into a directory.
//!
//! Run with: cargo run --example generate -- <metadata.json> <output-dir> [config.toml]
//!
//! Set `RUST_LOG=debug` to see merge decisions.

use gqlsmith::prelude::*;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gqlsmith=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [metadata_path, output, rest @ ..] = args.as_slice() else {
        eprintln!("usage: generate <metadata.json> <output-dir> [config.toml]");
        std::process::exit(2);
    };

    let config = match rest.first() {
        Some(config_path) => Config::from_toml_str(&std::fs::read_to_string(config_path)?)?,
        None => Config::new(),
    }
    .with_output(output);

    let summary = generate_into_from_file(Path::new(metadata_path), &config)?;
    println!(
        "{} written, {} unchanged, {} failed",
        summary.written.len(),
        summary.unchanged.len(),
        summary.failures.len()
    );
    for (target, error) in &summary.failures {
        println!("  {target}: {error}");
    }

    if !summary.is_complete() {
        std::process::exit(1);
    }
    Ok(())
}
