use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use image_vault::infrastructure::storage::audit_store;

/// Re-hash every stored image and report objects that do not match their name
#[derive(Parser)]
struct Cli {
    /// Storage root (defaults to UPLOAD_DIR, then `uploads`)
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    upload_dir: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let report = audit_store(&cli.upload_dir)
        .await
        .with_context(|| format!("failed to audit {}", cli.upload_dir.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Objects checked: {}", report.checked);

        println!("Invalid names: {}", report.invalid_names.len());
        for path in &report.invalid_names {
            println!("  {}", path.display());
        }

        println!("Digest mismatches: {}", report.mismatches.len());
        for mismatch in &report.mismatches {
            println!(
                "  {}: expected {}, got {}",
                mismatch.path.display(),
                mismatch.expected,
                mismatch.actual
            );
        }
    }

    if !report.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}
