use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use factclean::dictionary::build_dictionary;
use factclean::extract::load_table;
use factclean::load::write_dictionary;

#[derive(Parser)]
#[command(about = "Rebuild the data dictionary of an already-cleaned table")]
struct Args {
    /// Cleaned table (CSV)
    input: PathBuf,

    /// Also write the dictionary here (.parquet or CSV)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let table = load_table(&args.input)
        .with_context(|| format!("loading cleaned table {:?}", args.input))?;
    let dict = build_dictionary(&table);

    println!("\n--- Data Dictionary ({} rows) ---", table.len());
    println!(
        "{:<14} | {:<8} | {:>6} | {:>6} | {}",
        "Column", "Type", "Nulls", "Unique", "Sample"
    );
    for d in &dict {
        println!(
            "{:<14} | {:<8} | {:>6} | {:>6} | {}",
            d.column, d.dtype, d.nulls, d.unique, d.sample
        );
    }

    if let Some(path) = &args.output {
        write_dictionary(&dict, path)?;
        tracing::info!(path = %path.display(), "dictionary written");
    }
    Ok(())
}
