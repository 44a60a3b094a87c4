use anyhow::Result;
use clap::Parser;
use factclean::{EtlConfig, Pipeline};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Clean a dirty fact-check table and write its data dictionary")]
struct Args {
    /// YAML file holding the input/output paths
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dirty input table
    #[arg(long)]
    input: Option<PathBuf>,

    /// Cleaned table (.parquet or CSV)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Data dictionary (.parquet or CSV)
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Write a JSON run summary here
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) resolve config ───────────────────────────────────────────
    let args = Args::parse();
    let base = match &args.config {
        Some(path) => EtlConfig::from_yaml_file(path)?,
        None => EtlConfig::default(),
    };
    let config = base.with_overrides(args.input, args.output, args.dictionary, args.report);
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        dictionary = %config.dictionary.display(),
        "startup"
    );

    // ─── 3) run ──────────────────────────────────────────────────────
    let report = Pipeline::new(config).run()?;
    info!(
        rows_in = report.initial_rows,
        rows_out = report.final_rows,
        "all done"
    );
    Ok(())
}
