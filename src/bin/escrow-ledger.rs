use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use escrow_ledger::{
    account::AccountId, bin_utils::Service, config::LedgerConfig, processor::ProcessError,
};

#[derive(Parser)]
#[command(name = "escrow-ledger")]
#[command(about = "Replays ledger operations from CSV and prints final balances", long_about = None)]
struct Cli {
    /// CSV file with `op,sender,height,recipient,amount,tx` rows
    file: PathBuf,

    /// Administrator identity
    #[arg(long, conflicts_with = "config", required_unless_present = "config")]
    admin: Option<String>,

    /// JSON ledger configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write applied events as JSON lines to this file
    #[arg(long)]
    journal: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<LedgerConfig> {
    if let Some(path) = &cli.config {
        let file = File::open(path)
            .with_context(|| format!("Failed to open `{}`", path.display()))?;
        return serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse `{}`", path.display()));
    }
    let admin = cli
        .admin
        .clone()
        .context("Either --admin or --config is required")?;
    Ok(LedgerConfig::new(AccountId::new(admin)))
}

fn main() -> Result<()> {
    // stdout carries the report
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let file = File::open(&cli.file)
        .with_context(|| format!("Failed to open `{}`", cli.file.display()))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        config,
        error_printer: Box::new(|line, err| {
            match err {
                ProcessError::CommandErr(err) => eprintln!("Error at line {line}: {err}"),
                ProcessError::LedgerErr(err) => {
                    // rejected operations are expected, not input errors
                    tracing::debug!(line, %err, "operation rejected")
                }
            }
        }),
    };
    let processor = service.run()?;

    if let Some(path) = &cli.journal {
        let file = File::create(path)
            .with_context(|| format!("Failed to create `{}`", path.display()))?;
        let mut writer = BufWriter::new(file);
        for event in processor.journal() {
            serde_json::to_writer(&mut writer, event).context("Failed to encode event")?;
            writeln!(writer).context("Failed to write journal")?;
        }
        writer.flush().context("Failed to flush journal")?;
    }
    Ok(())
}
