use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use trustchart::config::{load_provider_config, ProviderConfig};
use trustchart::TrustChart;

#[derive(Parser)]
#[command(name = "trustchart")]
#[command(about = "Fetch fund price histories, merge them by date and render CSV plus a dygraph page")]
struct Cli {
    /// Request parameters JSON file, or `-` for stdin
    #[arg(short, long)]
    params: PathBuf,

    /// Optional provider override JSON
    #[arg(long)]
    provider_config: Option<PathBuf>,

    /// Where to write the HTML chart
    #[arg(short, long, default_value = "index.html")]
    output: PathBuf,

    /// Runtime worker threads (defaults to the CPU count)
    #[arg(long)]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(workers) = cli.worker_threads {
        builder.worker_threads(workers.max(1));
    }
    let runtime = builder.build().context("Failed to build async runtime")?;

    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let params = read_params(&cli.params)?;
    let provider = match &cli.provider_config {
        Some(path) => load_provider_config(path)?,
        None => ProviderConfig::builtin(),
    };

    let chart = TrustChart::with_provider(&params, provider).await?;

    print!("{}", chart.csv()?);

    fs::write(&cli.output, chart.html()?)
        .with_context(|| format!("Failed to write chart to {}", cli.output.display()))?;
    info!("Wrote chart to {}", cli.output.display());

    Ok(())
}

fn read_params(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read parameters from stdin")?;
        return Ok(buf);
    }

    fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameters from {}", path.display()))
}
