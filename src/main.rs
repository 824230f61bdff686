use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use loan_eda::dashboard::Dashboard;
use loan_eda::server::{self, DEFAULT_BIND};
use loan_eda::{DashboardError, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;

    let dashboard = Dashboard::prepare(&cli.data)?;

    if let Some(path) = &cli.render {
        fs::write(path, dashboard.page.as_bytes())?;
        info!(output = %path.display(), "page written");
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(cli.bind, dashboard.page))
}

fn init_tracing() -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| DashboardError::Logging(err.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Exploratory dashboard over the loan records workbook."
)]
struct Cli {
    /// Workbook holding the DATA and Description sheets.
    #[arg(long, default_value = "data/DATA.xlsx")]
    data: PathBuf,

    /// Address the HTTP server binds to.
    #[arg(long, default_value = DEFAULT_BIND)]
    bind: SocketAddr,

    /// Write the rendered page to this file and exit instead of serving it.
    #[arg(long)]
    render: Option<PathBuf>,
}
