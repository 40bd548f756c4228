use crate::report::{
    run_calculate, run_catalog_check, run_catalog_summary, CalculateArgs, CatalogCheckArgs,
    CatalogSummaryArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use cluster_points::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Cluster Points",
    about = "Compute university cluster points and check programme eligibility",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print all twenty cluster scores for a grade sheet
    Calculate(CalculateArgs),
    /// Inspect a course catalog CSV export
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Count clusters, courses and university listings in the export
    Summary(CatalogSummaryArgs),
    /// Check a grade sheet against one programme's requirements and cut-offs
    Check(CatalogCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Course catalog CSV loaded at start-up (overrides CATALOG_SEED_CSV)
    #[arg(long)]
    pub(crate) seed_csv: Option<std::path::PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calculate(args) => run_calculate(args),
        Command::Catalog {
            command: CatalogCommand::Summary(args),
        } => run_catalog_summary(args),
        Command::Catalog {
            command: CatalogCommand::Check(args),
        } => run_catalog_check(args),
    }
}
