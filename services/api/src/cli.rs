use crate::demo::{run_aggregate, run_demo, AggregateArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use medigap_quotes::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Medigap Quote Service",
    about = "Run and exercise the Medicare supplement quote aggregation service",
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
    /// Aggregate a rater payload from a JSON file and print the ranked buckets
    Aggregate(AggregateArgs),
    /// Run an offline demo against a synthetic rater payload
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the per-bucket display cap
    #[arg(long)]
    pub(crate) bucket_count: Option<usize>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Aggregate(args) => run_aggregate(args),
        Command::Demo(args) => run_demo(args),
    }
}
