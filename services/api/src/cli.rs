use crate::demo::{
    run_batch, run_demo, run_screen, run_tax, BatchArgs, DemoArgs, ScreenArgs, TaxArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use income_sentinel::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Income Sentinel",
    about = "Estimate plausible income, score fraud risk, and compute tax due for declarations",
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
    /// Screen a single declaration given on the command line
    Screen(ScreenArgs),
    /// Screen every declaration in a CSV file
    Batch(BatchArgs),
    /// Print the tax slab and liability for an income
    Tax(TaxArgs),
    /// Screen a handful of sample declarations against the bundled demo model
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Screen(args) => run_screen(args),
        Command::Batch(args) => run_batch(args),
        Command::Tax(args) => run_tax(args),
        Command::Demo(args) => run_demo(args),
    }
}
