use crate::server;
use crate::terminal::{run_quote, run_wizard, QuoteArgs, WizardArgs};
use clap::{Args, Parser, Subcommand};
use cupcake_order::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Cupcake Order",
    about = "Take cupcake orders through a guided wizard, in the terminal or over HTTP",
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
    /// Walk through an order interactively in the terminal
    Wizard(WizardArgs),
    /// Price a complete order in one shot and print the share text
    Quote(QuoteArgs),
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
        Command::Wizard(args) => run_wizard(args),
        Command::Quote(args) => run_quote(args),
    }
}
