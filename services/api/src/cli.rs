use crate::demo::{run_demo, run_render, DemoArgs, RenderArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use matchflow::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "MatchFlow",
    about = "Serve and explore the MatchFlow recruiting marketplace from the command line",
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
    /// Print the card grid for one view of the dataset
    Render(RenderArgs),
    /// Walk through a scripted marketplace session against the dataset
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
        Command::Render(args) => run_render(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
