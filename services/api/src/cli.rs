use crate::demo::{run_dashboard_report, run_demo, DashboardReportArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use cop_backoffice::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "COP Back-Office",
    about = "Run the professional-orientation center back office from the command line",
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
    /// Work with the employability dashboard
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommand,
    },
    /// Run an end-to-end demo: seed data, aggregate, export
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DashboardCommand {
    /// Aggregate the seeded collections and print the report
    Report(DashboardReportArgs),
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
        Command::Dashboard {
            command: DashboardCommand::Report(args),
        } => run_dashboard_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
