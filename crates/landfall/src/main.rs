use crate::prelude::*;
use clap::Parser;

mod analyze;
mod api;
mod dashboard;
mod error;
mod overview;
mod prelude;
mod render;
mod serve;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "SpaceX booster recovery statistics from the terminal or over HTTP"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// SpaceX API base URL
    #[clap(
        long,
        env = "LANDFALL_API_BASE",
        global = true,
        default_value = api::DEFAULT_API_BASE
    )]
    api_base: String,

    /// Request timeout in seconds
    #[clap(long, env = "LANDFALL_TIMEOUT", global = true, default_value = "10")]
    timeout: u64,

    /// Whether to display additional information.
    #[clap(long, env = "LANDFALL_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Quick summary of the booster fleet
    Overview(crate::overview::App),

    /// Fleet, landing pad, and recent recovery dashboard
    Dashboard(crate::dashboard::App),

    /// Yearly trend, landing types, reuse and failure analysis
    Analyze(crate::analyze::App),

    /// Serve recovery statistics as a JSON API
    Serve(crate::serve::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Overview(sub_app) => crate::overview::run(sub_app, app.global).await,
        SubCommands::Dashboard(sub_app) => crate::dashboard::run(sub_app, app.global).await,
        SubCommands::Analyze(sub_app) => crate::analyze::run(sub_app, app.global).await,
        SubCommands::Serve(sub_app) => crate::serve::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
