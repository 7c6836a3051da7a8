use crate::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

mod client;
mod clipboard;
mod config;
mod config_cmd;
mod generate;
mod host;
mod orchestrator;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Turn a diff, code or change summary into Git documentation with Gemini"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Gemini API key (overrides the config file)
    #[clap(long, env = "SUMMARYAI_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Model id used for generation
    #[clap(long, env = "SUMMARYAI_MODEL", global = true)]
    model: Option<String>,

    /// Generative API host
    #[clap(long, env = "SUMMARYAI_HOST", global = true)]
    host: Option<String>,

    /// Request timeout in seconds (unset or 0 waits indefinitely)
    #[clap(long, env = "SUMMARYAI_TIMEOUT", global = true)]
    timeout: Option<u64>,

    /// Path to the configuration file
    #[clap(long, env = "SUMMARYAI_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Whether to display additional information.
    #[clap(long, env = "SUMMARYAI_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Generate documentation and copy it to the clipboard
    Generate(crate::generate::App),

    /// Inspect or change the configuration
    Config(crate::config_cmd::App),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Generate(sub_app) => crate::generate::run(sub_app, app.global).await,
        SubCommands::Config(sub_app) => crate::config_cmd::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
