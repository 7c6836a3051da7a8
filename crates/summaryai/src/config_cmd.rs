use crate::config::{load_file, mask_key, save_file, LayeredConfig};
use crate::prelude::{println, *};
use colored::Colorize;
use std::process::ExitCode;

#[derive(Debug, clap::Parser)]
#[command(name = "config")]
#[command(about = "Inspect or change the summaryai configuration")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Print the configuration file path
    #[clap(name = "path")]
    Path,

    /// Show the effective settings (the API key is masked)
    #[clap(name = "show")]
    Show,

    /// Store the API key in the configuration file
    #[clap(name = "set-key")]
    SetKey(SetKeyOptions),
}

#[derive(Debug, clap::Args)]
pub struct SetKeyOptions {
    /// Gemini API key
    pub key: String,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<ExitCode> {
    let config = LayeredConfig::from_global(&global)?;

    match app.command {
        Commands::Path => println!("{}", config.path().display()),
        Commands::Show => show(&config)?,
        Commands::SetKey(options) => set_key(&config, options)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn show(config: &LayeredConfig) -> Result<()> {
    let settings = config.settings()?;

    let api_key = settings
        .api_key
        .as_deref()
        .map(mask_key)
        .unwrap_or_else(|| "(not set)".to_string());
    let timeout = settings
        .timeout
        .map(|t| f!("{}s", t.as_secs()))
        .unwrap_or_else(|| "none".to_string());

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["Config file".bold().cyan(), config.path().display()]);
    table.add_row(prettytable::row!["API key".bold().cyan(), api_key]);
    table.add_row(prettytable::row!["Host".bold().cyan(), settings.host]);
    table.add_row(prettytable::row!["Model".bold().cyan(), settings.model]);
    table.add_row(prettytable::row!["Timeout".bold().cyan(), timeout]);
    table.printstd();

    Ok(())
}

fn set_key(config: &LayeredConfig, options: SetKeyOptions) -> Result<()> {
    let key = options.key.trim();
    if key.is_empty() {
        return Err(eyre!("The API key cannot be empty"));
    }

    let mut file = load_file(config.path())?;
    file.api_key = Some(key.to_string());
    save_file(config.path(), &file)?;

    println!(
        "API key {} saved to {}",
        mask_key(key),
        config.path().display()
    );

    Ok(())
}
