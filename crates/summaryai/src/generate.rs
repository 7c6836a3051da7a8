use crate::client::HttpTransport;
use crate::config::LayeredConfig;
use crate::host::{InputSource, Output, TerminalHost};
use crate::orchestrator::Orchestrator;
use crate::prelude::{eprintln, *};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use summaryai_core::doc_type::DocType;
use summaryai_core::gemini::redacted_endpoint_url;

#[derive(Debug, clap::Parser)]
#[command(name = "generate")]
#[command(about = "Generate Git documentation from a diff, code or summary")]
pub struct App {
    /// Read the selection from this file ("-" for stdin). Defaults to piped stdin.
    #[clap(long, short)]
    pub file: Option<PathBuf>,

    /// Documentation type (commit, pr, docstring, release-notes). Prompts when omitted.
    #[clap(long, short = 't', value_parser = parse_doc_type)]
    pub doc_type: Option<DocType>,

    /// Write the result to stdout instead of the clipboard
    #[clap(long)]
    pub print: bool,
}

fn parse_doc_type(input: &str) -> std::result::Result<DocType, String> {
    input.parse()
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<ExitCode> {
    let config = LayeredConfig::from_global(&global)?;

    // A broken config file is reported by the orchestrator
    if global.verbose {
        eprintln!("Config file: {}", config.path().display());
        if let Ok(settings) = config.settings() {
            eprintln!(
                "Endpoint: {}",
                redacted_endpoint_url(&settings.host, &settings.model)
            );
            match settings.timeout {
                Some(timeout) => eprintln!("Timeout: {}s", timeout.as_secs()),
                None => eprintln!("Timeout: none"),
            }
        }
    }

    let transport = HttpTransport::new()?;

    let source = InputSource::detect(app.file, std::io::stdin().is_terminal());
    let output = if app.print {
        Output::Stdout
    } else {
        Output::Clipboard
    };
    let host = TerminalHost::new(source, app.doc_type, output);

    let orchestrator = Orchestrator::new(&config, &host, &transport);

    // Failures have already been reported to the user
    match orchestrator.run().await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
