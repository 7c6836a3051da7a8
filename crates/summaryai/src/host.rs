use crate::prelude::{eprintln, *};
use async_trait::async_trait;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use summaryai_core::doc_type::DocType;
use summaryai_core::prompt::SUCCESS_MESSAGE;
use tokio::io::AsyncReadExt;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// Everything the orchestrator needs from its surroundings besides
/// configuration and the network.
#[async_trait]
pub trait Host: Send + Sync {
    /// Current selection. `None` when there is nothing to read from.
    async fn read_selection(&self) -> Result<Option<String>, GenerateError>;

    /// Single choice among `options`. `None` when the user cancels.
    async fn pick(&self, placeholder: &str, options: &[&str]) -> Option<usize>;

    fn begin_progress(&self, title: &str);

    fn end_progress(&self);

    fn notify(&self, level: Level, message: &str);

    async fn write_clipboard(&self, text: &str) -> Result<(), GenerateError>;

    /// Message shown once the text has been delivered.
    fn success_message(&self) -> &str {
        SUCCESS_MESSAGE
    }
}

/// Where the selection comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
    None,
}

impl InputSource {
    /// `-` means stdin. Without a file, stdin is used only when it is piped.
    pub fn detect(file: Option<PathBuf>, stdin_is_terminal: bool) -> Self {
        match file {
            Some(path) if path.as_os_str() == "-" => InputSource::Stdin,
            Some(path) => InputSource::File(path),
            None if !stdin_is_terminal => InputSource::Stdin,
            None => InputSource::None,
        }
    }
}

/// Where the generated text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Clipboard,
    Stdout,
}

/// Host backed by the terminal: spinner on stderr, menu on the controlling
/// terminal, clipboard through an external utility.
pub struct TerminalHost {
    source: InputSource,
    preset: Option<DocType>,
    output: Output,
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalHost {
    pub fn new(source: InputSource, preset: Option<DocType>, output: Output) -> Self {
        Self {
            source,
            preset,
            output,
            spinner: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Host for TerminalHost {
    async fn read_selection(&self) -> Result<Option<String>, GenerateError> {
        match &self.source {
            InputSource::None => Ok(None),
            InputSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map(Some)
                .map_err(|e| {
                    GenerateError::Input(format!("Failed to read '{}': {}", path.display(), e))
                }),
            InputSource::Stdin => {
                let mut buffer = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buffer)
                    .await
                    .map_err(|e| GenerateError::Input(format!("Failed to read stdin: {e}")))?;
                Ok(Some(buffer))
            }
        }
    }

    async fn pick(&self, placeholder: &str, options: &[&str]) -> Option<usize> {
        if let Some(doc_type) = self.preset {
            let label = doc_type.label();
            return options.iter().position(|option| *option == label);
        }

        let placeholder = placeholder.to_string();
        let options: Vec<String> = options.iter().map(|o| o.to_string()).collect();

        let choice = tokio::task::spawn_blocking(move || prompt_choice(&placeholder, &options))
            .await
            .map_err(|e| eyre!("Picker task failed: {}", e))
            .and_then(|result| result.map_err(|e| eyre!("Picker unavailable: {}", e)));

        match choice {
            Ok(choice) => choice,
            Err(e) => {
                log::warn!("{e}; pass --doc-type to choose without a terminal");
                None
            }
        }
    }

    fn begin_progress(&self, title: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(title.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(spinner);
        }
    }

    fn end_progress(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(spinner) = slot.take() {
                spinner.finish_and_clear();
            }
        }
    }

    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Info => eprintln!("{}", message.green()),
            Level::Warning => eprintln!("{}", message.yellow()),
            Level::Error => eprintln!("{}", message.red().bold()),
        }
    }

    async fn write_clipboard(&self, text: &str) -> Result<(), GenerateError> {
        match self.output {
            Output::Clipboard => crate::clipboard::copy(text).await,
            Output::Stdout => {
                print!("{text}");
                std::io::stdout()
                    .flush()
                    .map_err(|e| {
                        GenerateError::Clipboard(format!("Failed to write stdout: {e}"))
                    })
            }
        }
    }

    fn success_message(&self) -> &str {
        match self.output {
            Output::Clipboard => SUCCESS_MESSAGE,
            Output::Stdout => "Git documentation written to stdout!",
        }
    }
}

/// Reader for the interactive menu. The selection may already occupy stdin,
/// so the controlling terminal is preferred.
fn open_terminal() -> std::io::Result<Box<dyn BufRead>> {
    #[cfg(unix)]
    {
        if let Ok(tty) = std::fs::File::open("/dev/tty") {
            return Ok(Box::new(std::io::BufReader::new(tty)));
        }
    }

    if std::io::stdin().is_terminal() {
        return Ok(Box::new(std::io::BufReader::new(std::io::stdin())));
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "no terminal available",
    ))
}

fn prompt_choice(placeholder: &str, options: &[String]) -> std::io::Result<Option<usize>> {
    let mut reader = open_terminal()?;

    eprintln!("{}", placeholder.bold());
    for (i, option) in options.iter().enumerate() {
        eprintln!("  {} {}", format!("{}.", i + 1).cyan(), option);
    }

    loop {
        anstream::eprint!("Select [1-{}] (empty to cancel): ", options.len());
        std::io::stderr().flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match parse_choice(&line, options) {
            Choice::Selected(index) => return Ok(Some(index)),
            Choice::Cancelled => return Ok(None),
            Choice::Invalid => {
                eprintln!("{}", f!("'{}' is not an option", line.trim()).yellow())
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Selected(usize),
    Cancelled,
    Invalid,
}

/// Accepts a 1-based number, an exact option, or a documentation alias.
fn parse_choice(answer: &str, options: &[String]) -> Choice {
    let answer = answer.trim();

    if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
        return Choice::Cancelled;
    }

    if let Ok(number) = answer.parse::<usize>() {
        return match number.checked_sub(1) {
            Some(index) if index < options.len() => Choice::Selected(index),
            _ => Choice::Invalid,
        };
    }

    if let Some(index) = options
        .iter()
        .position(|option| option.eq_ignore_ascii_case(answer))
    {
        return Choice::Selected(index);
    }

    answer
        .parse::<DocType>()
        .ok()
        .and_then(|doc_type| options.iter().position(|option| option == doc_type.label()))
        .map(Choice::Selected)
        .unwrap_or(Choice::Invalid)
}
