use crate::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// A clipboard utility that reads the text to copy from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: &'static str,
    pub args: &'static [&'static str],
    /// Only usable when this variable is set (e.g. a Wayland session).
    pub requires_env: Option<&'static str>,
}

/// Tried in order; the first one found on `PATH` wins.
pub const CLIPBOARD_TOOLS: &[ClipboardTool] = &[
    ClipboardTool {
        program: "pbcopy",
        args: &[],
        requires_env: None,
    },
    ClipboardTool {
        program: "wl-copy",
        args: &[],
        requires_env: Some("WAYLAND_DISPLAY"),
    },
    ClipboardTool {
        program: "xclip",
        args: &["-selection", "clipboard"],
        requires_env: None,
    },
    ClipboardTool {
        program: "xsel",
        args: &["--clipboard", "--input"],
        requires_env: None,
    },
    ClipboardTool {
        program: "clip.exe",
        args: &[],
        requires_env: None,
    },
];

/// Pick the first tool that is installed and usable in this session.
///
/// `lookup` resolves a program name to a path and `env_set` reports whether
/// an environment variable is present.
pub fn select_tool(
    lookup: impl Fn(&str) -> Option<PathBuf>,
    env_set: impl Fn(&str) -> bool,
) -> Option<(ClipboardTool, PathBuf)> {
    CLIPBOARD_TOOLS.iter().find_map(|tool| {
        if let Some(var) = tool.requires_env {
            if !env_set(var) {
                return None;
            }
        }
        lookup(tool.program).map(|path| (*tool, path))
    })
}

fn detect() -> Option<(ClipboardTool, PathBuf)> {
    select_tool(
        |program| which::which(program).ok(),
        |var| std::env::var_os(var).is_some(),
    )
}

/// Copy `text` to the system clipboard through an external utility.
pub async fn copy(text: &str) -> Result<(), GenerateError> {
    let (tool, path) = detect().ok_or_else(|| {
        let tried = CLIPBOARD_TOOLS
            .iter()
            .map(|tool| tool.program)
            .collect::<Vec<_>>()
            .join(", ");
        GenerateError::Clipboard(format!(
            "No clipboard utility found (tried {tried}). \
             Use --print to write to stdout instead."
        ))
    })?;

    log::debug!("Copying {} bytes with {}", text.len(), path.display());

    pipe_to(&path, tool.args, text).await
}

/// Feed `text` to `program` and wait for it to exit.
///
/// X11 and Wayland tools fork a child that keeps serving the selection, so
/// only the exit status of the direct child is awaited and none of its
/// output pipes are held open.
pub async fn pipe_to(program: &Path, args: &[&str], text: &str) -> Result<(), GenerateError> {
    let name = program.display();

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| GenerateError::Clipboard(format!("Failed to start {name}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .await
            .map_err(|e| GenerateError::Clipboard(format!("Failed to write to {name}: {e}")))?;
        // Closing stdin lets the tool finish
        drop(stdin);
    }

    let status = child
        .wait()
        .await
        .map_err(|e| GenerateError::Clipboard(format!("{name} did not finish: {e}")))?;

    if !status.success() {
        return Err(GenerateError::Clipboard(format!("{name} exited with {status}")));
    }

    Ok(())
}
