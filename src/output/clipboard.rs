//! Clipboard access
//!
//! The clipboard is reached through an external program (e.g. `xclip`,
//! `wl-copy`, `pbcopy`) that reads the text to copy from stdin.

use crate::config::ClipboardConfig;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Errors that can occur while copying to the clipboard
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard command configured")]
    Unavailable,

    #[error("failed to run clipboard command '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("clipboard command '{program}' exited with {status}")]
    Failed { program: String, status: String },
}

/// Destination for copied text
pub trait Clipboard: Send + Sync {
    /// Replaces the clipboard contents with `text`
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard backed by an external program
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Creates a clipboard that pipes text into `program args...`
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let spawn_error = |source| ClipboardError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(spawn_error)?;

        // A program that exits early surfaces through its exit status below
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(spawn_error(e));
                }
            }
        }

        let status = child.wait().map_err(spawn_error)?;
        if !status.success() {
            return Err(ClipboardError::Failed {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }

        Ok(())
    }
}

/// Clipboard used when no command is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}

/// Builds the clipboard described by the configuration
pub fn clipboard_from_config(config: &ClipboardConfig) -> Box<dyn Clipboard> {
    match config.command.as_deref() {
        Some([program, args @ ..]) => Box::new(CommandClipboard::new(program.clone(), args.to_vec())),
        _ => Box::new(NoClipboard),
    }
}
