//! Output module for presenting scan results
//!
//! This module handles:
//! - Formatting prices into compact labels
//! - Handing ordered results to a presenter
//! - Copying auction commands to the clipboard

mod clipboard;
mod presenter;
mod price;

pub use clipboard::{clipboard_from_config, Clipboard, ClipboardError, CommandClipboard, NoClipboard};
pub use presenter::{
    view_command, CollectingPresenter, ConsolePresenter, ResultEntry, ResultPresenter,
};
pub use price::format_price;
