//! Result presentation
//!
//! A scan hands its ordered matches to a `ResultPresenter` one entry at a
//! time. Each entry carries everything a front end needs to render it and an
//! `activate` action that copies the in-game command for the auction.

use crate::output::clipboard::Clipboard;
use crate::output::price::format_price;
use crate::scan::FoundItem;
use std::io::Write;

/// A renderable search result
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry {
    /// Item name text
    pub name: String,

    /// Formatted price label (e.g. "1.67m")
    pub price_label: String,

    /// Command copied when the entry is activated
    pub view_command: String,
}

impl ResultEntry {
    /// Builds the renderable form of a found item
    pub fn from_item(item: &FoundItem) -> Self {
        Self {
            name: item.name.clone(),
            price_label: format_price(item.price),
            view_command: view_command(&item.id),
        }
    }

    /// Copies the entry's view command to the clipboard
    ///
    /// Failures are logged and never propagated.
    ///
    /// # Returns
    ///
    /// * `true` - The text was copied and a confirmation should be shown
    /// * `false` - The copy failed; no confirmation
    pub fn activate(&self, clipboard: &dyn Clipboard) -> bool {
        match clipboard.write_text(&self.view_command) {
            Ok(()) => {
                tracing::info!("Copied to clipboard: {}", self.view_command);
                true
            }
            Err(e) => {
                tracing::error!("Failed to copy text: {}", e);
                false
            }
        }
    }
}

/// The in-game command that opens an auction
pub fn view_command(auction_id: &str) -> String {
    format!("/viewauction {}", auction_id)
}

/// Sink for ordered scan results
pub trait ResultPresenter {
    /// Called once before the first entry of a scan
    fn begin(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    /// Renders one entry; entries arrive in ascending price order
    fn present(&mut self, entry: ResultEntry) -> std::io::Result<()>;

    /// Called once after the last entry of a scan
    fn finish(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Presenter that keeps every entry of the latest scan in memory
#[derive(Debug, Default)]
pub struct CollectingPresenter {
    entries: Vec<ResultEntry>,
}

impl CollectingPresenter {
    /// Creates an empty presenter
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries of the latest scan, in presentation order
    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }
}

impl ResultPresenter for CollectingPresenter {
    fn begin(&mut self) -> std::io::Result<()> {
        self.entries.clear();
        Ok(())
    }

    fn present(&mut self, entry: ResultEntry) -> std::io::Result<()> {
        self.entries.push(entry);
        Ok(())
    }
}

/// Presenter that prints a numbered list to a writer
///
/// Entries are also kept so an interactive front end can activate them by
/// number.
pub struct ConsolePresenter<W: Write> {
    out: W,
    entries: Vec<ResultEntry>,
}

impl<W: Write> ConsolePresenter<W> {
    /// Creates a presenter writing to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            entries: Vec::new(),
        }
    }

    /// Looks up an entry of the latest scan by its 1-based number
    pub fn entry(&self, number: usize) -> Option<&ResultEntry> {
        number.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Entries of the latest scan
    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    /// Consumes the presenter, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultPresenter for ConsolePresenter<W> {
    fn begin(&mut self) -> std::io::Result<()> {
        self.entries.clear();
        Ok(())
    }

    fn present(&mut self, entry: ResultEntry) -> std::io::Result<()> {
        writeln!(
            self.out,
            "{:>4}. {:<40} {:>10}",
            self.entries.len() + 1,
            entry.name,
            entry.price_label
        )?;
        self.entries.push(entry);
        Ok(())
    }

    fn finish(&mut self) -> std::io::Result<()> {
        if self.entries.is_empty() {
            writeln!(self.out, "No matching auctions found.")?;
        } else {
            writeln!(self.out, "{} matching auctions.", self.entries.len())?;
        }
        self.out.flush()
    }
}
