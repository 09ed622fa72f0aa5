use std::io::Write;

use crate::model::config::ClipboardBackend;

/// Error type for clipboard writes
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("could not write to clipboard: {0}")]
    WriteFailed(String),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Destination for copied text.
///
/// Callers log a failed write and carry on as if it succeeded; nothing in the
/// library or builder depends on the outcome.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut cb =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        cb.set_text(text.to_string())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

/// Prints copied text to stdout, for terminals without a clipboard
#[derive(Debug, Default)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", text)?;
        Ok(())
    }
}

/// Keeps every write in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub writes: Vec<String>,
}

impl MemoryClipboard {
    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes.push(text.to_string());
        Ok(())
    }
}

/// Always fails, for exercising the fire-and-forget paths
#[derive(Debug, Default)]
pub struct FailingClipboard;

impl Clipboard for FailingClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no display".into()))
    }
}

/// Build the clipboard selected in config
pub fn open_clipboard(backend: ClipboardBackend) -> Box<dyn Clipboard> {
    match backend {
        ClipboardBackend::System => Box::new(SystemClipboard),
        ClipboardBackend::Stdout => Box::new(StdoutClipboard),
    }
}

/// Write `text`, logging instead of returning any failure
pub fn write_or_warn(clipboard: &mut dyn Clipboard, text: &str) {
    match clipboard.write_text(text) {
        Ok(()) => log::debug!("copied {} bytes to clipboard", text.len()),
        Err(e) => log::warn!("{}", e),
    }
}
