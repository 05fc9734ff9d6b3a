//! Copyable trait and the clipboard helper behind it
//!
//! Uses `arboard` for cross-platform clipboard access. The clipboard is
//! opened per copy so nothing is held between key presses.

use super::Component;
use anyhow::{Context, Result};
use arboard::Clipboard;

/// Trait for components that can provide content for the clipboard
pub trait Copyable: Component {
    /// Human-readable text for the current selection, `None` if nothing to copy
    fn copy_text(&self) -> Option<String>;

    /// What will be copied, for the toast message
    fn copy_description(&self) -> String {
        format!("{:?}", self.id()).to_lowercase()
    }
}

/// Copy text to the system clipboard
///
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}
