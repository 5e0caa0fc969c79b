//! Clipboard host for the terminal.
//!
//! Uses the system clipboard through arboard. When no system clipboard is
//! reachable (headless sessions, SSH) the text is sent to the terminal as an
//! OSC 52 escape sequence on stderr.

use std::io::Write;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use jtabs_core::{Clipboard, ClipboardError, ClipboardHost};

use crate::output::Output;

/// How long clipboard contents written by this process survive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ownership {
    /// The platform keeps the contents after the process exits.
    Platform,
    /// The process owns the selection (X11, Wayland) and has to keep
    /// serving it until another application takes it over.
    HoldUntilReplaced,
}

impl Ownership {
    fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::HoldUntilReplaced
        } else {
            Self::Platform
        }
    }
}

/// System clipboard backed by arboard.
struct SystemClipboard(arboard::Clipboard);

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let result = match Ownership::current() {
            Ownership::Platform => self.0.set_text(text),
            Ownership::HoldUntilReplaced => {
                Output::new().muted(
                    "Keeping the clipboard until another application replaces it (Ctrl+C to stop)",
                );
                set_and_wait(&mut self.0, text)
            }
        };
        result.map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Set the clipboard and block until its contents are replaced, so the
/// selection outlives a short-lived process.
#[cfg(target_os = "linux")]
fn set_and_wait(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    clipboard.set().wait().text(text)
}

#[cfg(not(target_os = "linux"))]
fn set_and_wait(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

/// Clipboard host for a terminal session.
pub(crate) struct TerminalHost {
    system: Option<SystemClipboard>,
}

impl TerminalHost {
    /// Connect to the system clipboard, if there is one.
    pub(crate) fn new() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(SystemClipboard(clipboard)),
            Err(e) => {
                tracing::info!(error = %e, "System clipboard unavailable");
                None
            }
        };
        Self { system }
    }

    /// Host that only uses the terminal escape sequence.
    pub(crate) fn terminal_only() -> Self {
        Self { system: None }
    }
}

impl ClipboardHost for TerminalHost {
    fn platform(&mut self) -> Option<&mut dyn Clipboard> {
        self.system.as_mut().map(|c| c as &mut dyn Clipboard)
    }

    fn fallback_copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut stderr = std::io::stderr().lock();
        stderr
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| stderr.flush())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// OSC 52 "set clipboard" sequence carrying `text`.
fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", BASE64_STANDARD.encode(text))
}
