//! Crossterm-based reply view.
//!
//! Renders the in-progress reply as an append-only stream of text on a
//! terminal. The working indicator sits on the line where the reply will
//! start and is cleared before the first token is written. The progress
//! marker is a single cell after the text, erased before more text arrives.
//! A styled view remembers where the reply started so an error can replace
//! the partial text; plain output can only append the error after it.

use crossterm::cursor::{MoveLeft, MoveToColumn, RestorePosition, SavePosition};
use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, IsTerminal, Write};

use crate::traits::ReplyView;

const WORKING_TEXT: &str = "Thinking…";
const PROGRESS_MARKER: &str = "▌";

/// Reply view writing to a terminal (or any writer).
pub struct TerminalView<W: Write + Send> {
    out: W,
    /// Whether cursor movement and styling are available
    styled: bool,
    /// Reply text already written
    printed: String,
    working_shown: bool,
    marker_shown: bool,
    /// Cursor position saved where the reply text begins
    anchored: bool,
}

impl TerminalView<io::Stdout> {
    /// View on stdout, styled only when stdout is a terminal.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let styled = out.is_terminal();
        Self::new(out, styled)
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self {
            out,
            styled,
            printed: String::new(),
            working_shown: false,
            marker_shown: false,
            anchored: false,
        }
    }

    /// Plain output: no indicator, no marker, no escape sequences.
    pub fn plain(out: W) -> Self {
        Self::new(out, false)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        let result = f(&mut self.out).and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::warn!("Failed to write reply to terminal: {}", e);
        }
    }

    fn clear_working_line(&mut self) {
        if self.working_shown {
            self.emit(|out| queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine)));
            self.working_shown = false;
        }
    }

    fn erase_marker(&mut self) {
        if self.marker_shown {
            self.emit(|out| queue!(out, MoveLeft(1), Clear(ClearType::UntilNewLine)));
            self.marker_shown = false;
        }
    }
}

impl<W: Write + Send> ReplyView for TerminalView<W> {
    fn show_working(&mut self) {
        if !self.styled {
            return;
        }
        self.emit(|out| {
            queue!(
                out,
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                PrintStyledContent(WORKING_TEXT.dim())
            )
        });
        self.working_shown = true;
    }

    fn hide_working(&mut self) {
        self.clear_working_line();
    }

    fn set_reply_text(&mut self, text: &str) {
        self.erase_marker();

        let delta = match text.strip_prefix(self.printed.as_str()) {
            Some(rest) => rest.to_string(),
            // Text was replaced rather than extended; start a fresh line
            None => format!("\n{}", text),
        };
        if !delta.is_empty() {
            if self.styled && !self.anchored {
                self.emit(|out| queue!(out, SavePosition));
                self.anchored = true;
            }
            self.emit(|out| queue!(out, Print(delta)));
        }
        self.printed = text.to_string();
    }

    fn append_progress_marker(&mut self) {
        if !self.styled || self.marker_shown {
            return;
        }
        self.emit(|out| queue!(out, PrintStyledContent(PROGRESS_MARKER.dim())));
        self.marker_shown = true;
    }

    fn remove_progress_marker(&mut self) {
        self.erase_marker();
    }

    fn mark_as_error(&mut self, text: &str) {
        self.erase_marker();
        self.clear_working_line();

        let message = format!("Error: {}", text);
        if self.styled {
            if self.anchored {
                self.emit(|out| queue!(out, RestorePosition, Clear(ClearType::FromCursorDown)));
                self.anchored = false;
            }
            self.emit(|out| queue!(out, PrintStyledContent(message.red()), Print("\n")));
        } else {
            let separator = if self.printed.is_empty() { "" } else { "\n" };
            self.emit(|out| queue!(out, Print(separator), Print(message), Print("\n")));
        }
    }

    fn mark_complete(&mut self, placeholder_if_empty: Option<&str>) {
        self.erase_marker();
        self.clear_working_line();

        match placeholder_if_empty {
            Some(placeholder) if self.styled => {
                let placeholder = placeholder.to_string();
                self.emit(|out| queue!(out, PrintStyledContent(placeholder.dim()), Print("\n")));
            }
            Some(placeholder) => {
                let placeholder = placeholder.to_string();
                self.emit(|out| queue!(out, Print(placeholder), Print("\n")));
            }
            None => self.emit(|out| queue!(out, Print("\n"))),
        }
    }
}
