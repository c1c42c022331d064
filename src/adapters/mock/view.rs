//! Recording reply view for testing.
//!
//! Keeps the ordered list of view calls plus a snapshot of what a real view
//! would currently display.

use crate::traits::ReplyView;

/// One call made against the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    ShowWorking,
    HideWorking,
    SetReplyText(String),
    AppendProgressMarker,
    RemoveProgressMarker,
    MarkAsError(String),
    MarkComplete(Option<String>),
}

/// In-memory view that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    /// Every call, in order
    pub calls: Vec<ViewCall>,
    /// Reply text as last set
    pub text: String,
    /// Whether the working indicator is shown
    pub working: bool,
    /// Whether the progress marker is shown
    pub marker: bool,
    /// Error text once marked as error
    pub error: Option<String>,
    /// Whether `mark_complete` was called
    pub completed: bool,
    /// Placeholder passed to `mark_complete`, if any
    pub placeholder: Option<String>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the user would see as the reply body.
    pub fn rendered(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Error: {}", error);
        }
        match &self.placeholder {
            Some(placeholder) if self.text.is_empty() => placeholder.clone(),
            _ => self.text.clone(),
        }
    }
}

impl ReplyView for RecordingView {
    fn show_working(&mut self) {
        self.calls.push(ViewCall::ShowWorking);
        self.working = true;
    }

    fn hide_working(&mut self) {
        self.calls.push(ViewCall::HideWorking);
        self.working = false;
    }

    fn set_reply_text(&mut self, text: &str) {
        self.calls.push(ViewCall::SetReplyText(text.to_string()));
        self.text = text.to_string();
        // Replacing the text drops the marker, like replacing a node's content
        self.marker = false;
    }

    fn append_progress_marker(&mut self) {
        self.calls.push(ViewCall::AppendProgressMarker);
        self.marker = true;
    }

    fn remove_progress_marker(&mut self) {
        self.calls.push(ViewCall::RemoveProgressMarker);
        self.marker = false;
    }

    fn mark_as_error(&mut self, text: &str) {
        self.calls.push(ViewCall::MarkAsError(text.to_string()));
        self.error = Some(text.to_string());
    }

    fn mark_complete(&mut self, placeholder_if_empty: Option<&str>) {
        self.calls
            .push(ViewCall::MarkComplete(placeholder_if_empty.map(str::to_string)));
        self.completed = true;
        self.placeholder = placeholder_if_empty.map(str::to_string);
    }
}
