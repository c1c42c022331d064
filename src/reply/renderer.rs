//! Render state machine for the pending reply.
//!
//! Consumes structured events in order and translates each legal transition
//! into calls on a [`ReplyView`]. Illegal transitions are reported as
//! [`Transition::Ignored`] and leave both the reply and the view untouched.

use crate::reply::state::{PendingReply, ReplyState, Terminal};
use crate::sse::StructuredEvent;
use crate::traits::{ReplyView, EMPTY_REPLY_PLACEHOLDER};

/// Why an event had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The reply already completed or errored
    AlreadyTerminal,
    /// `begin` has not been called yet
    NotStarted,
    /// The event is not valid in the current state
    InvalidInState,
    /// The event type is not one the renderer knows
    UnknownEvent,
}

/// Result of feeding one input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied { from: ReplyState, to: ReplyState },
    Ignored(IgnoreReason),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied { .. })
    }
}

/// Owns the pending reply and the view it is rendered into.
#[derive(Debug)]
pub struct ReplyRenderer<V: ReplyView> {
    reply: PendingReply,
    view: V,
}

impl<V: ReplyView> ReplyRenderer<V> {
    /// Create a renderer in the `Idle` state. Nothing is drawn yet.
    pub fn new(view: V) -> Self {
        Self {
            reply: PendingReply::new(),
            view,
        }
    }

    /// Move `Idle → AwaitingFirstToken` and show the working indicator.
    pub fn begin(&mut self) -> Transition {
        if self.reply.state != ReplyState::Idle {
            return Transition::Ignored(IgnoreReason::InvalidInState);
        }
        self.view.show_working();
        self.reply.working_visible = true;
        self.set_state(ReplyState::AwaitingFirstToken)
    }

    /// Apply one parsed event.
    pub fn apply(&mut self, event: &StructuredEvent) -> Transition {
        if self.reply.is_terminal() {
            tracing::debug!(
                "Ignoring '{}' event after reply reached {}",
                event.event_type_name(),
                self.reply.state.as_str()
            );
            return Transition::Ignored(IgnoreReason::AlreadyTerminal);
        }

        match event {
            StructuredEvent::AgentStart { .. } => match self.reply.state {
                ReplyState::AwaitingFirstToken => {
                    self.view.show_working();
                    self.reply.working_visible = true;
                    self.set_state(ReplyState::AwaitingFirstToken)
                }
                ReplyState::Idle => Transition::Ignored(IgnoreReason::NotStarted),
                _ => Transition::Ignored(IgnoreReason::InvalidInState),
            },
            StructuredEvent::TextChunk { data, .. } => match self.reply.state {
                ReplyState::AwaitingFirstToken | ReplyState::Streaming => {
                    self.hide_working();
                    self.reply.content.push_str(data);
                    self.view.set_reply_text(&self.reply.content);
                    self.view.append_progress_marker();
                    self.reply.marker_visible = true;
                    self.set_state(ReplyState::Streaming)
                }
                _ => Transition::Ignored(IgnoreReason::NotStarted),
            },
            StructuredEvent::Complete { .. } => {
                self.remove_marker();
                let placeholder = if self.reply.content.is_empty() {
                    Some(EMPTY_REPLY_PLACEHOLDER)
                } else {
                    None
                };
                self.view.mark_complete(placeholder);
                self.hide_working();
                self.set_state(ReplyState::Terminal(Terminal::Complete))
            }
            StructuredEvent::Error { error, .. } => self.finish_with_error(error),
            StructuredEvent::Unknown { event_type } => {
                tracing::debug!("Unknown SSE event type '{}' ignored", event_type);
                Transition::Ignored(IgnoreReason::UnknownEvent)
            }
        }
    }

    /// Drive the reply into `Terminal(Errored)` for a transport failure.
    pub fn fail(&mut self, message: &str) -> Transition {
        if self.reply.is_terminal() {
            return Transition::Ignored(IgnoreReason::AlreadyTerminal);
        }
        self.finish_with_error(message)
    }

    pub fn reply(&self) -> &PendingReply {
        &self.reply
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_terminal(&self) -> bool {
        self.reply.is_terminal()
    }

    pub fn into_parts(self) -> (PendingReply, V) {
        (self.reply, self.view)
    }

    fn finish_with_error(&mut self, message: &str) -> Transition {
        self.remove_marker();
        self.view.mark_as_error(message);
        self.reply.error = Some(message.to_string());
        self.hide_working();
        self.set_state(ReplyState::Terminal(Terminal::Errored))
    }

    fn hide_working(&mut self) {
        if self.reply.working_visible {
            self.view.hide_working();
            self.reply.working_visible = false;
        }
    }

    fn remove_marker(&mut self) {
        if self.reply.marker_visible {
            self.view.remove_progress_marker();
            self.reply.marker_visible = false;
        }
    }

    fn set_state(&mut self, to: ReplyState) -> Transition {
        let from = self.reply.state;
        self.reply.state = to;
        if from != to {
            tracing::debug!("Reply state {} -> {}", from.as_str(), to.as_str());
        }
        Transition::Applied { from, to }
    }
}
