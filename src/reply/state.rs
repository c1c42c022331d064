//! Pending reply state.

/// How a reply ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Complete,
    Errored,
}

/// Lifecycle of the single in-flight reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyState {
    /// Created, request not yet issued
    #[default]
    Idle,
    /// Request issued, no text received yet
    AwaitingFirstToken,
    /// At least one text chunk rendered
    Streaming,
    /// Finished; no further event has any effect
    Terminal(Terminal),
}

impl ReplyState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReplyState::Terminal(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyState::Idle => "idle",
            ReplyState::AwaitingFirstToken => "awaiting_first_token",
            ReplyState::Streaming => "streaming",
            ReplyState::Terminal(Terminal::Complete) => "complete",
            ReplyState::Terminal(Terminal::Errored) => "errored",
        }
    }
}

/// The reply being built for one submitted message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingReply {
    /// Accumulated reply text
    pub content: String,
    /// Lifecycle state
    pub state: ReplyState,
    /// Whether the working indicator is currently shown
    pub working_visible: bool,
    /// Whether the progress marker is currently shown
    pub marker_visible: bool,
    /// Error text once the reply reached `Terminal(Errored)`
    pub error: Option<String>,
}

impl PendingReply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}
