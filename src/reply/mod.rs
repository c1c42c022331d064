//! The in-progress reply: its state and the state machine that renders it.

mod renderer;
mod state;

pub use renderer::{IgnoreReason, ReplyRenderer, Transition};
pub use state::{PendingReply, ReplyState, Terminal};
