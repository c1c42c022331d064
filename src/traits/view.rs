//! Reply view trait abstraction.
//!
//! The render state machine drives presentation only through this trait.
//! It never decides how a working indicator or progress marker looks.

/// Placeholder shown when a reply completes without any text.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "(no response)";

/// The single in-progress reply as seen by the presentation layer.
pub trait ReplyView: Send {
    /// Show the transient "working" status.
    fn show_working(&mut self);

    /// Hide the "working" status.
    fn hide_working(&mut self);

    /// Replace the visible reply text with the accumulated content so far.
    fn set_reply_text(&mut self, text: &str);

    /// Show the progress marker after the reply text.
    fn append_progress_marker(&mut self);

    /// Remove the progress marker.
    fn remove_progress_marker(&mut self);

    /// Switch the reply to the error presentation carrying `text`.
    fn mark_as_error(&mut self, text: &str);

    /// Finalize the reply. `placeholder_if_empty` is set when no text was
    /// ever produced and should be shown instead.
    fn mark_complete(&mut self, placeholder_if_empty: Option<&str>);
}

impl<V: ReplyView + ?Sized> ReplyView for &mut V {
    fn show_working(&mut self) {
        (**self).show_working()
    }

    fn hide_working(&mut self) {
        (**self).hide_working()
    }

    fn set_reply_text(&mut self, text: &str) {
        (**self).set_reply_text(text)
    }

    fn append_progress_marker(&mut self) {
        (**self).append_progress_marker()
    }

    fn remove_progress_marker(&mut self) {
        (**self).remove_progress_marker()
    }

    fn mark_as_error(&mut self, text: &str) {
        (**self).mark_as_error(text)
    }

    fn mark_complete(&mut self, placeholder_if_empty: Option<&str>) {
        (**self).mark_complete(placeholder_if_empty)
    }
}
