//! Contact-form submit UX and the footer input focus marker.

pub const LOADING_CLASS: &str = "loading";
pub const SENDING_LABEL: &str = "Sending...";
pub const FOCUS_CLASS: &str = "focus";

/// On blur the focus marker stays only while the field holds text.
pub fn keep_focus_class(value: &str) -> bool {
    !value.is_empty()
}
