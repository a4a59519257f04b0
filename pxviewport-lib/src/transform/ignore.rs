//! Inline markers that switch conversion off for a single declaration.
//!
//! ```css
//! /* px-to-viewport-ignore-next */
//! width: 10px;
//! height: 10px; /* px-to-viewport-ignore */
//! ```

use crate::tree::css_tree::Node;

pub const IGNORE_NEXT: &str = "px-to-viewport-ignore-next";
pub const IGNORE_PREV: &str = "px-to-viewport-ignore";

/// What to do with the declaration at a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreDecision {
    Convert,
    /// Leave the declaration alone and drop the marker in front of it.
    SkipRemovePrevious,
    /// Leave the declaration alone and drop the marker after it.
    SkipRemoveNext,
    /// An ignore marker follows on its own line; it is left in place and the
    /// declaration is converted anyway.
    ConvertMisplacedMarker,
}

pub fn misplaced_marker_message() -> String {
    format!(
        "Unexpected comment /* {} */ must be after declaration at same line.",
        IGNORE_PREV
    )
}

/// Look at the siblings around the declaration at `position`.
pub fn inspect(siblings: &[Node], position: usize) -> IgnoreDecision {
    let previous = position
        .checked_sub(1)
        .and_then(|i| siblings.get(i))
        .and_then(Node::as_comment);
    if previous.map_or(false, |comment| comment.text == IGNORE_NEXT) {
        return IgnoreDecision::SkipRemovePrevious;
    }

    match siblings.get(position + 1).and_then(Node::as_comment) {
        Some(comment) if comment.text == IGNORE_PREV => {
            if comment.starts_own_line() {
                IgnoreDecision::ConvertMisplacedMarker
            } else {
                IgnoreDecision::SkipRemoveNext
            }
        }
        _ => IgnoreDecision::Convert,
    }
}
