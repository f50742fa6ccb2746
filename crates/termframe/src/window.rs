//! Sliding window over long option lists
//!
//! Select-style prompts can hold more options than the terminal has rows.
//! [`visible_window`] computes the contiguous slice to show around the
//! cursor; cut-off edges are flagged so renderers can substitute an
//! ellipsis row.

/// Visible slice of an option list, following the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First visible index.
    pub start: usize,
    /// One past the last visible index.
    pub end: usize,
    /// Options before `start` exist and are hidden.
    pub ellipsis_top: bool,
    /// Options at or after `end` exist and are hidden.
    pub ellipsis_bottom: bool,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

/// Compute the visible window of a `len`-item list around `cursor`.
///
/// `max_items` is an optional caller hint for the window size. Fewer than
/// five rows are never used unless the terminal itself cannot fit five;
/// four rows are always reserved for the surrounding prompt frame. The
/// window shifts down once the cursor comes within three rows of its
/// bottom edge and up once it comes within two rows of its top edge,
/// clamped to the ends of the list.
pub fn visible_window(
    len: usize,
    cursor: usize,
    max_items: Option<usize>,
    term_rows: usize,
) -> Window {
    let requested = max_items.unwrap_or(usize::MAX).max(5);
    let max = requested.min(term_rows.saturating_sub(4));

    if len == 0 || max == 0 {
        return Window {
            start: 0,
            end: 0,
            ellipsis_top: false,
            ellipsis_bottom: false,
        };
    }

    let mut start = 0usize;
    if cursor + 3 >= start + max {
        start = (cursor + 3 - max).min(len.saturating_sub(max));
    } else if cursor < start + 2 {
        start = cursor.saturating_sub(2);
    }

    Window {
        start,
        end: (start + max).min(len),
        ellipsis_top: max < len && start > 0,
        ellipsis_bottom: max < len && start + max < len,
    }
}
