//! Position within an ordered sequence of questions or exercises

/// Cursor over a sequence of `len` items
///
/// The index is always a valid position or exactly `len`, which is the
/// terminal completed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    /// Create a cursor at the first item. An empty sequence starts completed.
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the cursor has moved past the last item
    pub fn is_completed(&self) -> bool {
        self.index >= self.len
    }

    /// Current item index, or None once completed
    pub fn current(&self) -> Option<usize> {
        if self.is_completed() {
            None
        } else {
            Some(self.index)
        }
    }

    /// Step forward, moving into the completed state after the last item
    pub fn advance(&mut self) {
        if self.index < self.len {
            self.index += 1;
        }
    }

    /// Step back, floored at the first item
    pub fn retreat(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Step forward without ever entering the completed state
    pub fn next_clamped(&mut self) {
        if self.index + 1 < self.len {
            self.index += 1;
        }
    }

    /// Step back, floored at the first item
    pub fn previous_clamped(&mut self) {
        self.retreat();
    }

    /// `(index + 1) / len`, clamped to 1.0 once completed
    pub fn fraction(&self) -> f64 {
        if self.len == 0 {
            return 1.0;
        }
        ((self.index + 1) as f64 / self.len as f64).min(1.0)
    }
}
