//! Character budget for verbatim diff content.

/// Default ceiling on verbatim diff characters per prompt.
///
/// Roughly 12k tokens at ~4 characters per token.
pub const DEFAULT_MAX_DIFF_CHARS: usize = 50_000;

/// Running total of diff characters admitted into one prompt.
///
/// Create one per build. Admission is all-or-nothing and strictly in call
/// order, so the same sequence of candidates always yields the same decisions.
#[derive(Debug, Clone)]
pub struct DiffBudget {
    ceiling: usize,
    used: usize,
}

impl DiffBudget {
    pub fn new(ceiling: usize) -> Self {
        Self { ceiling, used: 0 }
    }

    /// Admit `len` characters if they fit in what is left.
    ///
    /// Returns `false` and leaves the budget untouched when they don't.
    pub fn try_admit(&mut self, len: usize) -> bool {
        match self.used.checked_add(len) {
            Some(total) if total <= self.ceiling => {
                self.used = total;
                true
            }
            _ => false,
        }
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn remaining(&self) -> usize {
        self.ceiling.saturating_sub(self.used)
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }
}

impl Default for DiffBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIFF_CHARS)
    }
}
