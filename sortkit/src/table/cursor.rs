//! Pagination cursor and loading state.

use std::ops::Range;

use crate::source::FetchError;

/// The `[start, end)` window of the last page loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    start: usize,
    step: usize,
}

impl Cursor {
    /// The first page of `step` rows. A zero step is bumped to one.
    pub fn first(step: usize) -> Self {
        Self {
            start: 0,
            step: step.max(1),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn end(&self) -> usize {
        self.start.saturating_add(self.step)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The page after this one: `start = end`, `end = start + step`.
    pub fn next(&self) -> Self {
        Self {
            start: self.end(),
            step: self.step,
        }
    }

    /// Back to the first page, same step.
    pub fn reset(&self) -> Self {
        Self::first(self.step)
    }
}

/// Loading state of a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing in flight; more pages may exist.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The source has no further pages. Terminal for scroll loading.
    Exhausted,
    /// The last request failed. A later load may retry.
    Error(FetchError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn as_error(&self) -> Option<&FetchError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// What a load attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was applied; `rows` new rows arrived.
    Loaded { rows: usize },
    /// Nothing was requested (already loading, local sort, exhausted...).
    Skipped,
    /// The response arrived after a newer request or after destroy and
    /// was dropped.
    Discarded,
}
