/// Page state definitions for tracking scrape outcomes
///
/// Every scheduled page ends in exactly one of these states.
use crate::PageError;
use std::fmt;

/// Represents the final state of a scheduled page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageState {
    // ===== Terminal Success States =====
    /// Page was fetched and its quotes were published
    Processed,

    // ===== Terminal Error States =====
    /// Every GET attempt failed at the transport layer
    Unreachable,

    /// Server answered with a status other than 200
    BadStatus,

    /// Body could not be turned into a document
    ParseFailed,

    /// Worker task died before reporting an outcome
    Panicked,
}

impl PageState {
    /// Maps a per-page error to the state it leaves the page in
    pub fn from_error(error: &PageError) -> Self {
        match error {
            PageError::Transport { .. } => Self::Unreachable,
            PageError::BadStatus { .. } => Self::BadStatus,
            PageError::ParseFailure { .. } => Self::ParseFailed,
        }
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Short machine-friendly label, used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Unreachable => "unreachable",
            Self::BadStatus => "bad_status",
            Self::ParseFailed => "parse_failed",
            Self::Panicked => "panicked",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Processed,
            Self::Unreachable,
            Self::BadStatus,
            Self::ParseFailed,
            Self::Panicked,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
