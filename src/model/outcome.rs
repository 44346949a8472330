/// Terminal outcome definitions for scrape targets
///
/// Every target ends in exactly one of these states; none is ever retried
/// once it has an outcome.
use crate::{FetchError, FetchErrorKind, ParseError};
use std::fmt;

/// Represents how a target was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome<T> {
    /// Target was fetched and parsed
    Success(T),

    /// Target failed after `attempts` network attempts
    Failure { kind: FailureKind, attempts: u32 },

    /// Target was abandoned by a shutdown signal before it resolved
    Cancelled,
}

impl<T> TargetOutcome<T> {
    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if this represents a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Returns true if the target never resolved
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Consumes the outcome, keeping only the success value
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<FetchError> for TargetOutcome<T> {
    fn from(err: FetchError) -> Self {
        Self::Failure {
            kind: FailureKind::Fetch(err.kind),
            attempts: err.attempts,
        }
    }
}

/// Category of a target failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Every network attempt failed
    Fetch(FetchErrorKind),

    /// The page was fetched but its markup was not understood
    Parse(ParseError),
}

impl FailureKind {
    /// Short name used when counting failures by kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::Parse(_) => "parse",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(kind) => write!(f, "fetch error: {}", kind),
            Self::Parse(err) => write!(f, "parse error: {}", err),
        }
    }
}

/// A failed target, named so the user can retry it manually
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFailure {
    /// Human-readable target name (region, or deputy with region)
    pub target: String,

    /// What went wrong
    pub kind: FailureKind,

    /// Network attempts spent on the target
    pub attempts: u32,
}

impl fmt::Display for TargetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} attempt(s))",
            self.target, self.kind, self.attempts
        )
    }
}
