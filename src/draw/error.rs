//! Draw rejection reasons.

use crate::reel::ReelError;
use thiserror::Error;

/// Errors that reject a draw request.
///
/// None of these are fatal: the caller surfaces the message, the user
/// corrects the input or moves the pointer more, and retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error("invalid {field}: {input:?} is not an integer")]
    InvalidNumber { field: &'static str, input: String },

    #[error("min ({min}) must be less than max ({max})")]
    InvalidRange { min: i64, max: i64 },

    #[error("range {min}..={max} is too wide to index")]
    RangeTooWide { min: i64, max: i64 },

    #[error("no numbers left in {min}..={max} after excluding {excluded}")]
    EmptyCandidateSet { min: i64, max: i64, excluded: i64 },

    #[error("insufficient entropy: got {got} samples, need {need}")]
    InsufficientEntropy { got: usize, need: usize },

    #[error("pointer samples produced a degenerate seed")]
    DegenerateSeed,

    #[error("a draw is already in progress")]
    InProgress,

    #[error(transparent)]
    Reel(#[from] ReelError),
}

impl DrawError {
    /// Short label used when counting rejections.
    pub fn reason(&self) -> &'static str {
        match self {
            DrawError::InvalidNumber { .. }
            | DrawError::InvalidRange { .. }
            | DrawError::RangeTooWide { .. } => "invalid_range",
            DrawError::EmptyCandidateSet { .. } => "empty_candidates",
            DrawError::InsufficientEntropy { .. } => "insufficient_entropy",
            DrawError::DegenerateSeed => "degenerate_seed",
            DrawError::InProgress => "in_progress",
            DrawError::Reel(_) => "reel",
        }
    }

    /// Returns true if more pointer movement would resolve the rejection.
    pub fn needs_more_motion(&self) -> bool {
        matches!(
            self,
            DrawError::InsufficientEntropy { .. } | DrawError::DegenerateSeed
        )
    }
}
