pub mod binder;
pub mod clock;
pub mod dates;

pub use binder::SubmissionBinder;
pub use clock::{Clock, FixedClock, SystemClock};

use crate::error::ValidationErrors;
use crate::value::Value;

/// What a processed submission led to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// A new row was written; `id` is the identity the store assigned.
    Inserted { id: Value },
    Updated,
    /// Validation failed and nothing was persisted.
    Rejected(ValidationErrors),
}

impl SubmissionOutcome {
    pub fn attempted_persistence(&self) -> bool {
        !matches!(self, SubmissionOutcome::Rejected(_))
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            SubmissionOutcome::Rejected(errors) => Some(errors),
            _ => None,
        }
    }
}
