// ABOUTME: Error taxonomy for the scheduling core
//
// Every variant is recoverable from the UI: fetch failures get a retry
// affordance, validation and conflicts keep the form editable, and submit
// failures retain the entered state. Nothing here is fatal to the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Network or parse failure while loading the booked-set for a date.
    #[error("failed to load booked slots: {0}")]
    SlotsFetch(String),

    /// A required field is missing or malformed at submission time.
    #[error("{0}")]
    Validation(String),

    /// The chosen slot appeared in the booked-set between display and
    /// submit. Best-effort client-side check only.
    #[error("that time was just booked by someone else, please pick another slot")]
    SlotConflict,

    /// The backend rejected or was unreachable during the final submit.
    #[error("booking submission failed: {0}")]
    Submission(String),
}

impl ScheduleError {
    /// Whether re-running the same operation without changing input can
    /// succeed (fetch and submit failures are transient, the others need a
    /// corrected selection).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::SlotsFetch(_) | Self::Submission(_))
    }
}
