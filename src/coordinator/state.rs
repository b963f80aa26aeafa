//! Submission State Machine
//!
//! Pure per-attempt state holder consumed by the rendering layer. Holds
//! `Idle | Submitting | Failed(message)` and the single-flight guard;
//! no business logic beyond that.

// == Submission Status ==
/// Current status of the mutation attempt on a screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// No attempt in flight; the UI is interactive
    #[default]
    Idle,
    /// An optimistic mutation is applied and the remote call is unresolved;
    /// the UI is locked
    Submitting,
    /// The remote call rejected the attempt; the reverted cache state is
    /// shown together with this message, and retry is allowed
    Failed(String),
}

// == Submission State ==
/// Holds the status of the current attempt and enforces single-flight.
#[derive(Debug, Default)]
pub struct SubmissionState {
    status: SubmissionStatus,
}

impl SubmissionState {
    /// Creates a new state machine in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// User-facing failure message, present only in `Failed`.
    pub fn message(&self) -> Option<&str> {
        match &self.status {
            SubmissionStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// True while a remote call is unresolved.
    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    // == Transitions ==
    /// Attempts to start a new submission.
    ///
    /// Succeeds from `Idle` (fresh attempt) and from `Failed` (retry),
    /// clearing any prior message. Returns `false` while `Submitting`:
    /// the single-flight guard, so a second invocation is rejected
    /// synchronously instead of queued.
    pub fn try_begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.status = SubmissionStatus::Submitting;
        true
    }

    /// Marks the attempt confirmed; returns to `Idle`.
    pub fn complete(&mut self) {
        self.status = SubmissionStatus::Idle;
    }

    /// Marks the attempt failed with a user-facing message.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = SubmissionStatus::Failed(message.into());
    }
}
