//! Verification domain data types

/// A code was dispatched to `phone_number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationStarted {
    pub phone_number: String,
    /// Provider status, normally `pending`.
    pub status: String,
}

/// Result of checking a code. Anything other than `approved` is a denial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Approved { status: String },
    Denied { status: String },
}

impl VerificationOutcome {
    pub fn from_status(status: String) -> Self {
        if status == "approved" {
            VerificationOutcome::Approved { status }
        } else {
            VerificationOutcome::Denied { status }
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, VerificationOutcome::Approved { .. })
    }

    pub fn status(&self) -> &str {
        match self {
            VerificationOutcome::Approved { status } | VerificationOutcome::Denied { status } => {
                status
            }
        }
    }
}
