use crate::error::{Result, WatchError};
use crate::types::StatusEntry;

/// Review verdict reported by the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected];

    /// Status code as it appears on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    /// Human-readable text used in notifications.
    pub fn text(self) -> &'static str {
        match self {
            Verdict::Approved => "Approved, reviewer satisfied.",
            Verdict::Reviewing => "Taken for review by a reviewer.",
            Verdict::Rejected => "Reviewed: the reviewer has remarks.",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.code() == code)
            .ok_or_else(|| WatchError::UnknownStatus(code.to_string()))
    }
}

/// Notification text for `entry`, or [`WatchError::UnknownStatus`].
pub fn status_message(entry: &StatusEntry) -> Result<String> {
    let verdict = Verdict::from_code(&entry.status_code)?;
    Ok(format!(
        "Status of \"{}\" changed. {}",
        entry.id,
        verdict.text()
    ))
}
