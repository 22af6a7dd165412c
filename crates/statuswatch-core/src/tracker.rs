use crate::error::Result;
use crate::types::StatusEntry;
use crate::verdict::status_message;

/// Result of comparing a poll against the last notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Unchanged,
    Changed(String),
}

/// Remembers the last notified message text. In-memory only.
#[derive(Debug, Default)]
pub struct StatusTracker {
    last_notified: String,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_notified(&self) -> &str {
        &self.last_notified
    }

    /// Decide whether the newest entry warrants a notification.
    ///
    /// The first entry is taken as the newest one. An empty list is reported
    /// as [`Comparison::Unchanged`]; an unrecognized status code is an error.
    pub fn compare(&self, entries: &[StatusEntry]) -> Result<Comparison> {
        let Some(current) = entries.first() else {
            tracing::debug!("no status entries in this window");
            return Ok(Comparison::Unchanged);
        };

        let message = status_message(current)?;
        if message == self.last_notified {
            Ok(Comparison::Unchanged)
        } else {
            Ok(Comparison::Changed(message))
        }
    }

    pub fn record(&mut self, message: String) {
        self.last_notified = message;
    }
}
