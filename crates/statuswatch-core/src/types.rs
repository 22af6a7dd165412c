use serde::Deserialize;

// ─── StatusEntry ──────────────────────────────────────────────────────────

/// One observed unit of work, as listed by the status endpoint.
///
/// Wire names are those of the upstream API (`homework_name`, `status`);
/// any other fields the server sends are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusEntry {
    #[serde(rename = "homework_name")]
    pub id: String,
    #[serde(rename = "status")]
    pub status_code: String,
}

// ─── StatusPage ───────────────────────────────────────────────────────────

/// A validated response body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusPage {
    /// Entries in server order; the first one is treated as the newest.
    pub entries: Vec<StatusEntry>,
    /// Server-suggested `from_date` for the next poll, when supplied.
    pub next_cursor: Option<i64>,
}

// ─── PollCursor ───────────────────────────────────────────────────────────

/// Unix timestamp sent as `from_date`. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PollCursor(i64);

impl PollCursor {
    pub fn new(timestamp: i64) -> Self {
        Self(timestamp)
    }

    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp())
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Move to `timestamp` if it is later than the current position.
    /// Returns `true` when the cursor moved.
    pub fn advance(&mut self, timestamp: i64) -> bool {
        if timestamp > self.0 {
            self.0 = timestamp;
            true
        } else {
            false
        }
    }
}
