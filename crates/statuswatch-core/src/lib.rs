//! `statuswatch-core` — the poll → validate → detect-change → notify → delay
//! loop behind the `statuswatch` binary.
//!
//! # Architecture
//!
//! ```text
//! Scheduler        ← owns PollCursor + StatusTracker, sleeps after every cycle
//!     │
//!     ▼
//! StatusFetcher    ← GET <endpoint>?from_date=<cursor>, Authorization: OAuth …
//!     │
//!     ▼
//! validate()       ← raw JSON → StatusPage { entries, next_cursor }
//!     │
//!     ▼
//! StatusTracker    ← newest entry → verdict text → changed / unchanged
//!     │
//!     ▼
//! Notifier         ← best-effort "send text to recipient"
//! ```
//!
//! Every stage returns a [`WatchError`] instead of panicking; the scheduler is
//! the only place errors are caught, reported and discarded.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod notifier;
pub mod scheduler;
pub mod tracker;
pub mod types;
pub mod validator;
pub mod verdict;

pub use config::{RawConfig, WatchConfig};
pub use error::{NotifyError, Result, WatchError};
pub use fetcher::StatusFetcher;
pub use notifier::{notify_best_effort, Notifier};
pub use scheduler::{CycleOutcome, Scheduler};
pub use tracker::{Comparison, StatusTracker};
pub use types::{PollCursor, StatusEntry, StatusPage};
pub use validator::validate;
pub use verdict::{status_message, Verdict};
