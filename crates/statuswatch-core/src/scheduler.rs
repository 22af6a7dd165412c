use std::time::Duration;

use crate::config::WatchConfig;
use crate::error::{Result, WatchError};
use crate::fetcher::StatusFetcher;
use crate::notifier::{notify_best_effort, Notifier};
use crate::tracker::{Comparison, StatusTracker};
use crate::types::{PollCursor, StatusPage};
use crate::validator::validate;

// ─── CycleOutcome ─────────────────────────────────────────────────────────

/// What a single poll cycle ended with.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Nothing new (including an empty entry list).
    Unchanged,
    /// A new status was found and a notification attempted.
    Notified { message: String, delivered: bool },
    /// A stage failed; a failure report was attempted.
    Failed { error: WatchError, reported: bool },
}

impl CycleOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, CycleOutcome::Failed { .. })
    }
}

// ─── Scheduler ────────────────────────────────────────────────────────────

/// Drives the fetch → validate → compare → notify → sleep loop.
///
/// Owns the poll cursor and the tracker state; nothing else mutates them.
pub struct Scheduler<N> {
    fetcher: StatusFetcher,
    notifier: N,
    recipient: String,
    period: Duration,
    tracker: StatusTracker,
    cursor: PollCursor,
}

impl<N: Notifier> Scheduler<N> {
    /// Build a scheduler whose cursor starts at the current time.
    pub fn new(config: &WatchConfig, notifier: N) -> Result<Self> {
        Ok(Self {
            fetcher: StatusFetcher::new(config)?,
            notifier,
            recipient: config.chat_id.clone(),
            period: config.period,
            tracker: StatusTracker::new(),
            cursor: PollCursor::now(),
        })
    }

    pub fn with_cursor(mut self, cursor: PollCursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub fn tracker(&self) -> &StatusTracker {
        &self.tracker
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Poll until the process is terminated.
    pub async fn run(mut self) {
        tracing::info!(
            endpoint = %self.fetcher.endpoint(),
            period_secs = self.period.as_secs(),
            cursor = self.cursor.value(),
            "status watch started"
        );
        loop {
            self.step().await;
        }
    }

    /// One full cycle followed by the fixed delay.
    ///
    /// The delay runs after every outcome, success or failure.
    pub async fn step(&mut self) -> CycleOutcome {
        let outcome = self.run_cycle().await;
        tracing::debug!(secs = self.period.as_secs(), "sleeping until next poll");
        tokio::time::sleep(self.period).await;
        outcome
    }

    /// One cycle without the trailing delay. Never returns an error: stage
    /// failures are logged, reported through the notifier and folded into
    /// [`CycleOutcome::Failed`].
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok((_, Comparison::Unchanged)) => {
                tracing::debug!(cursor = self.cursor.value(), "status unchanged");
                CycleOutcome::Unchanged
            }
            Ok((page, Comparison::Changed(message))) => {
                tracing::info!(message = %message, "status changed");
                let delivered = notify_best_effort(&self.notifier, &self.recipient, &message).await;
                self.tracker.record(message.clone());
                if let Some(next) = page.next_cursor {
                    if self.cursor.advance(next) {
                        tracing::debug!(cursor = next, "cursor advanced");
                    }
                }
                CycleOutcome::Notified { message, delivered }
            }
            Err(error) => {
                tracing::error!(kind = error.kind(), error = %error, "poll cycle failed");
                let report = format!("Program failure: {error}");
                let reported = notify_best_effort(&self.notifier, &self.recipient, &report).await;
                CycleOutcome::Failed { error, reported }
            }
        }
    }

    async fn poll(&self) -> Result<(StatusPage, Comparison)> {
        let body = self.fetcher.fetch(self.cursor).await?;
        let page = validate(&body)?;
        let comparison = self.tracker.compare(&page.entries)?;
        Ok((page, comparison))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawConfig;
    use crate::notifier::testing::RecordingNotifier;
    use mockito::{Matcher, Mock, ServerGuard};
    use serde_json::{json, Value};

    const APPROVED: &str = "Status of \"proj1\" changed. Approved, reviewer satisfied.";

    fn config(endpoint: String) -> WatchConfig {
        RawConfig {
            endpoint,
            api_token: Some("api-token".into()),
            bot_token: Some("bot-token".into()),
            chat_id: Some("42".into()),
            period_secs: 1,
            timeout_secs: 5,
        }
        .validate()
        .unwrap()
    }

    async fn respond(server: &mut ServerGuard, body: Value) -> Mock {
        server
            .mock("GET", "/statuses/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    fn scheduler(server: &ServerGuard, notifier: RecordingNotifier) -> Scheduler<RecordingNotifier> {
        scheduler_at(server, notifier, 0)
    }

    fn scheduler_at(
        server: &ServerGuard,
        notifier: RecordingNotifier,
        cursor: i64,
    ) -> Scheduler<RecordingNotifier> {
        Scheduler::new(&config(format!("{}/statuses/", server.url())), notifier)
            .unwrap()
            .with_cursor(PollCursor::new(cursor))
    }

    fn page(status: &str) -> Value {
        json!({
            "homeworks": [{"homework_name": "proj1", "status": status}],
            "current_date": 1000
        })
    }

    #[tokio::test]
    async fn identical_polls_notify_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/statuses/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page("approved").to_string())
            .expect(2)
            .create_async()
            .await;
        let mut sched = scheduler(&server, RecordingNotifier::default());

        let first = sched.run_cycle().await;
        let second = sched.run_cycle().await;

        assert!(matches!(first, CycleOutcome::Notified { delivered: true, .. }));
        assert!(matches!(second, CycleOutcome::Unchanged));
        assert_eq!(sched.notifier().texts(), vec![APPROVED.to_string()]);
        assert_eq!(sched.notifier().attempts()[0].0, "42");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn status_change_sends_second_notification() {
        let mut server = mockito::Server::new_async().await;
        let reviewing = respond(&mut server, page("reviewing")).await;
        let mut sched = scheduler(&server, RecordingNotifier::default());
        sched.run_cycle().await;
        reviewing.remove_async().await;

        let _rejected = respond(&mut server, page("rejected")).await;
        sched.run_cycle().await;

        let texts = sched.notifier().texts();
        assert_eq!(texts.len(), 2);
        assert!(texts[0].ends_with("Taken for review by a reviewer."));
        assert!(texts[1].ends_with("Reviewed: the reviewer has remarks."));
        assert_eq!(sched.tracker().last_notified(), texts[1]);
    }

    #[tokio::test]
    async fn change_advances_cursor_to_server_value() {
        let mut server = mockito::Server::new_async().await;
        let _mock = respond(&mut server, page("approved")).await;
        let mut sched = scheduler(&server, RecordingNotifier::default());

        sched.run_cycle().await;
        assert_eq!(sched.cursor().value(), 1000);
    }

    #[tokio::test]
    async fn change_without_server_cursor_keeps_cursor() {
        let mut server = mockito::Server::new_async().await;
        let _mock = respond(
            &mut server,
            json!({"homeworks": [{"homework_name": "proj1", "status": "approved"}]}),
        )
        .await;
        let mut sched = scheduler_at(&server, RecordingNotifier::default(), 500);

        let outcome = sched.run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Notified { .. }));
        assert_eq!(sched.tracker().last_notified(), APPROVED);
        assert_eq!(sched.cursor().value(), 500);
    }

    #[tokio::test]
    async fn older_server_cursor_does_not_move_cursor_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = respond(&mut server, page("approved")).await;
        let mut sched = scheduler_at(&server, RecordingNotifier::default(), 5000);

        let outcome = sched.run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Notified { .. }));
        assert_eq!(sched.cursor().value(), 5000);
    }

    #[tokio::test]
    async fn next_poll_uses_advanced_cursor() {
        let mut server = mockito::Server::new_async().await;
        let first = respond(&mut server, page("approved")).await;
        let mut sched = scheduler(&server, RecordingNotifier::default());
        sched.run_cycle().await;
        first.remove_async().await;

        let second = server
            .mock("GET", "/statuses/")
            .match_query(Matcher::UrlEncoded("from_date".into(), "1000".into()))
            .with_status(200)
            .with_body(page("approved").to_string())
            .create_async()
            .await;
        let outcome = sched.run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Unchanged));
        second.assert_async().await;
    }

    #[tokio::test]
    async fn empty_list_neither_notifies_nor_touches_state() {
        let mut server = mockito::Server::new_async().await;
        let _mock = respond(&mut server, json!({"homeworks": [], "current_date": 1000})).await;
        let mut sched = scheduler(&server, RecordingNotifier::default());

        let outcome = sched.run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Unchanged));
        assert!(sched.notifier().attempts().is_empty());
        assert_eq!(sched.tracker().last_notified(), "");
        assert_eq!(sched.cursor().value(), 0);
    }

    #[tokio::test]
    async fn unknown_status_reports_failure_and_continues() {
        let mut server = mockito::Server::new_async().await;
        let archived = respond(&mut server, page("archived")).await;
        let mut sched = scheduler(&server, RecordingNotifier::default());

        let outcome = sched.run_cycle().await;
        let CycleOutcome::Failed { error, reported } = outcome else {
            panic!("expected failure")
        };
        assert!(matches!(error, WatchError::UnknownStatus(_)));
        assert!(reported);
        assert!(sched.notifier().texts()[0].starts_with("Program failure:"));
        assert_eq!(sched.tracker().last_notified(), "");

        archived.remove_async().await;
        let _mock = respond(&mut server, page("approved")).await;
        let next = sched.run_cycle().await;
        assert!(matches!(next, CycleOutcome::Notified { .. }));
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let notifier = RecordingNotifier::default();
        let mut sched = Scheduler::new(&config("http://127.0.0.1:1/statuses/".into()), notifier)
            .unwrap()
            .with_cursor(PollCursor::new(0));

        let outcome = sched.run_cycle().await;

        assert!(matches!(
            outcome,
            CycleOutcome::Failed { error: WatchError::Transport { .. }, reported: true }
        ));
        assert_eq!(sched.notifier().attempts().len(), 1);
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        let mut sched = scheduler(&server, RecordingNotifier::default());

        let outcome = sched.run_cycle().await;
        assert!(matches!(
            outcome,
            CycleOutcome::Failed { error: WatchError::Server { status: 500, .. }, .. }
        ));
    }

    #[tokio::test]
    async fn failed_delivery_still_records_state_and_cursor() {
        let mut server = mockito::Server::new_async().await;
        let _mock = respond(&mut server, page("approved")).await;
        let mut sched = scheduler(&server, RecordingNotifier::failing());

        let outcome = sched.run_cycle().await;
        let second = sched.run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Notified { delivered: false, .. }));
        assert!(matches!(second, CycleOutcome::Unchanged));
        assert_eq!(sched.tracker().last_notified(), APPROVED);
        assert_eq!(sched.cursor().value(), 1000);
        assert_eq!(sched.notifier().attempts().len(), 1);
    }

    #[tokio::test]
    async fn step_waits_full_period_after_failure() {
        let notifier = RecordingNotifier::failing();
        let mut sched = Scheduler::new(&config("http://127.0.0.1:1/statuses/".into()), notifier)
            .unwrap()
            .with_cursor(PollCursor::new(0));

        let started = std::time::Instant::now();
        let outcome = sched.step().await;

        assert!(outcome.is_failure());
        assert!(started.elapsed() >= sched.period());
    }

    #[tokio::test]
    async fn step_waits_full_period_after_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = respond(&mut server, page("approved")).await;
        let mut sched = scheduler(&server, RecordingNotifier::default());

        let started = std::time::Instant::now();
        let outcome = sched.step().await;

        assert!(matches!(outcome, CycleOutcome::Notified { .. }));
        assert!(started.elapsed() >= sched.period());
    }
}
