use std::future::Future;

use crate::error::NotifyError;

/// Delivers a text message to a recipient.
///
/// Implementations make exactly one delivery attempt per call and report
/// failure through [`NotifyError`]; deciding what to do about it is left to
/// the caller.
pub trait Notifier {
    fn send(
        &self,
        recipient: &str,
        text: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Send `text` and log (rather than return) any failure.
///
/// Returns whether the message was delivered.
pub async fn notify_best_effort<N: Notifier>(notifier: &N, recipient: &str, text: &str) -> bool {
    match notifier.send(recipient, text).await {
        Ok(()) => {
            tracing::debug!(recipient, "notification sent");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to send notification");
            false
        }
    }
}
