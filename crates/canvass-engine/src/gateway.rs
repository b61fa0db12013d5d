//! The outbound message gateway contract.

use std::future::Future;

/// Delivers one outbound text to one participant.
///
/// Delivery is best-effort: the orchestrator logs failures and moves on, and
/// a completed state transition is never rolled back because a notification
/// could not be sent.
pub trait MessageGateway: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn send<'a>(
    &'a self,
    to: &'a str,
    body: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
