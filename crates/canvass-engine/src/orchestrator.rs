//! The per-message decision machine.
//!
//! One inbound message in, one or two outbound replies out. The orchestrator
//! holds no state between messages: every decision is recomputed from the
//! participant registry and the item store, so concurrent and redelivered
//! webhook events can never observe stale session state.

use std::sync::Arc;

use canvass_core::{
  item::Label,
  store::{ItemStore, ParticipantRegistry},
};

use crate::{
  Error,
  assignment::next_assignment,
  classify::{self, ClassifyOutcome},
  command::{self, Command},
  gateway::MessageGateway,
  reply,
};

/// Maps inbound message events to registry, assignment, and classification
/// calls, and hands the resulting reply text to the gateway.
///
/// Both collaborators are explicit constructor dependencies; nothing here
/// reaches for process-wide state.
pub struct Orchestrator<S, G> {
  store:   Arc<S>,
  gateway: Arc<G>,
}

impl<S, G> Orchestrator<S, G>
where
  S: ItemStore + ParticipantRegistry,
  G: MessageGateway,
{
  pub fn new(store: Arc<S>, gateway: Arc<G>) -> Self {
    Self { store, gateway }
  }

  /// Handle one inbound `{Body, From}` event.
  ///
  /// `from` arrives channel-prefixed (`"whatsapp:+1555..."`); everything
  /// after the first `:` is the participant identity.
  pub async fn handle_message(&self, from: &str, body: &str) -> Result<(), Error> {
    let identity = strip_channel_prefix(from);

    match command::parse(body) {
      Some(Command::Start) => self.start_session(identity).await,
      Some(Command::Disconnect) => self.stop_session(identity).await,
      parsed => {
        let active =
          self.store.is_active(identity).await.map_err(Error::store)?;
        if !active {
          // Without a session, only `start` means anything.
          self.send(identity, reply::START_HINT).await;
          return Ok(());
        }
        match parsed {
          Some(Command::Classify { id, label, language }) => {
            self
              .submit_classification(identity, id, label, &language)
              .await
          }
          // Start and Disconnect were handled above; only malformed input
          // reaches this arm.
          _ => {
            self.send(identity, &reply::incorrect_format()).await;
            Ok(())
          }
        }
      }
    }
  }

  async fn start_session(&self, identity: &str) -> Result<(), Error> {
    if let Err(e) = self.activate(identity).await {
      tracing::error!(error = %e, identity, "failed to activate session");
      self.send(identity, reply::START_FAILED).await;
      return Ok(());
    }

    match next_assignment(self.store.as_ref()).await {
      Ok(Some(prompt)) => {
        self.send(identity, &reply::first_prompt(&prompt)).await;
      }
      Ok(None) => self.send(identity, reply::NO_DATA).await,
      Err(e) => {
        tracing::error!(error = %e, identity, "failed to fetch next assignment");
        self.send(identity, reply::NO_DATA).await;
      }
    }
    Ok(())
  }

  /// Materialise the participant (active on first contact) and raise the
  /// session flag if an earlier `disconnect` lowered it.
  async fn activate(&self, identity: &str) -> Result<(), Error> {
    let participant =
      self.store.get_or_create(identity).await.map_err(Error::store)?;
    if !participant.is_active {
      self
        .store
        .set_active(identity, true)
        .await
        .map_err(Error::store)?;
    }
    Ok(())
  }

  async fn stop_session(&self, identity: &str) -> Result<(), Error> {
    match self.store.set_active(identity, false).await {
      Ok(()) => self.send(identity, reply::STOPPED).await,
      Err(e) => {
        tracing::error!(error = %e, identity, "failed to deactivate session");
        self.send(identity, reply::STOP_FAILED).await;
      }
    }
    Ok(())
  }

  async fn submit_classification(
    &self,
    identity: &str,
    id: i64,
    label: Label,
    language: &str,
  ) -> Result<(), Error> {
    match classify::classify(self.store.as_ref(), id, label, language, identity)
      .await
    {
      Ok(ClassifyOutcome::Classified) => {
        self.send(identity, reply::STORED).await;
        match next_assignment(self.store.as_ref()).await {
          Ok(Some(prompt)) => {
            self.send(identity, &reply::followup_prompt(&prompt)).await;
          }
          Ok(None) => self.send(identity, reply::NO_DATA).await,
          Err(e) => {
            tracing::error!(error = %e, identity, "failed to fetch next assignment");
            self.send(identity, reply::NO_DATA).await;
          }
        }
      }
      Ok(ClassifyOutcome::AlreadyClassified) => {
        self.send(identity, &reply::already_classified()).await;
      }
      Err(e) => {
        tracing::warn!(error = %e, identity, item = id, "classification rejected");
        self
          .send(identity, &reply::classification_failed(&e.to_string()))
          .await;
      }
    }
    Ok(())
  }

  /// Best-effort outbound send: failures are logged, never propagated, and
  /// never undo a state transition that already happened.
  async fn send(&self, to: &str, body: &str) {
    if let Err(e) = self.gateway.send(to, body).await {
      tracing::warn!(error = %e, to, "failed to deliver outbound message");
    }
  }
}

/// `"whatsapp:+1555..." → "+1555..."`; an unprefixed address passes through.
fn strip_channel_prefix(from: &str) -> &str {
  match from.split_once(':') {
    Some((_, identity)) => identity,
    None => from,
  }
}
