//! Webhook server for Canvass.
//!
//! Exposes the messaging-gateway webhook plus a small JSON surface for
//! moderators, backed by any store implementing the core traits. Transport
//! authentication is the messaging provider's concern; the moderator routes
//! are expected to sit behind a reverse proxy.

pub mod error;
pub mod gateway;
pub mod loader;
pub mod routes;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use canvass_core::store::{ItemStore, ParticipantRegistry};
use canvass_engine::{Orchestrator, gateway::MessageGateway};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` plus
/// `CANVASS_*` environment overrides.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Seed the store from this CSV of `id,text` rows when it is empty.
  pub seed_csv:   Option<PathBuf>,
  pub twilio:     TwilioConfig,
}

#[derive(Deserialize, Clone)]
pub struct TwilioConfig {
  pub account_sid:  String,
  pub auth_token:   String,
  /// Channel-prefixed sender, e.g. `"whatsapp:+14155238886"`.
  pub from_address: String,
  /// Override for tests; defaults to the public Twilio API.
  #[serde(default = "default_api_base")]
  pub api_base:     String,
}

fn default_api_base() -> String {
  "https://api.twilio.com".to_owned()
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, G> {
  pub store:        Arc<S>,
  pub orchestrator: Arc<Orchestrator<S, G>>,
}

// Derived Clone would demand S: Clone and G: Clone; the Arcs are enough.
impl<S, G> Clone for AppState<S, G> {
  fn clone(&self) -> Self {
    Self {
      store:        self.store.clone(),
      orchestrator: self.orchestrator.clone(),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the webhook server.
pub fn router<S, G>(state: AppState<S, G>) -> Router
where
  S: ItemStore + ParticipantRegistry + 'static,
  G: MessageGateway + 'static,
{
  Router::new()
    .route("/", get(routes::health))
    .route("/webhook", post(routes::webhook::<S, G>))
    .route("/items", get(routes::list_items::<S, G>))
    .route(
      "/review",
      get(routes::next_review::<S, G>).post(routes::submit_review::<S, G>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
