//! HTTP handlers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Liveness text |
//! | `POST` | `/webhook` | Urlencoded `{Body, From}` from the messaging gateway |
//! | `GET`  | `/items` | Every item, for audit and export |
//! | `GET`  | `/review` | Next item pending review; 404 when none |
//! | `POST` | `/review` | Body: [`ReviewBody`]; moderator finalization |

use axum::{Form, Json, extract::State, http::StatusCode};
use canvass_core::{
  item::{Item, Label},
  store::{ItemStore, ParticipantRegistry},
};
use canvass_engine::{classify, gateway::MessageGateway};
use serde::Deserialize;

use crate::{AppState, Error};

pub async fn health() -> &'static str {
  "canvass is running"
}

// ─── Webhook ─────────────────────────────────────────────────────────────────

/// Inbound event posted by the messaging gateway.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
  #[serde(rename = "Body")]
  pub body: String,
  #[serde(rename = "From")]
  pub from: String,
}

/// `POST /webhook`
///
/// Always acknowledges with 200: gateways retry on anything else, and a
/// redelivered classification is already absorbed by the already-classified
/// path, so a retry could only manufacture duplicate replies.
pub async fn webhook<S, G>(
  State(state): State<AppState<S, G>>,
  Form(inbound): Form<InboundMessage>,
) -> StatusCode
where
  S: ItemStore + ParticipantRegistry + 'static,
  G: MessageGateway + 'static,
{
  if let Err(e) = state
    .orchestrator
    .handle_message(&inbound.from, &inbound.body)
    .await
  {
    tracing::error!(error = %e, from = %inbound.from, "failed to handle inbound message");
  }
  StatusCode::OK
}

// ─── Moderator routes ────────────────────────────────────────────────────────

/// `GET /items`
pub async fn list_items<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Vec<Item>>, Error>
where
  S: ItemStore + ParticipantRegistry + 'static,
  G: MessageGateway + 'static,
{
  let items = state.store.list_all().await.map_err(Error::store)?;
  Ok(Json(items))
}

/// `GET /review` — the next item awaiting moderator review.
pub async fn next_review<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Item>, Error>
where
  S: ItemStore + ParticipantRegistry + 'static,
  G: MessageGateway + 'static,
{
  let item = state
    .store
    .find_pending_review()
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound("no items pending review".to_owned()))?;
  Ok(Json(item))
}

/// JSON body accepted by `POST /review`.
#[derive(Debug, Deserialize)]
pub struct ReviewBody {
  pub id:       i64,
  pub label:    Label,
  pub language: String,
}

/// `POST /review` — finalize a pending item.
pub async fn submit_review<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<ReviewBody>,
) -> Result<StatusCode, Error>
where
  S: ItemStore + ParticipantRegistry + 'static,
  G: MessageGateway + 'static,
{
  let finalized =
    classify::review(state.store.as_ref(), body.id, body.label, &body.language)
      .await?;

  if finalized {
    Ok(StatusCode::OK)
  } else {
    Err(Error::Conflict(format!("item {} is not pending review", body.id)))
  }
}
