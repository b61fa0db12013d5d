//! Column codecs and raw row types.
//!
//! Enum columns are stored as their discriminant strings; timestamps as
//! RFC 3339 UTC text.

use canvass_core::{
  item::{Item, Label, Status},
  participant::Participant,
};
use chrono::{DateTime, Utc};

use crate::{Error, Result};

// ─── Codecs ──────────────────────────────────────────────────────────────────

pub fn decode_label(s: &str) -> Result<Label> {
  match s {
    "positive" => Ok(Label::Positive),
    "negative" => Ok(Label::Negative),
    "neutral" => Ok(Label::Neutral),
    "unknown" => Ok(Label::Unknown),
    other => Err(Error::Decode(other.to_owned())),
  }
}

pub fn decode_status(s: &str) -> Result<Status> {
  match s {
    "unclassified" => Ok(Status::Unclassified),
    "pending_review" => Ok(Status::PendingReview),
    "classified" => Ok(Status::Classified),
    other => Err(Error::Decode(other.to_owned())),
  }
}

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|_| Error::Decode(s.to_owned()))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// An `items` row as it comes off the wire, before enum decoding.
pub struct RawItem {
  pub id:            i64,
  pub text:          String,
  pub label:         String,
  pub status:        String,
  pub language:      String,
  pub classified_by: Option<String>,
}

impl RawItem {
  pub fn into_item(self) -> Result<Item> {
    Ok(Item {
      id:            self.id,
      text:          self.text,
      label:         decode_label(&self.label)?,
      status:        decode_status(&self.status)?,
      language:      self.language,
      classified_by: self.classified_by,
    })
  }
}

/// A `participants` row before timestamp decoding.
pub struct RawParticipant {
  pub identity:   String,
  pub is_active:  bool,
  pub created_at: String,
}

impl RawParticipant {
  pub fn into_participant(self) -> Result<Participant> {
    Ok(Participant {
      identity:   self.identity,
      is_active:  self.is_active,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
