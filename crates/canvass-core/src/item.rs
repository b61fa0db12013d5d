//! Item — a unit of text awaiting a label.
//!
//! An item's identity (`id`, `text`) is immutable. Its classification fields
//! move forward exactly once per status step; every write after creation goes
//! through [`crate::store::ItemStore::transition_if_status`].

use serde::{Deserialize, Serialize};

/// Sentinel stored in [`Item::language`] until a classification sets it.
pub const LANGUAGE_UNKNOWN: &str = "unknown";

// ─── Label ───────────────────────────────────────────────────────────────────

/// The sentiment label attached to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
  Positive,
  Negative,
  Neutral,
  /// No label yet. Present exactly while the item is
  /// [`Status::Unclassified`].
  #[default]
  Unknown,
}

impl Label {
  /// The discriminant string stored in the `label` column.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Positive => "positive",
      Self::Negative => "negative",
      Self::Neutral => "neutral",
      Self::Unknown => "unknown",
    }
  }

  /// Parse a participant-supplied label token, case-insensitively.
  ///
  /// `Unknown` is never accepted from the wire; it only ever appears as the
  /// initial state of a fresh item.
  pub fn from_reply(token: &str) -> Option<Self> {
    match token.to_ascii_lowercase().as_str() {
      "positive" => Some(Self::Positive),
      "negative" => Some(Self::Negative),
      "neutral" => Some(Self::Neutral),
      _ => None,
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle state of an item. Transitions are monotonic:
/// `Unclassified → PendingReview → Classified`, never backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
  #[default]
  Unclassified,
  PendingReview,
  Classified,
}

impl Status {
  /// The discriminant string stored in the `status` column.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Unclassified => "unclassified",
      Self::PendingReview => "pending_review",
      Self::Classified => "classified",
    }
  }
}

// ─── Item ────────────────────────────────────────────────────────────────────

/// A unit of text awaiting a label.
///
/// `label == Unknown` holds exactly while `status == Unclassified`; both are
/// written together by the same conditional update, so the pair can never be
/// observed out of step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
  /// Externally assigned, unique, immutable.
  pub id:            i64,
  pub text:          String,
  pub label:         Label,
  pub status:        Status,
  /// [`LANGUAGE_UNKNOWN`] until set by the winning classification.
  pub language:      String,
  /// Identity of the participant whose classification won. Audit metadata
  /// only — a weak back-reference, not an ownership edge.
  pub classified_by: Option<String>,
}

impl Item {
  /// A freshly created, unclassified item.
  pub fn new(id: i64, text: String) -> Self {
    Self {
      id,
      text,
      label: Label::Unknown,
      status: Status::Unclassified,
      language: LANGUAGE_UNKNOWN.to_owned(),
      classified_by: None,
    }
  }
}

// ─── ItemUpdate ──────────────────────────────────────────────────────────────

/// The mutation applied by a successful status transition.
///
/// `classified_by: None` leaves the stored value untouched, so the review
/// transition keeps the audit trail written by the winning classification.
#[derive(Debug, Clone)]
pub struct ItemUpdate {
  pub label:         Label,
  pub status:        Status,
  pub language:      String,
  pub classified_by: Option<String>,
}
