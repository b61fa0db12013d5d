//! Participant — a human operator on the messaging channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered participant. Created on first contact and never deleted by
/// the workflow; removal is an administrative action outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
  /// Bare channel address, unique. The transport prefix (`"whatsapp:"`) is
  /// stripped before an identity reaches the registry.
  pub identity:   String,
  /// Session flag, toggled by the start/disconnect commands.
  pub is_active:  bool,
  /// Store-assigned at first contact.
  pub created_at: DateTime<Utc>,
}
