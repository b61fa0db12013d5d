//! The `ItemStore` and `ParticipantRegistry` traits.
//!
//! The traits are implemented by storage backends (e.g.
//! `canvass-store-sqlite`). Higher layers (`canvass-engine`,
//! `canvass-server`) depend on these abstractions, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  item::{Item, ItemUpdate, Status},
  participant::Participant,
};

// ─── Items ───────────────────────────────────────────────────────────────────

/// Abstraction over the durable item table.
///
/// After creation, [`ItemStore::transition_if_status`] is the sole mutation
/// path: a compare-and-swap keyed on the item's current status. Backends must
/// make it atomic with respect to concurrent callers; it is the only
/// synchronization primitive the workflow relies on.
///
/// All methods return `Send` futures so the traits can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ItemStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create an unclassified item with an externally assigned id.
  ///
  /// Fails with the backend's duplicate-id error if `id` is taken, and with
  /// its empty-text error if `text` is empty.
  fn create<'a>(
    &'a self,
    id: i64,
    text: &'a str,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + 'a;

  /// The unclassified item with the lowest id, or `None`.
  ///
  /// Lowest-id-first keeps selection deterministic for a given store state.
  fn find_unclassified(
    &self,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// The pending-review item with the lowest id, or `None`.
  fn find_pending_review(
    &self,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// Retrieve an item by id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// Atomically apply `update` only if the stored item's current status
  /// equals `expected`. Returns whether the write happened.
  ///
  /// Two racing classifications for the same item resolve here: exactly one
  /// caller observes `true`.
  fn transition_if_status(
    &self,
    id: i64,
    expected: Status,
    update: ItemUpdate,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Every item, ordered by id.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;
}

// ─── Participants ────────────────────────────────────────────────────────────

/// Abstraction over the durable participant table.
///
/// All writes are idempotent upserts keyed on identity; there is nothing to
/// race on beyond last-writer-wins on the session flag.
pub trait ParticipantRegistry: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the participant, creating an active record on first contact.
  fn get_or_create<'a>(
    &'a self,
    identity: &'a str,
  ) -> impl Future<Output = Result<Participant, Self::Error>> + Send + 'a;

  /// Upsert the session flag; creates the record when missing.
  fn set_active<'a>(
    &'a self,
    identity: &'a str,
    active: bool,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// `false` for unknown participants.
  fn is_active<'a>(
    &'a self,
    identity: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
