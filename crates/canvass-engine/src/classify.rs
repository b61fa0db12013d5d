//! Classification and review — the only writers of item state.

use canvass_core::{
  item::{ItemUpdate, Label, Status},
  store::ItemStore,
};

use crate::Error;

/// How a classification submission landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyOutcome {
  /// This submission won: the item moved to pending review.
  Classified,
  /// The item had already left `Unclassified` — the expected result when two
  /// submissions race or a gateway redelivers an event, not an error.
  AlreadyClassified,
}

/// Apply a participant's label submission.
///
/// The initial read answers the common redelivery case without a write; the
/// conditional update is what actually decides a race. Another submission
/// can land between the two, so a failed compare-and-swap also reports
/// `AlreadyClassified`.
pub async fn classify<S: ItemStore>(
  store: &S,
  id: i64,
  label: Label,
  language: &str,
  classified_by: &str,
) -> Result<ClassifyOutcome, Error> {
  if label == Label::Unknown {
    return Err(Error::InvalidLabel);
  }

  let item = store
    .get(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::ItemNotFound(id))?;

  if item.status != Status::Unclassified {
    return Ok(ClassifyOutcome::AlreadyClassified);
  }

  let update = ItemUpdate {
    label,
    status: Status::PendingReview,
    language: language.to_owned(),
    classified_by: Some(classified_by.to_owned()),
  };

  let applied = store
    .transition_if_status(id, Status::Unclassified, update)
    .await
    .map_err(Error::store)?;

  if applied {
    Ok(ClassifyOutcome::Classified)
  } else {
    Ok(ClassifyOutcome::AlreadyClassified)
  }
}

/// Finalize a pending item — a moderator action outside the conversation.
///
/// Returns whether the item was finalized; `false` means it was not pending
/// review (either never classified, or already finalized). Uses the same
/// conditional update as [`classify`], gated on `PendingReview`, and leaves
/// `classified_by` as written by the winning classification.
pub async fn review<S: ItemStore>(
  store: &S,
  id: i64,
  label: Label,
  language: &str,
) -> Result<bool, Error> {
  if label == Label::Unknown {
    return Err(Error::InvalidLabel);
  }

  if store.get(id).await.map_err(Error::store)?.is_none() {
    return Err(Error::ItemNotFound(id));
  }

  let update = ItemUpdate {
    label,
    status: Status::Classified,
    language: language.to_owned(),
    classified_by: None,
  };

  store
    .transition_if_status(id, Status::PendingReview, update)
    .await
    .map_err(Error::store)
}
