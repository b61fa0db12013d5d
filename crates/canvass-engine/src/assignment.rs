//! Advisory assignment — pick the next item to show a participant.

use canvass_core::store::ItemStore;

use crate::Error;

/// The payload handed to the outbound prompt templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentPrompt {
  pub id:   i64,
  pub text: String,
}

/// The next unclassified item, as a prompt payload.
///
/// Assignment does not reserve: any active participant may see and classify
/// any still-unclassified item, so a participant going silent never strands
/// an item. The race between two answers for the same item is resolved by
/// the compare-and-swap at classification time, not here.
pub async fn next_assignment<S: ItemStore>(
  store: &S,
) -> Result<Option<AssignmentPrompt>, Error> {
  let item = store.find_unclassified().await.map_err(Error::store)?;
  Ok(item.map(|item| AssignmentPrompt { id: item.id, text: item.text }))
}
