//! CSV seeding for the item table.

use std::path::Path;

use canvass_core::store::ItemStore;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// One `id,text` row of the seed file.
#[derive(Debug, Deserialize)]
struct SeedRow {
  id:   i64,
  text: String,
}

/// Populate an empty store from a CSV of `(id, text)` pairs.
///
/// A non-empty store skips the load entirely, so restarting the process never
/// re-seeds. Row-level failures (malformed rows, duplicate ids, empty text)
/// are logged and skipped; only failing to read the file or reach the store
/// is fatal. Returns the number of items created.
pub async fn seed_items<S: ItemStore>(
  store: &S,
  path: &Path,
) -> Result<usize, LoadError> {
  let existing = store
    .list_all()
    .await
    .map_err(|e| LoadError::Store(Box::new(e)))?;
  if !existing.is_empty() {
    tracing::info!(
      count = existing.len(),
      "store already populated, skipping seed"
    );
    return Ok(0);
  }

  let mut reader = csv::Reader::from_path(path)?;
  let mut created = 0usize;

  for row in reader.deserialize::<SeedRow>() {
    let row = match row {
      Ok(row) => row,
      Err(e) => {
        tracing::warn!(error = %e, "skipping malformed seed row");
        continue;
      }
    };
    match store.create(row.id, &row.text).await {
      Ok(_) => created += 1,
      Err(e) => tracing::warn!(error = %e, id = row.id, "skipping seed row"),
    }
  }

  tracing::info!(created, "seeded item store");
  Ok(created)
}
