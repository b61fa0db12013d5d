//! Error types for `canvass-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An item with this externally assigned id already exists.
  #[error("item {0} already exists")]
  DuplicateItem(i64),

  #[error("item text must not be empty")]
  EmptyText,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
