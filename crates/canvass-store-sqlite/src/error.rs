//! Error type for `canvass-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] canvass_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A stored enum or timestamp column held a value nothing decodes from.
  #[error("corrupt column value: {0:?}")]
  Decode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
