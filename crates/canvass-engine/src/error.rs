//! Error type shared by the engine services.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// `Label::Unknown` submitted as a classification or review label.
  #[error("label must be positive, negative, or neutral")]
  InvalidLabel,

  #[error("item {0} not found")]
  ItemNotFound(i64),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error without naming its concrete type.
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}
