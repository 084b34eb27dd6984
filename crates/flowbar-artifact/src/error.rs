use std::path::PathBuf;

use flowbar_flow::FlowError;
use thiserror::Error;

/// Errors raised while registering and configuring bars.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtifactError {
  #[error("bar name must not be empty: '{0}'")]
  EmptyName(String),

  #[error(transparent)]
  Flow(#[from] FlowError),
}

/// Errors raised while packaging a bar.
///
/// Any packaging error leaves no staging directory or partial archive behind.
#[derive(Debug, Error)]
pub enum PackageError {
  /// A message flow could not be compiled. Raised before anything is written.
  #[error(transparent)]
  Flow(#[from] FlowError),

  #[error("source file not found: {}", .path.display())]
  MissingSource { path: PathBuf },

  #[error("io error at {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to walk staging directory: {0}")]
  Walk(#[from] walkdir::Error),

  #[error("failed to write archive: {0}")]
  Zip(#[from] zip::result::ZipError),
}

impl PackageError {
  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
    let path = path.into();
    move |source| Self::Io { path, source }
  }
}
