use thiserror::Error;

/// Errors produced while building a board or reading and writing patterns.
#[derive(Debug, Error)]
pub enum Error {
  /// Width or height is zero, or settings text is not a number.
  #[error("invalid settings: {0}")]
  InvalidSettings(String),

  /// Width does not fit in a row word.
  #[error("width {width} exceeds the row capacity of {capacity} cells")]
  CapacityExceeded { width: usize, capacity: usize },

  #[error("invalid rule: {0}")]
  InvalidRule(String),

  #[error("invalid RLE: {0}")]
  InvalidRle(String),

  #[error("image export failed: {0}")]
  Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
