use std::{error::Error, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FillError {
  #[error("Internal error: {0}")]
  Internal(String),
  #[error("Parse error: {0}")]
  Parse(String),
  #[error("Search timed out after {}s", .0.as_secs_f32())]
  Timeout(Duration),
}

pub type FillResult<T = ()> = Result<T, Box<dyn Error>>;
