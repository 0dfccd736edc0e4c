use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
