use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    /// Rejected before any placement starts; no partial result is produced.
    #[error("invalid placement configuration: {0}")]
    Configuration(String),

    #[error("non-finite coordinate ({x}, {y})")]
    DegenerateInput { x: f64, y: f64 },
}

pub type Result<T> = std::result::Result<T, PlacementError>;
