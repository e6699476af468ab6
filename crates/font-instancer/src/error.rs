/// Error types for axis limitation parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AxisError {
    #[error("axis tag must be 4 characters: {0}")]
    InvalidTag(String),

    #[error("expected drop, an integer or low:high, got {0:?}")]
    InvalidLimitation(String),
}
