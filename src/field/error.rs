use thiserror::Error;

/// Reasons the field is not ready to allocate or draw
///
/// Neither is fatal: the engine logs and skips the operation until the host
/// supplies a surface or usable dimensions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Drawing surface unavailable")]
    SurfaceUnavailable,

    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
}

/// Result type for field readiness checks
pub type FieldResult<T> = Result<T, FieldError>;
