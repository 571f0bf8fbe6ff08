use crate::MatrixMode;

/// Errors raised by path, transform and paint operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// An operand count, parameter arity or value was rejected.
    InvalidArgument(String),

    /// Growing a segment or data buffer failed.
    OutOfMemory { requested: usize },

    /// `pop_camera` was called on a mode with nothing pushed.
    StateUnderflow(MatrixMode),
}

impl GeometryError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GeometryError::InvalidArgument(msg.into())
    }
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            GeometryError::OutOfMemory { requested } => {
                write!(f, "Out of memory while reserving {} elements", requested)
            }
            GeometryError::StateUnderflow(mode) => {
                write!(f, "Camera stack underflow for matrix mode {:?}", mode)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Reserve room for `additional` elements, reporting allocation failure as
/// [`GeometryError::OutOfMemory`] instead of aborting.
pub(crate) fn try_reserve<T>(vec: &mut Vec<T>, additional: usize) -> GeometryResult<()> {
    vec.try_reserve(additional)
        .map_err(|_| GeometryError::OutOfMemory {
            requested: additional,
        })
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
