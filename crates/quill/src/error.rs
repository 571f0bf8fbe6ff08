use quill_geometry::{GeometryError, MatrixMode};
use quill_text::FontError;

/// Which handle table a stale or unknown handle was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Path,
    Paint,
    Image,
    Font,
}

impl std::fmt::Display for HandleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HandleKind::Path => "path",
            HandleKind::Paint => "paint",
            HandleKind::Image => "image",
            HandleKind::Font => "font",
        };
        f.write_str(name)
    }
}

/// Errors returned by [`Context`](crate::Context) operations.
///
/// A failing operation leaves the context unchanged.
#[derive(Debug, Clone)]
pub enum VgError {
    /// The handle was never issued or its entity was destroyed.
    InvalidHandle(HandleKind),

    /// Operand count, parameter arity or some other argument was rejected.
    InvalidArgument(String),

    /// Camera pop without a matching push.
    StateUnderflow(MatrixMode),

    /// Buffer growth failed.
    OutOfMemory { requested: usize },

    /// Reading a font file failed.
    Font(FontError),
}

impl VgError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        VgError::InvalidArgument(msg.into())
    }
}

impl std::fmt::Display for VgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VgError::InvalidHandle(kind) => write!(f, "Invalid {} handle", kind),
            VgError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            VgError::StateUnderflow(mode) => {
                write!(f, "Matrix stack underflow for {:?}", mode)
            }
            VgError::OutOfMemory { requested } => {
                write!(f, "Out of memory growing buffer by {} elements", requested)
            }
            VgError::Font(err) => write!(f, "Font error: {}", err),
        }
    }
}

impl std::error::Error for VgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VgError::Font(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GeometryError> for VgError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::InvalidArgument(msg) => VgError::InvalidArgument(msg),
            GeometryError::OutOfMemory { requested } => VgError::OutOfMemory { requested },
            GeometryError::StateUnderflow(mode) => VgError::StateUnderflow(mode),
        }
    }
}

impl From<FontError> for VgError {
    fn from(err: FontError) -> Self {
        VgError::Font(err)
    }
}

/// Result type for context operations.
pub type VgResult<T> = Result<T, VgError>;
