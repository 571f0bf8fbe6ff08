use std::path::PathBuf;

/// Why a single font record was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A key the record type requires was absent.
    MissingKey(&'static str),

    /// A key that holds an integer had some other value.
    InvalidInteger { key: &'static str, value: String },
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::MissingKey(key) => write!(f, "missing required key '{}'", key),
            ParseErrorKind::InvalidInteger { key, value } => {
                write!(f, "key '{}' expects an integer, got '{}'", key, value)
            }
        }
    }
}

/// A rejected record. Parsing continues with the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    pub record: String,
    pub kind: ParseErrorKind,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: '{}' record: {}", self.line, self.record, self.kind)
    }
}

impl std::error::Error for ParseError {}

/// Errors that abort loading a whole font.
#[derive(Debug, Clone)]
pub enum FontError {
    /// Font file not found.
    FileNotFound(PathBuf),

    /// Generic IO error.
    IoError(String),
}

impl std::fmt::Display for FontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontError::FileNotFound(path) => {
                write!(f, "Font file not found: {}", path.display())
            }
            FontError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for FontError {}

impl From<std::io::Error> for FontError {
    fn from(err: std::io::Error) -> Self {
        FontError::IoError(err.to_string())
    }
}

/// Result type for font loading.
pub type FontResult<T> = Result<T, FontError>;
