use std::fmt;

/// Custom error types for workout decoding and export
#[derive(Debug)]
pub enum TrackError {
    /// I/O errors
    Io(std::io::Error),
    /// A token in an encoded stream field is not a 64-bit integer
    InvalidNumber { field: &'static str, token: String },
    /// A sample group is missing the sub-value a stream reads from it
    MissingValue {
        field: &'static str,
        segment: String,
        index: usize,
    },
    /// Summary or detail record is malformed
    InvalidRecord(String),
    /// Export format error
    Export(String),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::Io(err) => write!(f, "I/O error: {}", err),
            TrackError::InvalidNumber { field, token } => {
                write!(f, "Invalid number in '{}': {:?}", field, token)
            }
            TrackError::MissingValue {
                field,
                segment,
                index,
            } => write!(
                f,
                "Missing value #{} in '{}' sample {:?}",
                index, field, segment
            ),
            TrackError::InvalidRecord(msg) => write!(f, "Invalid record: {}", msg),
            TrackError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for TrackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrackError {
    fn from(err: std::io::Error) -> Self {
        TrackError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, TrackError>;
