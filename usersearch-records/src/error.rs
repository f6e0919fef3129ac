use std::fmt;
use std::path::PathBuf;

/// Where a user list was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    File(PathBuf),
    /// Text handed over by the caller.
    Text,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Bundled => f.write_str("bundled user list"),
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Text => f.write_str("provided text"),
        }
    }
}

#[derive(Debug)]
pub enum DataCause {
    Io(std::io::Error),
    Malformed(serde_json::Error),
}

impl From<std::io::Error> for DataCause {
    fn from(e: std::io::Error) -> Self {
        DataCause::Io(e)
    }
}

impl From<serde_json::Error> for DataCause {
    fn from(e: serde_json::Error) -> Self {
        DataCause::Malformed(e)
    }
}

impl fmt::Display for DataCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataCause::Io(e) => write!(f, "could not be read ({})", e),
            DataCause::Malformed(e) => write!(f, "is malformed ({})", e),
        }
    }
}

#[derive(Debug)]
/// Enumerates the errors that can occur while loading user records.
pub enum RecordError {
    /// The user list is missing, unreadable, or does not have the expected shape.
    /// This is fatal: the search widget can not be created without it.
    DataUnavailable { origin: DataSource, cause: DataCause },
}

impl RecordError {
    pub(crate) fn unavailable(origin: DataSource, cause: impl Into<DataCause>) -> Self {
        RecordError::DataUnavailable {
            origin,
            cause: cause.into(),
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::DataUnavailable { origin, cause } => {
                write!(f, "user data from {} {}", origin, cause)
            }
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::DataUnavailable {
                cause: DataCause::Io(e),
                ..
            } => Some(e),
            RecordError::DataUnavailable {
                cause: DataCause::Malformed(e),
                ..
            } => Some(e),
        }
    }
}
