use std::path::Path;
use std::slice;

use serde::Deserialize;

use crate::error::{DataSource, RecordError};
use crate::user::UserRecord;

const BUNDLED_USERS: &str = include_str!("../data/users.json");

#[derive(Deserialize)]
struct UserFile {
    user: Vec<UserRecord>,
}

/// The ordered list of users that suggestions are drawn from. Loaded once, before the
/// search widget exists, and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDirectory {
    users: Box<[UserRecord]>,
}

impl UserDirectory {
    /// Parses a user list of the form `{ "user": [ { "name": ... }, ... ] }`.
    /// The order of the records is kept.
    ///
    /// # Arguments
    /// * ` json ` - The contents of the user list.
    ///
    /// # Errors
    /// Returns `DataUnavailable` if the text is not a user list.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Self::parse(json, DataSource::Text)
    }

    /// Reads the user list stored at `path`.
    ///
    /// # Errors
    /// Returns `DataUnavailable` if the file can not be read, or is not a user list.
    #[tracing::instrument(name = "Loading user list")]
    pub fn open<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Self, RecordError> {
        let origin = DataSource::File(path.as_ref().to_path_buf());
        let text = match std::fs::read_to_string(path.as_ref()) {
            Ok(text) => text,
            Err(e) => return Err(RecordError::unavailable(origin, e)),
        };
        Self::parse(&text, origin)
    }

    /// The user list compiled into the binary.
    ///
    /// # Errors
    /// Only if the bundled file was edited into something that is not a user list.
    pub fn bundled() -> Result<Self, RecordError> {
        Self::parse(BUNDLED_USERS, DataSource::Bundled)
    }

    fn parse(json: &str, origin: DataSource) -> Result<Self, RecordError> {
        let file: UserFile =
            serde_json::from_str(json).map_err(|e| RecordError::unavailable(origin.clone(), e))?;
        tracing::info!("Loaded {} users from {}", file.user.len(), origin);
        Ok(UserDirectory {
            users: file.user.into_boxed_slice(),
        })
    }

    pub fn iter(&self) -> slice::Iter<'_, UserRecord> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(UserRecord::name)
    }
}

impl From<Vec<UserRecord>> for UserDirectory {
    fn from(users: Vec<UserRecord>) -> Self {
        UserDirectory {
            users: users.into_boxed_slice(),
        }
    }
}

impl<'a> IntoIterator for &'a UserDirectory {
    type Item = &'a UserRecord;
    type IntoIter = slice::Iter<'a, UserRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
