use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A single entry of the user list. Only the display name is read; any other fields
/// present in the data file are ignored.
pub struct UserRecord {
    name: String,
}

impl UserRecord {
    pub fn new<S: Into<String>>(name: S) -> Self {
        UserRecord { name: name.into() }
    }

    /// The name shown in suggestions and committed as a tag.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
