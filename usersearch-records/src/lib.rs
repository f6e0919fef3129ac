#![deny(unused_must_use)]
#![deny(unused_imports)]

pub mod directory;
pub mod error;
pub mod user;

pub use directory::UserDirectory;
pub use error::{DataCause, DataSource, RecordError};
pub use user::UserRecord;
