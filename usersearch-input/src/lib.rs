#![deny(unused_must_use)]
#![deny(unused_imports)]
#![deny(unused_attributes)]
#![deny(unused_mut)]

pub mod autocomplete;
pub mod user_input;

pub use autocomplete::{AutoCompleter, RingCursor};
pub use user_input::{CharChunks, LineInput};

/// A single change to a line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Inserts a character at the cursor.
    Insert(char),
    /// Inserts a string at the cursor (eg. from the clipboard).
    Paste(String),
    /// Removes the character before the cursor.
    Backspace,
    /// Removes the character under the cursor.
    Delete,
    Left,
    Right,
    Home,
    End,
}
