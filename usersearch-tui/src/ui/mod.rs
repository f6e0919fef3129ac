pub(crate) use terminal_ui::{AppInterface, TuiError};

mod layouts;
pub(crate) mod terminal_ui;
mod utils;
pub(crate) mod widgets;
