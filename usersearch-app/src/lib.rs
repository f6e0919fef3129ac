pub mod geometry;
pub mod pointer;
pub mod search;
pub mod settings;

pub use geometry::{InputGeometry, Point, PopupPosition, Region, ScrollOffset};
pub use pointer::{OutsideClickWatcher, PointerEvents, PointerSubscription, Regions};
pub use search::{Backspace, SearchError, UserSearch};
pub use settings::{Settings, SettingsError};
