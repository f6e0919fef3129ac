use std::fmt;
use std::sync::Arc;

use usersearch_input::{AutoCompleter, Edit, LineInput, RingCursor};
use usersearch_records::{UserDirectory, UserRecord};

use crate::geometry::{InputGeometry, PopupPosition};
use crate::settings::PopupSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// An index did not point into the list it was meant for.
    InvalidIndex { index: usize, len: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidIndex { index, len } => {
                write!(f, "index {} is out of range for {} items", index, len)
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// What a Backspace press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backspace {
    /// The input has text: the key should edit it as usual.
    PassThrough,
    /// The last tag was marked for removal.
    Highlighted(usize),
    /// The last tag was removed.
    Removed(String),
    /// Nothing to edit and nothing to remove.
    Ignored,
}

/// State of the user search widget: the typed text, the suggestions for it, and the
/// users picked so far. Every event the widget reacts to is a method here.
pub struct UserSearch {
    directory: Arc<UserDirectory>,
    popup_settings: PopupSettings,
    input: LineInput,
    suggestions: Vec<UserRecord>,
    selections: Vec<String>,
    popup_position: PopupPosition,
    popup_visible: bool,
    highlighted: Option<usize>,
    active_suggestion: RingCursor,
}

impl UserSearch {
    pub fn new(directory: Arc<UserDirectory>, popup_settings: PopupSettings) -> Self {
        UserSearch {
            directory,
            popup_settings,
            input: LineInput::new(),
            suggestions: vec![],
            selections: vec![],
            popup_position: PopupPosition::default(),
            popup_visible: false,
            highlighted: None,
            active_suggestion: RingCursor::default(),
        }
    }

    /// Replaces the typed text, recomputes the suggestions and opens the popup below
    /// the input. A highlighted tag stays highlighted.
    ///
    /// # Arguments
    /// * ` new_text ` - The full text of the input.
    /// * ` origin ` - Where the input is currently drawn.
    pub fn text_changed(&mut self, new_text: &str, origin: InputGeometry) {
        self.input.set(new_text);
        self.refresh_suggestions(origin);
    }

    /// Applies a line edit to the input. If the text changed, this behaves like
    /// `text_changed`, except that the cursor stays where the edit left it.
    /// Returns true if the text changed.
    pub fn apply_edit(&mut self, edit: &Edit, origin: InputGeometry) -> bool {
        let changed = self.input.apply(edit);
        if changed {
            self.refresh_suggestions(origin);
        }
        changed
    }

    fn refresh_suggestions(&mut self, origin: InputGeometry) {
        let completer = AutoCompleter::new(self.input.to_string());
        self.suggestions = completer.filter(self.directory.iter().cloned(), |user| user.name());
        self.popup_position = origin.popup_position();
        self.popup_visible = !(self.popup_settings.hide_when_empty && self.suggestions.is_empty());
        self.active_suggestion.reset(self.suggestions.len());
        tracing::debug!(
            "Input changed to {:?}: {} suggestions at {:?}",
            self.input.to_string(),
            self.suggestions.len(),
            self.popup_position
        );
    }

    /// Commits the suggestion at `index` as a new tag, and resets the input. The same
    /// user may be picked more than once.
    ///
    /// # Errors
    /// Returns `InvalidIndex` if `index` is not a current suggestion.
    pub fn activate_suggestion(&mut self, index: usize) -> Result<String, SearchError> {
        let name = match self.suggestions.get(index) {
            Some(user) => user.name().to_owned(),
            None => {
                return Err(SearchError::InvalidIndex {
                    index,
                    len: self.suggestions.len(),
                })
            }
        };
        self.selections.push(name.clone());
        self.input.clear();
        self.suggestions.clear();
        self.popup_visible = false;
        self.highlighted = None;
        self.active_suggestion.reset(0);
        tracing::info!("Selected {:?} ({} selected)", name, self.selections.len());
        Ok(name)
    }

    /// Commits the suggestion under the keyboard cursor. Does nothing if the popup is
    /// closed or no suggestion is under the cursor.
    pub fn activate_cursor_suggestion(&mut self) -> Result<Option<String>, SearchError> {
        match (self.popup_visible, self.active_suggestion.get()) {
            (true, Some(index)) => self.activate_suggestion(index).map(Some),
            _ => Ok(None),
        }
    }

    /// Moves the keyboard cursor to the next suggestion, wrapping around.
    pub fn next_suggestion(&mut self) -> Option<usize> {
        if !self.popup_visible {
            return None;
        }
        self.active_suggestion.next_item()
    }

    /// Moves the keyboard cursor to the previous suggestion, wrapping around.
    pub fn previous_suggestion(&mut self) -> Option<usize> {
        if !self.popup_visible {
            return None;
        }
        self.active_suggestion.prev_item()
    }

    /// Removes the tag at `index`, keeping the order of the others. A pending
    /// highlight is left as is.
    ///
    /// # Errors
    /// Returns `InvalidIndex` if there is no tag at `index`; nothing is removed.
    pub fn remove_tag(&mut self, index: usize) -> Result<String, SearchError> {
        if index >= self.selections.len() {
            tracing::warn!(
                "Refusing to remove tag {} of {}",
                index,
                self.selections.len()
            );
            return Err(SearchError::InvalidIndex {
                index,
                len: self.selections.len(),
            });
        }
        let name = self.selections.remove(index);
        tracing::info!("Removed tag {:?} at {}", name, index);
        Ok(name)
    }

    /// Handles a Backspace press. With text in the input, the press is left to edit
    /// the text. Otherwise the first press highlights the last tag and the second
    /// removes the last tag.
    pub fn backspace(&mut self) -> Backspace {
        if !self.input.is_empty() {
            return Backspace::PassThrough;
        }
        if self.selections.is_empty() {
            return Backspace::Ignored;
        }
        match self.highlighted {
            None => {
                let index = self.selections.len() - 1;
                self.highlighted = Some(index);
                tracing::debug!("Highlighted tag {} for removal", index);
                Backspace::Highlighted(index)
            }
            Some(_) => {
                self.highlighted = None;
                match self.selections.pop() {
                    Some(name) => {
                        tracing::info!("Removed last tag {:?}", name);
                        Backspace::Removed(name)
                    }
                    None => Backspace::Ignored,
                }
            }
        }
    }

    /// Closes the popup, keeping the text and the suggestions.
    pub fn dismiss(&mut self) {
        if self.popup_visible {
            tracing::debug!("Suggestion popup dismissed");
        }
        self.popup_visible = false;
        self.active_suggestion.reset(self.suggestions.len());
    }

    pub fn input(&self) -> &LineInput {
        &self.input
    }

    pub fn input_text(&self) -> String {
        self.input.to_string()
    }

    pub fn suggestions(&self) -> &[UserRecord] {
        &self.suggestions
    }

    pub fn selections(&self) -> &[String] {
        &self.selections
    }

    pub fn popup_position(&self) -> PopupPosition {
        self.popup_position
    }

    pub fn popup_visible(&self) -> bool {
        self.popup_visible
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn active_suggestion(&self) -> Option<usize> {
        self.active_suggestion.get()
    }

    pub fn popup_settings(&self) -> &PopupSettings {
        &self.popup_settings
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{Region, ScrollOffset};

    fn directory(names: &[&str]) -> Arc<UserDirectory> {
        Arc::new(UserDirectory::from(
            names.iter().map(|&n| UserRecord::new(n)).collect::<Vec<_>>(),
        ))
    }

    fn search() -> UserSearch {
        UserSearch::new(
            directory(&["Alice", "Bob", "Alicia"]),
            PopupSettings::default(),
        )
    }

    fn origin() -> InputGeometry {
        InputGeometry::new(Region::new(4, 2, 30, 1), ScrollOffset::default())
    }

    fn names(search: &UserSearch) -> Vec<&str> {
        search.suggestions().iter().map(UserRecord::name).collect()
    }

    fn with_selections(selected: &[&str]) -> UserSearch {
        let mut search = UserSearch::new(directory(selected), PopupSettings::default());
        for name in selected {
            search.text_changed(name, origin());
            let index = names(&search).iter().position(|n| n == name).unwrap();
            search.activate_suggestion(index).unwrap();
        }
        search
    }

    #[test]
    fn test_typing_filters_and_opens_popup() {
        let mut search = search();
        search.text_changed("ali", origin());
        assert_eq!(names(&search), vec!["Alice", "Alicia"]);
        assert!(search.popup_visible());
        assert_eq!(search.input_text(), "ali");
    }

    #[test]
    fn test_filtering_ignores_case_and_keeps_order() {
        let mut search = search();
        search.text_changed("LI", origin());
        assert_eq!(names(&search), vec!["Alice", "Alicia"]);
        search.text_changed("", origin());
        assert_eq!(names(&search), vec!["Alice", "Bob", "Alicia"]);
    }

    #[test]
    fn test_popup_anchors_below_input_with_scroll() {
        let mut search = search();
        let origin = InputGeometry::new(Region::new(4, 2, 30, 1), ScrollOffset { x: 0, y: 5 });
        search.text_changed("b", origin);
        assert_eq!(search.popup_position(), PopupPosition { top: 8, left: 4 });
    }

    #[test]
    fn test_empty_results_still_show_popup() {
        let mut search = search();
        search.text_changed("zzz", origin());
        assert!(search.suggestions().is_empty());
        assert!(search.popup_visible());
    }

    #[test]
    fn test_empty_results_can_hide_popup() {
        let mut search = UserSearch::new(
            directory(&["Alice"]),
            PopupSettings {
                hide_when_empty: true,
                ..PopupSettings::default()
            },
        );
        search.text_changed("zzz", origin());
        assert!(!search.popup_visible());
        search.text_changed("a", origin());
        assert!(search.popup_visible());
    }

    #[test]
    fn test_activating_suggestion_commits_tag() {
        let mut search = search();
        search.text_changed("ali", origin());
        assert_eq!(search.activate_suggestion(0).unwrap(), "Alice");
        assert_eq!(search.selections(), &["Alice".to_string()]);
        assert_eq!(search.input_text(), "");
        assert!(search.suggestions().is_empty());
        assert!(!search.popup_visible());
        assert_eq!(search.highlighted(), None);
    }

    #[test]
    fn test_activating_appends_duplicates() {
        let mut search = search();
        search.text_changed("bob", origin());
        search.activate_suggestion(0).unwrap();
        search.text_changed("bob", origin());
        search.activate_suggestion(0).unwrap();
        assert_eq!(search.selections(), &["Bob".to_string(), "Bob".to_string()]);
    }

    #[test]
    fn test_activating_missing_suggestion_fails() {
        let mut search = search();
        search.text_changed("bob", origin());
        assert_eq!(
            search.activate_suggestion(1),
            Err(SearchError::InvalidIndex { index: 1, len: 1 })
        );
        assert!(search.selections().is_empty());
        assert!(search.popup_visible());
    }

    #[test]
    fn test_activating_clears_highlight() {
        let mut search = with_selections(&["Alice"]);
        assert_eq!(search.backspace(), Backspace::Highlighted(0));
        search.text_changed("a", origin());
        search.activate_suggestion(0).unwrap();
        assert_eq!(search.highlighted(), None);
    }

    #[test]
    fn test_remove_tag_keeps_order() {
        let mut search = with_selections(&["Alice", "Bob", "Alicia"]);
        assert_eq!(search.remove_tag(1).unwrap(), "Bob");
        assert_eq!(
            search.selections(),
            &["Alice".to_string(), "Alicia".to_string()]
        );
    }

    #[test]
    fn test_remove_tag_only_element() {
        let mut search = with_selections(&["Alice"]);
        search.remove_tag(0).unwrap();
        assert!(search.selections().is_empty());
    }

    #[test]
    fn test_remove_tag_out_of_range() {
        let mut search = with_selections(&["Alice"]);
        assert_eq!(
            search.remove_tag(1),
            Err(SearchError::InvalidIndex { index: 1, len: 1 })
        );
        assert_eq!(search.selections(), &["Alice".to_string()]);
    }

    #[test]
    fn test_two_backspaces_remove_last_tag() {
        let mut search = with_selections(&["Alice", "Bob"]);
        assert_eq!(search.backspace(), Backspace::Highlighted(1));
        assert_eq!(search.highlighted(), Some(1));
        assert_eq!(
            search.selections(),
            &["Alice".to_string(), "Bob".to_string()]
        );
        assert_eq!(search.backspace(), Backspace::Removed("Bob".to_string()));
        assert_eq!(search.selections(), &["Alice".to_string()]);
        assert_eq!(search.highlighted(), None);
    }

    #[test]
    fn test_backspace_with_text_passes_through() {
        let mut search = with_selections(&["Alice"]);
        search.text_changed("b", origin());
        assert_eq!(search.backspace(), Backspace::PassThrough);
        assert_eq!(search.highlighted(), None);
        assert_eq!(search.selections().len(), 1);
    }

    #[test]
    fn test_backspace_with_nothing_is_ignored() {
        let mut search = search();
        assert_eq!(search.backspace(), Backspace::Ignored);
        assert_eq!(search.highlighted(), None);
    }

    #[test]
    fn test_second_backspace_removes_last_even_if_stale() {
        let mut search = with_selections(&["Alice", "Bob", "Alicia"]);
        assert_eq!(search.backspace(), Backspace::Highlighted(2));
        search.remove_tag(0).unwrap();
        assert_eq!(search.highlighted(), Some(2));
        assert_eq!(
            search.backspace(),
            Backspace::Removed("Alicia".to_string())
        );
        assert_eq!(search.selections(), &["Bob".to_string()]);
    }

    #[test]
    fn test_typing_keeps_highlight() {
        let mut search = with_selections(&["Alice"]);
        search.backspace();
        search.text_changed("x", origin());
        assert_eq!(search.highlighted(), Some(0));
    }

    #[test]
    fn test_dismiss_keeps_text_and_suggestions() {
        let mut search = with_selections(&["Alice"]);
        search.text_changed("ali", origin());
        search.dismiss();
        assert!(!search.popup_visible());
        assert_eq!(search.input_text(), "ali");
        assert_eq!(names(&search), vec!["Alice"]);
        assert_eq!(search.selections(), &["Alice".to_string()]);
    }

    #[test]
    fn test_edits_refresh_suggestions() {
        let mut search = search();
        assert!(search.apply_edit(&Edit::Insert('b'), origin()));
        assert_eq!(names(&search), vec!["Bob"]);
        assert!(!search.apply_edit(&Edit::Left, origin()));
        assert!(search.apply_edit(&Edit::Insert('a'), origin()));
        assert_eq!(search.input_text(), "ab");
        assert_eq!(search.input().cursor(), 1);
        assert!(search.suggestions().is_empty());
        search.apply_edit(&Edit::Delete, origin());
        assert_eq!(names(&search), vec!["Alice", "Alicia"]);
    }

    #[test]
    fn test_deleting_last_char_reopens_popup() {
        let mut search = search();
        search.text_changed("b", origin());
        search.dismiss();
        assert_eq!(search.backspace(), Backspace::PassThrough);
        assert!(search.apply_edit(&Edit::Backspace, origin()));
        assert!(search.popup_visible());
        assert_eq!(names(&search).len(), 3);
    }

    #[test]
    fn test_keyboard_cursor() {
        let mut search = search();
        assert_eq!(search.next_suggestion(), None);
        search.text_changed("ali", origin());
        assert_eq!(search.activate_cursor_suggestion(), Ok(None));
        assert_eq!(search.next_suggestion(), Some(0));
        assert_eq!(search.next_suggestion(), Some(1));
        assert_eq!(search.next_suggestion(), Some(0));
        assert_eq!(search.previous_suggestion(), Some(1));
        assert_eq!(
            search.activate_cursor_suggestion(),
            Ok(Some("Alicia".to_string()))
        );
        assert_eq!(search.active_suggestion(), None);
    }

    #[test]
    fn test_keyboard_cursor_resets_on_typing() {
        let mut search = search();
        search.text_changed("a", origin());
        search.next_suggestion();
        search.text_changed("al", origin());
        assert_eq!(search.active_suggestion(), None);
    }
}
