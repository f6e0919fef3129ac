use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton};
use crossterm::event::{MouseEvent, MouseEventKind};
use tui::backend::Backend;
use tui::layout::Rect;
use tui::text::{Span, Spans};
use tui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use tui::Frame;
use unicode_width::UnicodeWidthStr;

use usersearch_app::settings::InterfaceStyle;
use usersearch_app::{
    Backspace, InputGeometry, OutsideClickWatcher, PointerEvents, PointerSubscription, Regions,
    ScrollOffset, UserSearch,
};
use usersearch_input::Edit;

use crate::ui::layouts::{fits, popup_layout, to_region, SearchLayout};
use crate::ui::utils::{
    char_chunks_to_styled_text, copy_from_clipboard, cut_word_to_fit, ApplicationTask, TuiStyle,
};
use crate::ui::widgets::Widget;
use crate::ui::TuiError;

const PLACEHOLDER: &str = "search user here..";

/// Draws the picked users as tags, the search input, and the suggestion popup, and
/// turns key presses and clicks into `UserSearch` transitions.
pub(crate) struct SearchWidget {
    search: Rc<RefCell<UserSearch>>,
    regions: Rc<RefCell<Regions>>,
    layout: SearchLayout,
    style: InterfaceStyle,
    _outside_clicks: PointerSubscription,
}

impl SearchWidget {
    /// Creates the widget and starts watching `events` for presses outside of it.
    /// The watch ends when the widget is dropped.
    pub(crate) fn mount(events: &PointerEvents, search: UserSearch, style: InterfaceStyle) -> Self {
        let search = Rc::new(RefCell::new(search));
        let regions = Rc::new(RefCell::new(Regions::default()));
        let outside_clicks = OutsideClickWatcher::mount(events, search.clone(), regions.clone());
        SearchWidget {
            search,
            regions,
            layout: SearchLayout::default(),
            style,
            _outside_clicks: outside_clicks,
        }
    }

    fn input_geometry(&self) -> InputGeometry {
        InputGeometry::new(to_region(self.layout.input), ScrollOffset::default())
    }

    fn edit(&mut self, edit: Edit) {
        let origin = self.input_geometry();
        self.search.borrow_mut().apply_edit(&edit, origin);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<ApplicationTask, TuiError> {
        if key.kind != KeyEventKind::Press {
            return Ok(ApplicationTask::DoNothing);
        }
        match key.code {
            KeyCode::Char('v') if key.modifiers == KeyModifiers::CONTROL => {
                if let Some(text) = copy_from_clipboard() {
                    // Only the first line fits in the input.
                    let line = text.lines().next().unwrap_or_default().to_string();
                    self.edit(Edit::Paste(line));
                }
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL) => {
                self.edit(Edit::Insert(c))
            }
            KeyCode::Backspace => {
                let outcome = self.search.borrow_mut().backspace();
                if outcome == Backspace::PassThrough {
                    self.edit(Edit::Backspace);
                }
            }
            KeyCode::Delete => self.edit(Edit::Delete),
            KeyCode::Left => self.edit(Edit::Left),
            KeyCode::Right => self.edit(Edit::Right),
            KeyCode::Home => self.edit(Edit::Home),
            KeyCode::End => self.edit(Edit::End),
            // Only suggestions that are on screen can be picked from the keyboard.
            KeyCode::Down | KeyCode::Tab | KeyCode::Up | KeyCode::BackTab | KeyCode::Enter
                if self.layout.popup.is_none() =>
            {
                return Ok(ApplicationTask::DoNothing);
            }
            KeyCode::Down | KeyCode::Tab => {
                self.search.borrow_mut().next_suggestion();
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.search.borrow_mut().previous_suggestion();
            }
            KeyCode::Enter => {
                self.search.borrow_mut().activate_cursor_suggestion()?;
            }
            KeyCode::Esc => self.search.borrow_mut().dismiss(),
            _ => return Ok(ApplicationTask::DoNothing),
        }
        Ok(ApplicationTask::UpdateUI)
    }

    fn handle_press(&mut self, point: (u16, u16)) -> Result<ApplicationTask, TuiError> {
        let mut search = self.search.borrow_mut();
        if search.popup_visible() {
            if let Some(index) = self.layout.popup.as_ref().and_then(|p| p.row_at(&point)) {
                search.activate_suggestion(index)?;
                return Ok(ApplicationTask::UpdateUI);
            }
        }
        if let Some(index) = self.layout.cancel_at(&point) {
            search.remove_tag(index)?;
            return Ok(ApplicationTask::UpdateUI);
        }
        Ok(ApplicationTask::DoNothing)
    }

    fn render_tags<B: Backend>(&self, f: &mut Frame<B>, search: &UserSearch, chunk: Rect) {
        for (i, (chip, name)) in self.layout.chips.iter().zip(search.selections()).enumerate() {
            if !fits(chip.label, chunk) || !fits(chip.cancel, chunk) {
                continue;
            }
            let label_style = if search.highlighted() == Some(i) {
                self.style.highlight_style()
            } else {
                self.style.tag_style()
            };
            let label = cut_word_to_fit(name, usize::from(chip.label.width.saturating_sub(2)));
            f.render_widget(
                Paragraph::new(Span::styled(format!(" {} ", label), label_style)),
                chip.label,
            );
            f.render_widget(
                Paragraph::new(Span::styled(" X ", self.style.cancel_style())),
                chip.cancel,
            );
        }
    }

    fn render_input<B: Backend>(&self, f: &mut Frame<B>, search: &UserSearch, chunk: Rect) {
        let area = self.layout.input;
        if !fits(area, chunk) {
            return;
        }
        let input = search.input();
        if input.is_empty() {
            let text = Spans::from(vec![
                Span::styled(" ", self.style.cursor_style()),
                Span::styled(PLACEHOLDER, self.style.placeholder_style()),
            ]);
            f.render_widget(Paragraph::new(text).style(self.style.input_style()), area);
            return;
        }

        let chunks = input.char_chunks();
        let cursor_column = chunks.before.iter().collect::<String>().width() as u16;
        let offset = cursor_column.saturating_sub(area.width.saturating_sub(1));
        let text =
            char_chunks_to_styled_text(chunks, self.style.input_style(), self.style.cursor_style());
        let paragraph = Paragraph::new(text)
            .style(self.style.input_style())
            .scroll((0, offset));
        f.render_widget(paragraph, area);
    }

    fn render_popup<B: Backend>(&self, f: &mut Frame<B>, search: &UserSearch) {
        let popup = match (&self.layout.popup, search.popup_visible()) {
            (Some(popup), true) => popup,
            _ => return,
        };
        let width = usize::from(popup.area.width.saturating_sub(2));
        let items: Vec<ListItem> = search
            .suggestions()
            .iter()
            .enumerate()
            .skip(popup.first_row)
            .take(popup.rows.len())
            .map(|(index, user)| {
                let item = ListItem::new(cut_word_to_fit(user.name(), width));
                if search.active_suggestion() == Some(index) {
                    item.style(self.style.suggestion_cursor_style())
                } else {
                    item
                }
            })
            .collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .style(self.style.popup_style());

        f.render_widget(Clear, popup.area);
        f.render_widget(List::new(items).block(block), popup.area);
    }
}

impl<B: Backend> Widget<B> for SearchWidget {
    fn prepare_render(&mut self, chunk: Rect) {
        let search = self.search.borrow();
        let widths: Vec<u16> = search
            .selections()
            .iter()
            .map(|name| (name.width() as u16).saturating_add(2))
            .collect();
        let mut layout = SearchLayout::new(chunk, &widths);
        if search.popup_visible() {
            let widest = search
                .suggestions()
                .iter()
                .map(|user| user.name().width() as u16)
                .max()
                .unwrap_or(0);
            layout.popup = popup_layout(
                chunk,
                search.popup_position(),
                widest,
                search.suggestions().len(),
                search.popup_settings().max_rows,
                search.active_suggestion(),
            );
        }

        *self.regions.borrow_mut() = Regions {
            input: Some(to_region(layout.input)),
            popup: layout.popup.as_ref().map(|popup| to_region(popup.area)),
        };
        self.layout = layout;
    }

    fn render_into_frame(&self, f: &mut Frame<B>, chunk: Rect) {
        if chunk.width == 0 || chunk.height == 0 {
            return;
        }
        let search = self.search.borrow();
        self.render_tags(f, &search, chunk);
        self.render_input(f, &search, chunk);
        self.render_popup(f, &search);
    }

    fn handle_input(&mut self, event: Event) -> Result<ApplicationTask, TuiError> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => self.handle_press((column, row)),
            Event::Mouse(_) => Ok(ApplicationTask::DoNothing),
            _ => Ok(ApplicationTask::UpdateUI),
        }
    }

    fn status(&self) -> Option<String> {
        Some(format!("{} selected", self.search.borrow().selections().len()))
    }
}

impl Drop for SearchWidget {
    fn drop(&mut self) {
        tracing::info!("Unmounting user search");
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use tui::backend::TestBackend;
    use tui::Terminal;

    use usersearch_app::settings::PopupSettings;
    use usersearch_app::Point;
    use usersearch_records::{UserDirectory, UserRecord};

    use super::*;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 40,
        height: 10,
    };

    fn widget(events: &PointerEvents) -> SearchWidget {
        let directory = UserDirectory::from(vec![
            UserRecord::new("Alice"),
            UserRecord::new("Bob"),
            UserRecord::new("Alicia"),
        ]);
        SearchWidget::mount(
            events,
            UserSearch::new(Arc::new(directory), PopupSettings::default()),
            InterfaceStyle::default(),
        )
    }

    fn prepare(widget: &mut SearchWidget, area: Rect) {
        <SearchWidget as Widget<TestBackend>>::prepare_render(widget, area);
    }

    fn send_in(widget: &mut SearchWidget, area: Rect, event: Event) {
        prepare(widget, area);
        <SearchWidget as Widget<TestBackend>>::handle_input(widget, event).unwrap();
        prepare(widget, area);
    }

    fn send(widget: &mut SearchWidget, event: Event) {
        send_in(widget, AREA, event);
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_text(widget: &mut SearchWidget, text: &str) {
        for c in text.chars() {
            send(widget, key(KeyCode::Char(c)));
        }
    }

    fn selections(widget: &SearchWidget) -> Vec<String> {
        widget.search.borrow().selections().to_vec()
    }

    #[test]
    fn test_clicking_suggestion_adds_tag() {
        let events = PointerEvents::new();
        let mut widget = widget(&events);
        type_text(&mut widget, "ali");
        {
            let search = widget.search.borrow();
            assert!(search.popup_visible());
            assert_eq!(search.suggestions().len(), 2);
        }
        let popup = widget.layout.popup.clone().unwrap();
        assert_eq!(popup.area.y, 1);
        send(&mut widget, press(popup.rows[0].x, popup.rows[0].y));
        assert_eq!(selections(&widget), vec!["Alice".to_string()]);
        let search = widget.search.borrow();
        assert!(!search.popup_visible());
        assert!(search.input().is_empty());
    }

    #[test]
    fn test_clicking_cancel_removes_tag() {
        let events = PointerEvents::new();
        let mut widget = widget(&events);
        type_text(&mut widget, "bob");
        send(&mut widget, key(KeyCode::Down));
        send(&mut widget, key(KeyCode::Enter));
        assert_eq!(selections(&widget), vec!["Bob".to_string()]);

        let cancel = widget.layout.chips[0].cancel;
        send(&mut widget, press(cancel.x + 1, cancel.y));
        assert!(selections(&widget).is_empty());
    }

    #[test]
    fn test_backspace_twice_removes_last_tag() {
        let events = PointerEvents::new();
        let mut widget = widget(&events);
        for name in &["alice", "bob"] {
            type_text(&mut widget, name);
            send(&mut widget, key(KeyCode::Tab));
            send(&mut widget, key(KeyCode::Enter));
        }
        assert_eq!(selections(&widget).len(), 2);

        send(&mut widget, key(KeyCode::Backspace));
        assert_eq!(widget.search.borrow().highlighted(), Some(1));
        assert_eq!(selections(&widget).len(), 2);
        send(&mut widget, key(KeyCode::Backspace));
        assert_eq!(selections(&widget), vec!["Alice".to_string()]);
    }

    #[test]
    fn test_backspace_edits_text_first() {
        let events = PointerEvents::new();
        let mut widget = widget(&events);
        type_text(&mut widget, "bo");
        send(&mut widget, key(KeyCode::Backspace));
        let search = widget.search.borrow();
        assert_eq!(search.input_text(), "b");
        assert_eq!(search.highlighted(), None);
    }

    #[test]
    fn test_press_outside_dismisses_popup() {
        let events = PointerEvents::new();
        let mut widget = widget(&events);
        type_text(&mut widget, "b");
        events.dispatch(Point::new(30, 8));
        let search = widget.search.borrow();
        assert!(!search.popup_visible());
        assert_eq!(search.input_text(), "b");
    }

    #[test]
    fn test_press_inside_popup_keeps_it_open() {
        let events = PointerEvents::new();
        let mut widget = widget(&events);
        type_text(&mut widget, "b");
        let area = widget.layout.popup.clone().unwrap().area;
        events.dispatch(Point::new(area.x, area.y));
        assert!(widget.search.borrow().popup_visible());
    }

    #[test]
    fn test_popup_without_room_is_dismissable_and_skipped_by_keys() {
        let one_row = Rect::new(0, 0, 40, 1);
        let events = PointerEvents::new();
        let mut widget = widget(&events);
        send_in(&mut widget, one_row, key(KeyCode::Char('a')));
        assert!(widget.search.borrow().popup_visible());
        assert!(widget.layout.popup.is_none());

        send_in(&mut widget, one_row, key(KeyCode::Tab));
        send_in(&mut widget, one_row, key(KeyCode::Enter));
        assert!(selections(&widget).is_empty());
        assert_eq!(widget.search.borrow().active_suggestion(), None);

        events.dispatch(Point::new(39, 0));
        assert!(widget.search.borrow().popup_visible());
        events.dispatch(Point::new(100, 50));
        let search = widget.search.borrow();
        assert!(!search.popup_visible());
        assert_eq!(search.input_text(), "a");
    }

    #[test]
    fn test_dropping_widget_unsubscribes() {
        let events = PointerEvents::new();
        let widget = widget(&events);
        assert_eq!(events.listener_count(), 1);
        drop(widget);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_renders_tags_and_input() {
        let events = PointerEvents::new();
        let mut widget = widget(&events);
        type_text(&mut widget, "alice");
        send(&mut widget, key(KeyCode::Down));
        send(&mut widget, key(KeyCode::Enter));

        let mut terminal = Terminal::new(TestBackend::new(AREA.width, AREA.height)).unwrap();
        terminal.draw(|f| widget.render_into_frame(f, AREA)).unwrap();
        let buffer = terminal.backend().buffer();
        let row: String = (0..AREA.width)
            .map(|x| buffer.get(x, 0).symbol.clone())
            .collect();
        assert!(row.starts_with(" Alice  X "), "{:?}", row);
        assert!(row.contains(PLACEHOLDER), "{:?}", row);
    }
}
