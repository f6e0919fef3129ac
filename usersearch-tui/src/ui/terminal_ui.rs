use std::fmt;
use std::sync::Arc;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use futures::{future::FutureExt, StreamExt};
use tokio::time::{timeout, Duration};

use tui::backend::Backend;
use tui::Terminal;

use usersearch_app::settings::{InterfaceStyle, PopupSettings};
use usersearch_app::{Point, PointerEvents, SearchError, SettingsError, UserSearch};
use usersearch_records::{RecordError, UserDirectory};

use crate::ui::utils::ApplicationTask;
use crate::ui::widgets::{BorderWidget, SearchWidget, Widget};

#[derive(Debug)]
pub(crate) enum TuiError {
    Records(RecordError),
    Search(SearchError),
    Settings(SettingsError),
    Io(std::io::Error),
}

impl From<RecordError> for TuiError {
    fn from(e: RecordError) -> Self {
        TuiError::Records(e)
    }
}

impl From<SearchError> for TuiError {
    fn from(e: SearchError) -> Self {
        TuiError::Search(e)
    }
}

impl From<SettingsError> for TuiError {
    fn from(e: SettingsError) -> Self {
        TuiError::Settings(e)
    }
}

impl From<std::io::Error> for TuiError {
    fn from(e: std::io::Error) -> Self {
        TuiError::Io(e)
    }
}

impl fmt::Display for TuiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuiError::Records(e) => write!(f, "{}", e),
            TuiError::Search(e) => write!(f, "{}", e),
            TuiError::Settings(e) => write!(f, "{}", e),
            TuiError::Io(e) => write!(f, "{}", e),
        }
    }
}

pub(crate) struct AppInterface<B: Backend> {
    active_view: BorderWidget<B>,
    pointer_events: PointerEvents,
    update_tui: bool,
    event_receiver: EventStream,
}

impl<B: Backend> AppInterface<B> {
    /// Returns a new interface, with the search widget mounted.
    ///
    /// # Arguments
    ///
    /// * ` name ` - The name shown in the frame title.
    /// * ` style ` - The colours to draw with.
    /// * ` directory ` - The users to suggest.
    /// * ` popup_settings ` - How the suggestion popup behaves.
    pub(crate) fn new<S: Into<String>>(
        name: S,
        style: InterfaceStyle,
        directory: Arc<UserDirectory>,
        popup_settings: PopupSettings,
        event_receiver: EventStream,
    ) -> AppInterface<B> {
        let pointer_events = PointerEvents::new();
        let search = SearchWidget::mount(
            &pointer_events,
            UserSearch::new(directory, popup_settings),
            style,
        );
        AppInterface {
            active_view: BorderWidget::new(name.into(), Box::new(search)),
            pointer_events,
            update_tui: true,
            event_receiver,
        }
    }

    /// Reads and handles user input. On success, returns a bool
    /// indicating whether to continue or not.
    ///
    /// # Errors
    /// This function may error if reading the terminal or handling the event fails.
    async fn read_user_input(&mut self) -> Result<bool, TuiError> {
        match timeout(Duration::from_millis(250), self.event_receiver.next().fuse()).await {
            Ok(Some(Ok(event))) => {
                match event {
                    Event::Key(KeyEvent {
                        code: KeyCode::Char('q'),
                        modifiers: KeyModifiers::CONTROL,
                        ..
                    })
                    | Event::Key(KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers: KeyModifiers::CONTROL,
                        ..
                    }) => return Ok(false),
                    // Presses go to every pointer listener first, wherever they land.
                    Event::Mouse(MouseEvent {
                        kind: MouseEventKind::Down(MouseButton::Left),
                        column,
                        row,
                        ..
                    }) => {
                        self.pointer_events.dispatch(Point::new(column, row));
                        self.update_tui = true;
                    }
                    _ => {}
                }
                match self.active_view.handle_input(event)? {
                    ApplicationTask::UpdateUI => {
                        self.update_tui = true;
                    }
                    ApplicationTask::DoNothing => {}
                }
                Ok(true)
            }
            Ok(None) => Ok(false),
            Ok(Some(Err(e))) => Err(e.into()),
            Err(_) => Ok(true),
        }
    }

    fn take_update(&mut self) -> bool {
        std::mem::replace(&mut self.update_tui, false)
    }

    /// Runs the application - including handling user inputs and refreshing the output.
    ///
    /// # Arguments
    ///
    /// * ` terminal ` - The terminal to output text to.
    ///
    /// # Errors
    /// This function will return an error if drawing to or reading from the terminal fails.
    #[tracing::instrument(name = "Running user search", skip(self, terminal))]
    pub(crate) async fn run(&mut self, terminal: &mut Terminal<B>) -> Result<(), TuiError> {
        loop {
            if self.take_update() {
                let size = terminal.size()?;
                self.active_view.prepare_render(size);
                terminal.draw(|f| {
                    let size = f.size();
                    if size.height < 2 || size.width < 2 {
                        return;
                    }
                    self.active_view.render_into_frame(f, size);
                })?;
            }

            match self.read_user_input().await {
                Ok(false) => {
                    tracing::info!("Exiting");
                    return Ok(terminal.clear()?);
                }
                Ok(true) => {}
                Err(TuiError::Io(e)) => return Err(TuiError::Io(e)),
                Err(e) => {
                    tracing::warn!("Error occurred during execution: {}", e);
                    self.update_tui = true;
                }
            }
        }
    }
}
