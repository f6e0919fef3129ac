mod border_widget;
mod search_widget;

use crossterm::event::Event;

use tui::backend::Backend;
use tui::layout::Rect;
use tui::Frame;

use crate::ui::utils::ApplicationTask;
use crate::ui::TuiError;

pub(crate) use border_widget::BorderWidget;
pub(crate) use search_widget::SearchWidget;

pub(crate) trait Widget<B: Backend> {
    /// Lays the widget out in `chunk`. Always called before `render_into_frame`.
    fn prepare_render(&mut self, chunk: Rect);

    /// Renders the widget into the frame, using the provided space.
    ///
    /// # Arguments
    ///
    /// * ` f ` - A frame to render into.
    /// * ` chunk ` - A chunk to specify the size of the widget.
    fn render_into_frame(&self, f: &mut Frame<B>, chunk: Rect);

    /// Processes the event and modifies the internal state accordingly.
    fn handle_input(&mut self, event: Event) -> Result<ApplicationTask, TuiError>;

    /// A short description of the widget's state, shown in the frame title.
    fn status(&self) -> Option<String> {
        None
    }
}
