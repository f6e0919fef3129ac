use crossterm::event::Event;
use tui::backend::Backend;
use tui::layout::Rect;
use tui::widgets::{Block, Borders};
use tui::Frame;

use crate::ui::utils::ApplicationTask;
use crate::ui::widgets::Widget;
use crate::ui::TuiError;

pub(crate) struct BorderWidget<B: Backend> {
    name: String,
    pub(crate) inner: Box<dyn Widget<B>>,
}

impl<B: Backend> BorderWidget<B> {
    pub(crate) fn new(name: String, inner: Box<dyn Widget<B>>) -> Self {
        BorderWidget { name, inner }
    }

    fn inner_chunk(chunk: Rect) -> Rect {
        Rect::new(
            chunk.x + 1,
            chunk.y + 1,
            chunk.width.saturating_sub(2),
            chunk.height.saturating_sub(2),
        )
    }
}

impl<B: Backend> Widget<B> for BorderWidget<B> {
    fn prepare_render(&mut self, chunk: Rect) {
        self.inner.prepare_render(Self::inner_chunk(chunk))
    }

    fn render_into_frame(&self, f: &mut Frame<B>, chunk: Rect) {
        let title = match self.inner.status() {
            Some(status) => format!(" usersearch || {} || {} ", self.name, status),
            None => format!(" usersearch || {} ", self.name),
        };
        let block = Block::default().title(title).borders(Borders::ALL);

        f.render_widget(block, chunk);
        self.inner.render_into_frame(f, Self::inner_chunk(chunk))
    }

    fn handle_input(&mut self, event: Event) -> Result<ApplicationTask, TuiError> {
        self.inner.handle_input(event)
    }
}
