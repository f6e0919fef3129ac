use tui::layout::Rect;

use usersearch_app::{PopupPosition, Region};

/// Width of the " X " removal control after each tag.
pub(crate) const CANCEL_WIDTH: u16 = 3;
/// Blank columns between two tags.
const CHIP_GAP: u16 = 1;
/// The input moves to its own line when less than this is left after the tags.
const MIN_INPUT_WIDTH: u16 = 12;
const MIN_POPUP_WIDTH: u16 = 16;

pub trait RectExt {
    fn contains(&self, point: &(u16, u16)) -> bool;
}

impl RectExt for Rect {
    fn contains(&self, point: &(u16, u16)) -> bool {
        point.0 >= self.x
            && point.0 < self.x + self.width
            && point.1 >= self.y
            && point.1 < self.y + self.height
    }
}

pub(crate) fn to_region(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChipLayout {
    pub(crate) label: Rect,
    pub(crate) cancel: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PopupLayout {
    pub(crate) area: Rect,
    /// One rect per visible suggestion, top to bottom.
    pub(crate) rows: Vec<Rect>,
    /// Index of the suggestion shown in the first row.
    pub(crate) first_row: usize,
}

impl PopupLayout {
    /// Returns the index of the suggestion drawn at `point`.
    pub(crate) fn row_at(&self, point: &(u16, u16)) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.contains(point))
            .map(|i| self.first_row + i)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SearchLayout {
    pub(crate) chips: Vec<ChipLayout>,
    pub(crate) input: Rect,
    pub(crate) popup: Option<PopupLayout>,
}

impl SearchLayout {
    /// Flows the tags left to right inside `chunk`, wrapping when a tag does not fit
    /// on the current line, and places the input after the last tag.
    ///
    /// # Arguments
    /// * ` chunk ` - The area to lay out in.
    /// * ` label_widths ` - The width of each tag label, padding included.
    pub(crate) fn new(chunk: Rect, label_widths: &[u16]) -> Self {
        let right = chunk.x + chunk.width;
        let (mut x, mut y) = (chunk.x, chunk.y);
        let mut chips = Vec::with_capacity(label_widths.len());
        for &width in label_widths {
            let label_width = width.min(chunk.width.saturating_sub(CANCEL_WIDTH));
            let total = label_width + CANCEL_WIDTH;
            if x > chunk.x && x.saturating_add(total) > right {
                x = chunk.x;
                y = y.saturating_add(1);
            }
            chips.push(ChipLayout {
                label: Rect::new(x, y, label_width, 1),
                cancel: Rect::new(x + label_width, y, CANCEL_WIDTH.min(chunk.width), 1),
            });
            x = x.saturating_add(total + CHIP_GAP).min(right);
        }

        if x > chunk.x && right.saturating_sub(x) < MIN_INPUT_WIDTH {
            x = chunk.x;
            y = y.saturating_add(1);
        }
        // The input always stays on screen, even if that means covering tags.
        let y = y.min((chunk.y + chunk.height).saturating_sub(1));
        SearchLayout {
            chips,
            input: Rect::new(x, y, right.saturating_sub(x), 1u16.min(chunk.height)),
            popup: None,
        }
    }

    /// Returns the index of the tag whose removal control is at `point`.
    pub(crate) fn cancel_at(&self, point: &(u16, u16)) -> Option<usize> {
        self.chips.iter().position(|chip| chip.cancel.contains(point))
    }
}

/// Returns true if `rect` is non-empty and lies entirely within `chunk`.
pub(crate) fn fits(rect: Rect, chunk: Rect) -> bool {
    rect.width > 0
        && rect.height > 0
        && rect.x >= chunk.x
        && rect.y >= chunk.y
        && rect.x + rect.width <= chunk.x + chunk.width
        && rect.y + rect.height <= chunk.y + chunk.height
}

/// Places the suggestion popup with its top-left corner at `position`, clipped to
/// `chunk`. Returns None if not even the border fits.
///
/// # Arguments
/// * ` chunk ` - The area the popup must stay within.
/// * ` position ` - The top-left corner of the popup.
/// * ` widest ` - The width of the widest suggestion.
/// * ` count ` - The number of suggestions.
/// * ` max_rows ` - The most rows to show at once.
/// * ` active ` - The suggestion under the keyboard cursor, which is kept visible.
pub(crate) fn popup_layout(
    chunk: Rect,
    position: PopupPosition,
    widest: u16,
    count: usize,
    max_rows: usize,
    active: Option<usize>,
) -> Option<PopupLayout> {
    let right = chunk.x + chunk.width;
    let bottom = chunk.y + chunk.height;
    if position.left < chunk.x || position.top < chunk.y {
        return None;
    }
    let available_width = right.saturating_sub(position.left);
    let available_height = bottom.saturating_sub(position.top);
    if available_width < 2 || available_height < 2 {
        return None;
    }

    let width = widest
        .saturating_add(2)
        .max(MIN_POPUP_WIDTH)
        .min(available_width);
    let wanted_rows = count.min(max_rows) as u16;
    let height = wanted_rows.saturating_add(2).min(available_height);
    let area = Rect::new(position.left, position.top, width, height);

    let visible = usize::from(height - 2);
    let first_row = match active {
        Some(active) if visible > 0 && active >= visible => active + 1 - visible,
        _ => 0,
    };
    let rows = (0..visible.min(count.saturating_sub(first_row)))
        .map(|i| Rect::new(area.x + 1, area.y + 1 + i as u16, width - 2, 1))
        .collect();

    Some(PopupLayout {
        area,
        rows,
        first_row,
    })
}
