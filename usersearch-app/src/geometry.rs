/// A cell position on the screen; `x` is the column and `y` the row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Point { x, y }
    }
}

/// A rectangle of cells. The right and bottom edges are exclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(left: u16, top: u16, width: u16, height: u16) -> Self {
        Region {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> u16 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }
}

/// How far the surface the input lives on has been scrolled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOffset {
    pub x: u16,
    pub y: u16,
}

/// Where the input field is drawn at the time its text changes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputGeometry {
    pub bounds: Region,
    pub scroll: ScrollOffset,
}

impl InputGeometry {
    pub fn new(bounds: Region, scroll: ScrollOffset) -> Self {
        InputGeometry { bounds, scroll }
    }

    /// The popup hangs off the bottom-left corner of the input, shifted by the scroll
    /// offset.
    pub fn popup_position(&self) -> PopupPosition {
        PopupPosition {
            top: self.bounds.bottom().saturating_add(self.scroll.y),
            left: self.bounds.left.saturating_add(self.scroll.x),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PopupPosition {
    pub top: u16,
    pub left: u16,
}
