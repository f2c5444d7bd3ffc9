//! Layout data types
//!
//! Coordinates are millimeters measured from the top-left corner of the
//! sheet, x to the right and y downwards. Renderers convert to their own
//! coordinate system.

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular area in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True if the interiors of the two rectangles intersect.
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Gap between two rectangles along the axis where they are separated.
    ///
    /// Returns 0 for overlapping rectangles.
    pub fn distance_to(&self, other: &Rect) -> f32 {
        let dx = (other.x - self.right()).max(self.x - other.right()).max(0.0);
        let dy = (other.y - self.bottom()).max(self.y - other.bottom()).max(0.0);
        dx.max(dy)
    }
}

/// Grid of card slots on a page
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
    /// Left edge of column 0
    pub origin_x_mm: f32,
    /// Top edge of row 0
    pub origin_y_mm: f32,
    /// Card width plus spacing
    pub pitch_x_mm: f32,
    /// Card height plus spacing
    pub pitch_y_mm: f32,
    /// Card width including bleed
    pub cell_width_mm: f32,
    /// Card height including bleed
    pub cell_height_mm: f32,
}

impl Grid {
    /// Total number of slots in the grid
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Grid position of a slot index (row-major)
    pub fn position(&self, slot: usize) -> GridPosition {
        GridPosition::new(slot / self.cols, slot % self.cols)
    }

    /// Slot index of a grid position (row-major)
    pub fn slot(&self, pos: GridPosition) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Bounds of the card at the given grid position
    pub fn cell_bounds(&self, pos: GridPosition) -> Rect {
        Rect::new(
            self.origin_x_mm + pos.col as f32 * self.pitch_x_mm,
            self.origin_y_mm + pos.row as f32 * self.pitch_y_mm,
            self.cell_width_mm,
            self.cell_height_mm,
        )
    }
}

/// A card slot on a page
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Output page index (0-based)
    pub page: usize,
    /// Slot index on that page (row-major)
    pub slot: usize,
    /// Index of the card in input order
    pub card: usize,
    /// Card bounds including bleed
    pub rect: Rect,
    /// Whether the card is drawn turned 180°
    pub rotated: bool,
}

/// Front and back of one card on the same folded sheet
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoldPlacement {
    pub front: Placement,
    pub back: Placement,
}

/// Front and back of one card on consecutive pages of a duplex print
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuplexPlacement {
    /// Physical sheet index
    pub sheet: usize,
    pub front: Placement,
    pub back: Placement,
}

/// Positions of cut and fold lines on a page
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CutGuides {
    /// X positions of vertical cut lines (trim edges)
    pub vertical_mm: Vec<f32>,
    /// Y positions of horizontal cut lines (trim edges)
    pub horizontal_mm: Vec<f32>,
    /// Y position of the fold line, for folded layouts
    pub fold_mm: Option<f32>,
}
