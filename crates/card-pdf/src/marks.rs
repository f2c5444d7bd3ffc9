//! Cut and fold guides drawn on sheet pages
//!
//! Guides are drawn before the card images so that the parts crossing a
//! card are covered and only the pieces in margins and gaps stay visible.

use crate::constants::{
    BLANK_OUTLINE_WIDTH_PT, CUT_LINE_WIDTH_PT, FOLD_DASH_PT, FOLD_GAP_PT, FOLD_LINE_WIDTH_PT,
};
use card_layout::{CutGuides, PageSpec, Rect, mm_to_pt};
use printpdf::{Color, Line, LinePoint, Op, Point, Pt, Rgb};

/// Maps layout millimetres (top-left origin) to PDF points (bottom-left)
#[derive(Debug, Clone, Copy)]
pub(crate) struct PageFrame {
    pub height_mm: f32,
    pub offset_x_mm: f32,
    pub offset_y_mm: f32,
}

impl PageFrame {
    pub fn new(page: &PageSpec) -> Self {
        Self {
            height_mm: page.height_mm(),
            offset_x_mm: 0.0,
            offset_y_mm: 0.0,
        }
    }

    pub fn shifted(self, offset_x_mm: f32, offset_y_mm: f32) -> Self {
        Self {
            offset_x_mm,
            offset_y_mm,
            ..self
        }
    }

    pub fn x(&self, x_mm: f32) -> Pt {
        Pt(mm_to_pt(x_mm + self.offset_x_mm))
    }

    pub fn y(&self, y_mm: f32) -> Pt {
        Pt(mm_to_pt(self.height_mm - y_mm - self.offset_y_mm))
    }

    pub fn point(&self, x_mm: f32, y_mm: f32) -> Point {
        Point {
            x: self.x(x_mm),
            y: self.y(y_mm),
        }
    }

    /// Lower-left corner of `rect` in PDF space
    pub fn origin(&self, rect: &Rect) -> (Pt, Pt) {
        (self.x(rect.x), self.y(rect.bottom()))
    }
}

fn black() -> Color {
    Color::Rgb(Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        icc_profile: None,
    })
}

fn segment(from: Point, to: Point) -> Op {
    Op::DrawLine {
        line: Line {
            points: vec![
                LinePoint {
                    p: from,
                    bezier: false,
                },
                LinePoint { p: to, bezier: false },
            ],
            is_closed: false,
        },
    }
}

/// Generate the ops for cut lines (and the fold line, if any).
///
/// Cut lines span the printable area; the fold line is dashed and spans the
/// full printable width.
pub(crate) fn guide_ops(guides: &CutGuides, page: &PageSpec, frame: &PageFrame) -> Vec<Op> {
    let left = page.margin_mm;
    let right = page.width_mm() - page.margin_mm;
    let top = page.margin_mm;
    let bottom = page.height_mm() - page.margin_mm;

    let mut ops = vec![
        Op::SaveGraphicsState,
        Op::SetOutlineColor { col: black() },
        Op::SetOutlineThickness {
            pt: Pt(CUT_LINE_WIDTH_PT),
        },
    ];

    for &x in &guides.vertical_mm {
        ops.push(segment(frame.point(x, top), frame.point(x, bottom)));
    }
    for &y in &guides.horizontal_mm {
        ops.push(segment(frame.point(left, y), frame.point(right, y)));
    }

    if let Some(fold_y) = guides.fold_mm {
        ops.push(Op::SetOutlineThickness {
            pt: Pt(FOLD_LINE_WIDTH_PT),
        });
        ops.extend(dashed_line(frame, left, right, fold_y));
    }

    ops.push(Op::RestoreGraphicsState);
    ops
}

/// Horizontal dashed line from `x0` to `x1` at `y` (mm)
fn dashed_line(frame: &PageFrame, x0: f32, x1: f32, y: f32) -> Vec<Op> {
    let start = frame.x(x0).0;
    let end = frame.x(x1).0;
    let y_pt = frame.y(y);

    let mut ops = Vec::new();
    let mut x = start;
    while x < end {
        let dash_end = (x + FOLD_DASH_PT).min(end);
        ops.push(segment(
            Point { x: Pt(x), y: y_pt },
            Point {
                x: Pt(dash_end),
                y: y_pt,
            },
        ));
        x += FOLD_DASH_PT + FOLD_GAP_PT;
    }
    ops
}

/// Outline of an empty card on the (white) page, standing in for a missing
/// face
pub(crate) fn blank_card_ops(rect: &Rect, frame: &PageFrame) -> Vec<Op> {
    let corners = [
        frame.point(rect.x, rect.y),
        frame.point(rect.right(), rect.y),
        frame.point(rect.right(), rect.bottom()),
        frame.point(rect.x, rect.bottom()),
    ];
    let outline = Line {
        points: corners
            .iter()
            .map(|&p| LinePoint { p, bezier: false })
            .collect(),
        is_closed: true,
    };

    vec![
        Op::SaveGraphicsState,
        Op::SetOutlineColor { col: black() },
        Op::SetOutlineThickness {
            pt: Pt(BLANK_OUTLINE_WIDTH_PT),
        },
        Op::DrawLine { line: outline },
        Op::RestoreGraphicsState,
    ]
}
