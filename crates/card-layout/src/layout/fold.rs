//! Fold-style layout
//!
//! One row of cards per page. Fronts sit above the horizontal centerline of
//! the sheet, backs below it turned 180°, so that folding the sheet along
//! the centerline brings each front onto its back.

use crate::constants::FIT_EPSILON_MM;
use crate::types::{CardSpec, LayoutError, PageSpec, Result};

use super::grid::{centered_origin_x, fit_columns, validate_specs};
use super::{FoldPlacement, Placement, Rect};

/// Geometry shared by every page of a folded print
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoldLayout {
    /// Cards (front/back pairs) per page
    pub cols: usize,
    /// Left edge of the first card
    pub origin_x_mm: f32,
    /// Card width plus spacing
    pub pitch_x_mm: f32,
    /// Top edge of the front row
    pub front_y_mm: f32,
    /// Top edge of the back row
    pub back_y_mm: f32,
    /// Y position of the fold line
    pub fold_y_mm: f32,
    /// Card width including bleed
    pub cell_width_mm: f32,
    /// Card height including bleed
    pub cell_height_mm: f32,
}

impl FoldLayout {
    fn rect(&self, slot: usize, y: f32) -> Rect {
        Rect::new(
            self.origin_x_mm + slot as f32 * self.pitch_x_mm,
            y,
            self.cell_width_mm,
            self.cell_height_mm,
        )
    }

    /// Front bounds for a slot
    pub fn front_rect(&self, slot: usize) -> Rect {
        self.rect(slot, self.front_y_mm)
    }

    /// Back bounds for a slot
    pub fn back_rect(&self, slot: usize) -> Rect {
        self.rect(slot, self.back_y_mm)
    }
}

/// Compute the fold layout for a page.
///
/// Columns follow the same fit and centering rules as the grid layout. Both
/// rows must stay inside the margins once pushed `fold_distance_mm` away
/// from the centerline.
pub fn create_fold_layout(page: &PageSpec, card: &CardSpec) -> Result<FoldLayout> {
    validate_specs(page, card)?;

    let cols = fit_columns(page, card)?;
    let height = card.total_height_mm();
    let fold_y = page.height_mm() / 2.0;
    let front_y = fold_y - card.fold_distance_mm - height;
    let back_y = fold_y + card.fold_distance_mm;

    let top_limit = page.margin_mm;
    let bottom_limit = page.height_mm() - page.margin_mm;
    if front_y + FIT_EPSILON_MM < top_limit || back_y + height > bottom_limit + FIT_EPSILON_MM {
        return Err(LayoutError::Config(format!(
            "Cannot fit front and back of a {:.1} mm high card {:.1} mm from the fold line within a {:.1} mm printable height",
            height,
            card.fold_distance_mm,
            page.printable_height_mm()
        )));
    }

    let layout = FoldLayout {
        cols,
        origin_x_mm: centered_origin_x(page, card, cols),
        pitch_x_mm: card.total_width_mm() + card.spacing_mm,
        front_y_mm: front_y,
        back_y_mm: back_y,
        fold_y_mm: fold_y,
        cell_width_mm: card.total_width_mm(),
        cell_height_mm: height,
    };

    log::debug!(
        "fold layout: {} cards per page, fronts at y={:.2}, backs at y={:.2}, fold at y={:.2}",
        layout.cols,
        layout.front_y_mm,
        layout.back_y_mm,
        layout.fold_y_mm
    );

    Ok(layout)
}

/// Place `count` cards for fold printing.
///
/// Card `i` goes to page `i / cols`, slot `i % cols`. The back shares the
/// front's column and is marked rotated.
pub fn fold_placements(
    page: &PageSpec,
    card: &CardSpec,
    count: usize,
) -> Result<Vec<FoldPlacement>> {
    let layout = create_fold_layout(page, card)?;
    Ok(place_folded(&layout, count))
}

/// Assign `count` cards to an already computed fold layout
pub fn place_folded(layout: &FoldLayout, count: usize) -> Vec<FoldPlacement> {
    (0..count)
        .map(|card| {
            let page = card / layout.cols;
            let slot = card % layout.cols;
            FoldPlacement {
                front: Placement {
                    page,
                    slot,
                    card,
                    rect: layout.front_rect(slot),
                    rotated: false,
                },
                back: Placement {
                    page,
                    slot,
                    card,
                    rect: layout.back_rect(slot),
                    rotated: true,
                },
            }
        })
        .collect()
}
