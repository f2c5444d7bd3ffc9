//! Grid layout calculation
//!
//! Tiles fixed-size cards onto the printable area of a page and assigns
//! cards to slots in row-major order, page after page.

use crate::constants::FIT_EPSILON_MM;
use crate::types::{CardSpec, LayoutError, PageSpec, Result};

use super::{Grid, GridPosition, Placement};

// =============================================================================
// Grid Creation
// =============================================================================

/// Number of cards of `size` that fit in `available` with `spacing`
/// between neighbours.
///
/// Solves `n * size + (n - 1) * spacing <= available` for the largest `n`.
pub fn fit_count(available_mm: f32, size_mm: f32, spacing_mm: f32) -> usize {
    if size_mm <= 0.0 || available_mm + FIT_EPSILON_MM < size_mm {
        return 0;
    }
    ((available_mm + spacing_mm + FIT_EPSILON_MM) / (size_mm + spacing_mm)).floor() as usize
}

/// Extent of `count` cards laid out with `spacing` between them
fn span(count: usize, size_mm: f32, spacing_mm: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    count as f32 * size_mm + (count - 1) as f32 * spacing_mm
}

/// Validate both specs before any geometry is derived from them
pub(crate) fn validate_specs(page: &PageSpec, card: &CardSpec) -> Result<()> {
    page.validate()?;
    card.validate()
}

/// Number of columns that fit across the printable width.
///
/// Zero columns is a configuration error.
pub(crate) fn fit_columns(page: &PageSpec, card: &CardSpec) -> Result<usize> {
    let cols = fit_count(
        page.printable_width_mm(),
        card.total_width_mm(),
        card.spacing_mm,
    );
    if cols == 0 {
        return Err(LayoutError::Config(format!(
            "Cannot fit any cards in the width dimension: card is {:.1} mm wide, printable width is {:.1} mm",
            card.total_width_mm(),
            page.printable_width_mm()
        )));
    }
    Ok(cols)
}

/// Left edge of the first column when `cols` columns are centered
pub(crate) fn centered_origin_x(page: &PageSpec, card: &CardSpec, cols: usize) -> f32 {
    let used = span(cols, card.total_width_mm(), card.spacing_mm);
    page.margin_mm + (page.printable_width_mm() - used) / 2.0
}

/// Create the grid of card slots for a page.
///
/// Columns and rows are the largest counts that fit in the printable area
/// with the card's minimum spacing between neighbours. The grid is centered
/// inside the margins, so leftover space becomes extra margin split evenly
/// on both sides.
pub fn create_grid(page: &PageSpec, card: &CardSpec) -> Result<Grid> {
    validate_specs(page, card)?;

    let cols = fit_columns(page, card)?;
    let rows = fit_count(
        page.printable_height_mm(),
        card.total_height_mm(),
        card.spacing_mm,
    );
    if rows == 0 {
        return Err(LayoutError::Config(format!(
            "Cannot fit any cards in the height dimension: card is {:.1} mm high, printable height is {:.1} mm",
            card.total_height_mm(),
            page.printable_height_mm()
        )));
    }

    let used_height = span(rows, card.total_height_mm(), card.spacing_mm);

    let grid = Grid {
        cols,
        rows,
        origin_x_mm: centered_origin_x(page, card, cols),
        origin_y_mm: page.margin_mm + (page.printable_height_mm() - used_height) / 2.0,
        pitch_x_mm: card.total_width_mm() + card.spacing_mm,
        pitch_y_mm: card.total_height_mm() + card.spacing_mm,
        cell_width_mm: card.total_width_mm(),
        cell_height_mm: card.total_height_mm(),
    };

    log::debug!(
        "grid {}x{} at ({:.2}, {:.2}) mm, pitch {:.2}x{:.2} mm",
        grid.cols,
        grid.rows,
        grid.origin_x_mm,
        grid.origin_y_mm,
        grid.pitch_x_mm,
        grid.pitch_y_mm
    );

    Ok(grid)
}

// =============================================================================
// Card Assignment
// =============================================================================

/// Lay out `count` cards on as many pages as needed.
///
/// Cards fill slots row by row; a new page starts when the grid is full.
/// Invalid geometry is reported before any placement is produced.
pub fn layout_cards(page: &PageSpec, card: &CardSpec, count: usize) -> Result<Vec<Placement>> {
    let grid = create_grid(page, card)?;
    Ok(place_on_grid(&grid, count))
}

/// Assign `count` cards to the slots of an already computed grid
pub fn place_on_grid(grid: &Grid, count: usize) -> Vec<Placement> {
    let per_page = grid.cell_count();
    (0..count)
        .map(|card| {
            let slot = card % per_page;
            Placement {
                page: card / per_page,
                slot,
                card,
                rect: grid.cell_bounds(grid.position(slot)),
                rotated: false,
            }
        })
        .collect()
}

/// Number of card slots on one page
pub fn cards_per_page(page: &PageSpec, card: &CardSpec) -> Result<usize> {
    Ok(create_grid(page, card)?.cell_count())
}

/// Number of pages needed for `count` cards
pub fn page_count(page: &PageSpec, card: &CardSpec, count: usize) -> Result<usize> {
    let per_page = cards_per_page(page, card)?;
    Ok(count.div_ceil(per_page))
}

/// Grid position of a slot mirrored left to right
pub fn mirror_horizontal(grid: &Grid, pos: GridPosition) -> GridPosition {
    GridPosition::new(pos.row, grid.cols - 1 - pos.col)
}

/// Grid position of a slot mirrored top to bottom
pub fn mirror_vertical(grid: &Grid, pos: GridPosition) -> GridPosition {
    GridPosition::new(grid.rows - 1 - pos.row, pos.col)
}

// =============================================================================
// Tests
// =============================================================================
