//! Two-sided (duplex) layout
//!
//! Every physical sheet is a front page followed by a back page. Backs are
//! mirrored so that, once the printer flips the sheet, each back lands
//! behind its front.

use crate::types::{CardSpec, FeedDirection, PageSpec, Result};

use super::grid::{create_grid, mirror_horizontal, mirror_vertical};
use super::{DuplexPlacement, Grid, Placement};

/// Place `count` cards for two-sided printing.
///
/// Fronts fill the grid row by row on page `2 * sheet`; backs go to page
/// `2 * sheet + 1` at the mirrored slot:
/// - landscape feed: columns reversed
/// - portrait feed: rows reversed and turned 180°
pub fn duplex_placements(
    page: &PageSpec,
    card: &CardSpec,
    count: usize,
) -> Result<Vec<DuplexPlacement>> {
    let grid = create_grid(page, card)?;
    Ok(place_duplex(&grid, page.feed_direction, count))
}

/// Assign `count` cards to an already computed grid for two-sided printing
pub fn place_duplex(grid: &Grid, feed: FeedDirection, count: usize) -> Vec<DuplexPlacement> {
    let per_sheet = grid.cell_count();
    (0..count)
        .map(|card| {
            let sheet = card / per_sheet;
            let slot = card % per_sheet;
            let pos = grid.position(slot);

            let (back_pos, rotated) = match feed {
                FeedDirection::Landscape => (mirror_horizontal(grid, pos), false),
                FeedDirection::Portrait => (mirror_vertical(grid, pos), true),
            };

            DuplexPlacement {
                sheet,
                front: Placement {
                    page: 2 * sheet,
                    slot,
                    card,
                    rect: grid.cell_bounds(pos),
                    rotated: false,
                },
                back: Placement {
                    page: 2 * sheet + 1,
                    slot: grid.slot(back_pos),
                    card,
                    rect: grid.cell_bounds(back_pos),
                    rotated,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(feed: FeedDirection) -> PageSpec {
        PageSpec {
            feed_direction: feed,
            ..Default::default()
        }
    }

    #[test]
    fn test_landscape_feed_mirrors_columns() {
        let placements =
            duplex_placements(&page(FeedDirection::Landscape), &CardSpec::default(), 8).unwrap();

        // 4x2 grid: slot 0 (row 0, col 0) backs onto slot 3 (row 0, col 3)
        assert_eq!(placements[0].back.slot, 3);
        assert_eq!(placements[0].back.rect.y, placements[0].front.rect.y);
        assert!(!placements[0].back.rotated);
        // slot 5 (row 1, col 1) backs onto slot 6 (row 1, col 2)
        assert_eq!(placements[5].back.slot, 6);
    }

    #[test]
    fn test_portrait_feed_mirrors_rows_and_rotates() {
        let placements =
            duplex_placements(&page(FeedDirection::Portrait), &CardSpec::default(), 8).unwrap();

        // slot 1 (row 0, col 1) backs onto slot 5 (row 1, col 1)
        assert_eq!(placements[1].back.slot, 5);
        assert_eq!(placements[1].back.rect.x, placements[1].front.rect.x);
        assert!(placements[1].back.rotated);
    }

    #[test]
    fn test_sheet_pages_alternate() {
        let placements =
            duplex_placements(&page(FeedDirection::Portrait), &CardSpec::default(), 9).unwrap();

        assert_eq!(placements[0].front.page, 0);
        assert_eq!(placements[0].back.page, 1);
        assert_eq!(placements[8].sheet, 1);
        assert_eq!(placements[8].front.page, 2);
        assert_eq!(placements[8].back.page, 3);
    }
}
