use crate::layout::{create_fold_layout, create_grid};
use crate::types::*;

/// Statistics about a card sheet layout
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutStatistics {
    /// Number of cards placed
    pub cards: usize,
    /// Card slots per physical sheet
    pub cards_per_sheet: usize,
    /// Physical sheets of paper
    pub sheets: usize,
    /// Output page count (both sides for two-sided printing)
    pub output_pages: usize,
    /// Unused slots on the last sheet
    pub empty_slots: usize,
}

/// Calculate statistics for laying out `count` cards
pub fn calculate_statistics(
    page: &PageSpec,
    card: &CardSpec,
    mode: PrintMode,
    count: usize,
) -> Result<LayoutStatistics> {
    match mode {
        PrintMode::Folded => {
            let layout = create_fold_layout(page, card)?;
            Ok(build_stats(count, layout.cols, 1))
        }
        PrintMode::TwoSided => {
            let grid = create_grid(page, card)?;
            Ok(build_stats(count, grid.cell_count(), 2))
        }
    }
}

fn build_stats(count: usize, per_sheet: usize, pages_per_sheet: usize) -> LayoutStatistics {
    let sheets = count.div_ceil(per_sheet);
    LayoutStatistics {
        cards: count,
        cards_per_sheet: per_sheet,
        sheets,
        output_pages: sheets * pages_per_sheet,
        empty_slots: sheets * per_sheet - count,
    }
}
