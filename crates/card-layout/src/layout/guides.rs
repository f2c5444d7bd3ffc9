//! Cut and fold line positions
//!
//! Cut lines run along the trim edges of the cards, i.e. inside the bleed.

use crate::types::CardSpec;

use super::{CutGuides, FoldLayout, Grid};

fn trim_edges(starts: impl Iterator<Item = f32>, bleed: f32, trim: f32) -> Vec<f32> {
    let mut edges: Vec<f32> = starts
        .flat_map(|start| [start + bleed, start + bleed + trim])
        .collect();
    edges.sort_by(f32::total_cmp);
    edges.dedup_by(|a, b| (*a - *b).abs() < 1e-3);
    edges
}

/// Cut lines for every row and column of a grid
pub fn grid_cut_guides(grid: &Grid, card: &CardSpec) -> CutGuides {
    let xs = (0..grid.cols).map(|c| grid.origin_x_mm + c as f32 * grid.pitch_x_mm);
    let ys = (0..grid.rows).map(|r| grid.origin_y_mm + r as f32 * grid.pitch_y_mm);
    CutGuides {
        vertical_mm: trim_edges(xs, card.bleed_mm, card.width_mm),
        horizontal_mm: trim_edges(ys, card.bleed_mm, card.height_mm),
        fold_mm: None,
    }
}

/// Cut lines for both rows of a folded page, plus the fold line
pub fn fold_cut_guides(layout: &FoldLayout, card: &CardSpec) -> CutGuides {
    let xs = (0..layout.cols).map(|c| layout.origin_x_mm + c as f32 * layout.pitch_x_mm);
    let ys = [layout.front_y_mm, layout.back_y_mm].into_iter();
    CutGuides {
        vertical_mm: trim_edges(xs, card.bleed_mm, card.width_mm),
        horizontal_mm: trim_edges(ys, card.bleed_mm, card.height_mm),
        fold_mm: Some(layout.fold_y_mm),
    }
}
