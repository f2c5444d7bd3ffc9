//! Page layout geometry for printable card sheets.
//!
//! Given a page description and a card size, computes how many cards fit on
//! a page, where each one goes, and how fronts and backs pair up for fold
//! or two-sided printing. No I/O happens here.

pub mod constants;
pub mod layout;
mod stats;
mod types;

pub use constants::{mm_to_pt, mm_to_px, pt_to_mm, px_to_mm};
pub use layout::*;
pub use stats::{LayoutStatistics, calculate_statistics};
pub use types::*;
