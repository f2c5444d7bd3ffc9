//! Layout calculation modules
//!
//! This module handles all the geometric calculations for card sheets:
//! - Grid tiling (how many cards fit, where each slot sits)
//! - Fold layout (front and back around a fold line)
//! - Duplex layout (mirrored backs on alternate pages)
//! - Cut and fold guide positions

mod duplex;
mod fold;
mod grid;
mod guides;
mod types;

pub use duplex::*;
pub use fold::*;
pub use grid::*;
pub use guides::*;
pub use types::*;
