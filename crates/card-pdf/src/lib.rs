//! Print sheet generation: lays out card faces on pages and renders a PDF
//! with cut and fold guides.

mod constants;
mod io;
mod marks;
mod sheet;
mod types;

pub use io::{generate_pdf, save_pdf};
pub use sheet::{CardEntry, CardSheet};
pub use types::*;
