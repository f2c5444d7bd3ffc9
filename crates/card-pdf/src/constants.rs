//! Line styles for sheet guides

pub const CUT_LINE_WIDTH_PT: f32 = 0.5;

pub const FOLD_LINE_WIDTH_PT: f32 = 0.25;
pub const FOLD_DASH_PT: f32 = 3.0;
pub const FOLD_GAP_PT: f32 = 3.0;

/// Outline of a card drawn without an image
pub const BLANK_OUTLINE_WIDTH_PT: f32 = 0.5;

/// Title stored in generated documents
pub const DOCUMENT_TITLE: &str = "Card sheet";
