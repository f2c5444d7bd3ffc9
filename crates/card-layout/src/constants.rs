//! Shared constants and unit conversions for card layout
//!
//! All geometry in this crate is expressed in millimeters. Conversions to
//! points (PDF user space) and pixels (at a given DPI) live here.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / MM_PER_INCH;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

/// Convert millimeters to whole pixels at the given resolution.
///
/// Fractional pixels are truncated, so the result never exceeds the
/// physical size.
#[inline]
pub fn mm_to_px(mm: f32, dpi: f32) -> u32 {
    (mm * dpi / MM_PER_INCH).max(0.0) as u32
}

/// Convert pixels to millimeters at the given resolution
#[inline]
pub fn px_to_mm(px: u32, dpi: f32) -> f32 {
    px as f32 * MM_PER_INCH / dpi
}

// =============================================================================
// Layout
// =============================================================================

/// Slack allowed when checking whether cards fit (millimeters).
///
/// Sizes are user supplied decimals, so an exact fit may come out a hair
/// short after floating point arithmetic.
pub const FIT_EPSILON_MM: f32 = 1e-4;

// =============================================================================
// Defaults
// =============================================================================

/// Default card trim width (mm)
pub const DEFAULT_CARD_WIDTH_MM: f32 = 61.5;

/// Default card trim height (mm)
pub const DEFAULT_CARD_HEIGHT_MM: f32 = 88.0;

/// Default distance between a card and the fold line (mm)
pub const DEFAULT_FOLD_DISTANCE_MM: f32 = 3.0;

/// Default page margin (mm)
pub const DEFAULT_MARGIN_MM: f32 = 6.0;

/// Default PDF resolution (dots per inch)
pub const DEFAULT_DPI: f32 = 600.0;

/// Highest accepted resolution; above this card images no longer fit in memory
pub const MAX_DPI: f32 = 2400.0;
