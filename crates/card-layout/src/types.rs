use crate::constants::*;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Unknown page size: {0}")]
    UnknownPaperSize(String),
    #[error("Illegal feed direction: {0}")]
    UnknownFeedDirection(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Check a resolution is positive, finite and at most [`MAX_DPI`]
pub fn validate_dpi(dpi: f32) -> Result<()> {
    if !(dpi > 0.0 && dpi <= MAX_DPI) {
        return Err(LayoutError::Config(format!(
            "Resolution must be between 0 and {} dpi, got {}",
            MAX_DPI, dpi
        )));
    }
    Ok(())
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    Letter,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        let (short, long) = if w <= h { (w, h) } else { (h, w) };
        match orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }

    /// Whether this is one of the ISO A sizes.
    ///
    /// Some defaults (bleed, spacing) differ between ISO and US paper.
    pub fn is_iso(self) -> bool {
        matches!(self, PaperSize::A3 | PaperSize::A4)
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::Letter => "Letter",
            PaperSize::Tabloid => "Tabloid",
            PaperSize::Custom { .. } => "Custom",
        }
    }
}

impl FromStr for PaperSize {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a3" => Ok(PaperSize::A3),
            "a4" => Ok(PaperSize::A4),
            "letter" => Ok(PaperSize::Letter),
            "tabloid" => Ok(PaperSize::Tabloid),
            _ => Err(LayoutError::UnknownPaperSize(s.to_string())),
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction the sheet is fed through the printer for two-sided printing.
///
/// Decides how back pages are mirrored relative to front pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeedDirection {
    /// Backs swap rows and are turned 180°
    #[default]
    Portrait,
    /// Backs swap columns
    Landscape,
}

impl FromStr for FeedDirection {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(FeedDirection::Portrait),
            "landscape" => Ok(FeedDirection::Landscape),
            _ => Err(LayoutError::UnknownFeedDirection(s.to_string())),
        }
    }
}

impl fmt::Display for FeedDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedDirection::Portrait => f.write_str("portrait"),
            FeedDirection::Landscape => f.write_str("landscape"),
        }
    }
}

/// How card fronts and backs end up on paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrintMode {
    /// Front and back on the same page around a fold line
    #[default]
    Folded,
    /// Fronts on odd pages, mirrored backs on even pages
    TwoSided,
}

/// Output page description
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSpec {
    pub paper: PaperSize,
    pub orientation: Orientation,
    /// Margin on all four sides
    pub margin_mm: f32,
    /// Raster resolution used for card images
    pub dpi: f32,
    pub feed_direction: FeedDirection,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            orientation: Orientation::Landscape,
            margin_mm: DEFAULT_MARGIN_MM,
            dpi: DEFAULT_DPI,
            feed_direction: FeedDirection::Portrait,
        }
    }
}

impl PageSpec {
    /// Sheet (width, height) with orientation applied
    pub fn dimensions_mm(&self) -> (f32, f32) {
        self.paper.dimensions_with_orientation(self.orientation)
    }

    pub fn width_mm(&self) -> f32 {
        self.dimensions_mm().0
    }

    pub fn height_mm(&self) -> f32 {
        self.dimensions_mm().1
    }

    /// Width inside the margins
    pub fn printable_width_mm(&self) -> f32 {
        self.width_mm() - 2.0 * self.margin_mm
    }

    /// Height inside the margins
    pub fn printable_height_mm(&self) -> f32 {
        self.height_mm() - 2.0 * self.margin_mm
    }

    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.dimensions_mm();
        if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
            return Err(LayoutError::Config(format!(
                "Page dimensions must be positive, got {}x{} mm",
                w, h
            )));
        }
        if !(self.margin_mm >= 0.0 && self.margin_mm.is_finite()) {
            return Err(LayoutError::Config(format!(
                "Page margin must be non-negative, got {} mm",
                self.margin_mm
            )));
        }
        if self.margin_mm >= w.min(h) / 2.0 {
            return Err(LayoutError::Config(format!(
                "Page margin {} mm leaves no printable area on a {}x{} mm page",
                self.margin_mm, w, h
            )));
        }
        validate_dpi(self.dpi)
    }
}

/// Card geometry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardSpec {
    /// Trim width (without bleed)
    pub width_mm: f32,
    /// Trim height (without bleed)
    pub height_mm: f32,
    /// Bleed on each side
    pub bleed_mm: f32,
    /// Minimum gap between adjacent cards
    pub spacing_mm: f32,
    /// Gap between the fold line and the nearest card edge (fold printing)
    pub fold_distance_mm: f32,
}

impl Default for CardSpec {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_CARD_WIDTH_MM,
            height_mm: DEFAULT_CARD_HEIGHT_MM,
            bleed_mm: 3.0,
            spacing_mm: 1.0,
            fold_distance_mm: DEFAULT_FOLD_DISTANCE_MM,
        }
    }
}

impl CardSpec {
    /// Width including bleed on both sides
    pub fn total_width_mm(&self) -> f32 {
        self.width_mm + 2.0 * self.bleed_mm
    }

    /// Height including bleed on both sides
    pub fn total_height_mm(&self) -> f32 {
        self.height_mm + 2.0 * self.bleed_mm
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width_mm > 0.0
            && self.height_mm > 0.0
            && self.width_mm.is_finite()
            && self.height_mm.is_finite())
        {
            return Err(LayoutError::Config(format!(
                "Card dimensions must be positive, got {}x{} mm",
                self.width_mm, self.height_mm
            )));
        }
        for (name, value) in [
            ("bleed", self.bleed_mm),
            ("spacing", self.spacing_mm),
            ("fold distance", self.fold_distance_mm),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(LayoutError::Config(format!(
                    "Card {} must be a non-negative number, got {} mm",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_swaps_dimensions() {
        assert_eq!(
            PaperSize::A4.dimensions_with_orientation(Orientation::Landscape),
            (297.0, 210.0)
        );
        assert_eq!(
            PaperSize::A4.dimensions_with_orientation(Orientation::Portrait),
            (210.0, 297.0)
        );
    }

    #[test]
    fn test_custom_paper_normalizes_orientation() {
        let paper = PaperSize::Custom {
            width_mm: 300.0,
            height_mm: 100.0,
        };
        assert_eq!(
            paper.dimensions_with_orientation(Orientation::Portrait),
            (100.0, 300.0)
        );
    }

    #[test]
    fn test_parse_paper_size() {
        assert_eq!("A4".parse::<PaperSize>().unwrap(), PaperSize::A4);
        assert_eq!("letter".parse::<PaperSize>().unwrap(), PaperSize::Letter);
        assert!(matches!(
            "b5".parse::<PaperSize>(),
            Err(LayoutError::UnknownPaperSize(_))
        ));
    }

    #[test]
    fn test_parse_feed_direction() {
        assert_eq!(
            "Landscape".parse::<FeedDirection>().unwrap(),
            FeedDirection::Landscape
        );
        assert!("sideways".parse::<FeedDirection>().is_err());
    }

    #[test]
    fn test_margin_must_leave_printable_area() {
        let page = PageSpec {
            margin_mm: 105.0,
            ..Default::default()
        };
        assert!(page.validate().is_err());

        let page = PageSpec {
            margin_mm: 104.0,
            ..Default::default()
        };
        assert!(page.validate().is_ok());
    }

    #[test]
    fn test_card_validation() {
        assert!(CardSpec::default().validate().is_ok());

        let card = CardSpec {
            width_mm: 0.0,
            ..Default::default()
        };
        assert!(card.validate().is_err());

        let card = CardSpec {
            spacing_mm: -1.0,
            ..Default::default()
        };
        assert!(card.validate().is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let card = CardSpec {
            height_mm: f32::INFINITY,
            ..Default::default()
        };
        assert!(card.validate().is_err());

        let card = CardSpec {
            bleed_mm: f32::NAN,
            ..Default::default()
        };
        assert!(card.validate().is_err());

        let page = PageSpec {
            margin_mm: f32::INFINITY,
            ..Default::default()
        };
        assert!(page.validate().is_err());

        let page = PageSpec {
            paper: PaperSize::Custom {
                width_mm: f32::INFINITY,
                height_mm: 200.0,
            },
            ..Default::default()
        };
        assert!(page.validate().is_err());
    }

    #[test]
    fn test_dpi_range() {
        for dpi in [f32::INFINITY, f32::NAN, 1e9, 0.0, -300.0] {
            let page = PageSpec {
                dpi,
                ..Default::default()
            };
            assert!(
                matches!(page.validate(), Err(LayoutError::Config(_))),
                "{} dpi accepted",
                dpi
            );
        }
        assert!(validate_dpi(MAX_DPI).is_ok());
        assert!(validate_dpi(300.0).is_ok());
    }

    #[test]
    fn test_total_size_includes_bleed() {
        let card = CardSpec::default();
        assert_eq!(card.total_width_mm(), 67.5);
        assert_eq!(card.total_height_mm(), 94.0);
    }
}
