use card_layout::{CardSpec, PageSpec, PrintMode};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error(transparent)]
    Layout(#[from] card_layout::LayoutError),

    #[error(transparent)]
    Image(#[from] card_image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown card face: {0}")]
    UnknownFace(usize),

    #[error("Output file already exists: \"{}\" (use overwrite to replace it)", .0.display())]
    OutputExists(PathBuf),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// Handle to a face image registered with a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub(crate) usize);

impl FaceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Options for generating a print sheet PDF
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PdfOptions {
    pub page: PageSpec,
    pub card: CardSpec,
    pub mode: PrintMode,
    /// Draw card fronts
    pub fronts: bool,
    /// Draw card backs
    pub backs: bool,
    /// Horizontal shift of back pages (two-sided only, mm, positive is right)
    pub back_offset_x_mm: f32,
    /// Vertical shift of back pages (two-sided only, mm, positive is down)
    pub back_offset_y_mm: f32,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page: PageSpec::default(),
            card: CardSpec::default(),
            mode: PrintMode::default(),
            fronts: true,
            backs: true,
            back_offset_x_mm: 0.0,
            back_offset_y_mm: 0.0,
        }
    }
}

impl PdfOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.fronts && !self.backs {
            return Err(SheetError::Config(
                "Cannot exclude both fronts and backs".to_string(),
            ));
        }
        if !self.back_offset_x_mm.is_finite() || !self.back_offset_y_mm.is_finite() {
            return Err(SheetError::Config(
                "Back page offsets must be finite".to_string(),
            ));
        }
        self.page.validate()?;
        self.card.validate()?;
        Ok(())
    }

    /// Output pages printed per physical sheet
    pub fn pages_per_sheet(&self) -> usize {
        match self.mode {
            PrintMode::Folded => 1,
            PrintMode::TwoSided => usize::from(self.fronts) + usize::from(self.backs),
        }
    }
}
