//! Card sheet assembly and PDF rendering

use crate::constants::DOCUMENT_TITLE;
use crate::marks::{PageFrame, blank_card_ops, guide_ops};
use crate::types::{FaceId, PdfOptions, Result, SheetError};
use card_image::CardImage;
use card_layout::{
    LayoutStatistics, Placement, PrintMode, calculate_statistics, create_fold_layout, create_grid,
    fold_cut_guides, grid_cut_guides, place_duplex, place_folded,
};
use image::{RgbImage, imageops};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, RawImage, RawImageData, RawImageFormat,
    XObjectId, XObjectTransform,
};
use std::collections::HashMap;

/// One card: the faces drawn on its front and back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardEntry {
    pub front: Option<FaceId>,
    pub back: Option<FaceId>,
}

/// A batch of cards to lay out and render into one PDF.
///
/// Face images are registered once with [`CardSheet::add_face`] and can be
/// shared between any number of cards (a common back, typically). They are
/// kept flattened onto white, ready for embedding.
#[derive(Debug, Clone)]
pub struct CardSheet {
    options: PdfOptions,
    faces: Vec<RgbImage>,
    cards: Vec<CardEntry>,
    cards_per_sheet: usize,
}

impl CardSheet {
    /// Create an empty sheet. Fails if the card does not fit the page.
    pub fn new(options: PdfOptions) -> Result<Self> {
        options.validate()?;
        let stats = calculate_statistics(&options.page, &options.card, options.mode, 0)?;
        log::debug!(
            "{:?} sheet with {} cards per sheet",
            options.mode,
            stats.cards_per_sheet
        );

        Ok(Self {
            options,
            faces: Vec::new(),
            cards: Vec::new(),
            cards_per_sheet: stats.cards_per_sheet,
        })
    }

    pub fn options(&self) -> &PdfOptions {
        &self.options
    }

    pub fn cards_per_sheet(&self) -> usize {
        self.cards_per_sheet
    }

    pub fn cards(&self) -> &[CardEntry] {
        &self.cards
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Register a prepared face image. Transparent pixels become white.
    pub fn add_face(&mut self, image: CardImage) -> FaceId {
        self.faces.push(image.to_rgb_on_white());
        FaceId(self.faces.len() - 1)
    }

    /// Pixel size of a registered face
    pub fn face_size(&self, id: FaceId) -> Option<(u32, u32)> {
        self.faces.get(id.0).map(|face| face.dimensions())
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Add a card. A missing side is drawn as an empty outline.
    pub fn add_card(&mut self, front: Option<FaceId>, back: Option<FaceId>) -> Result<()> {
        for id in [front, back].into_iter().flatten() {
            if id.0 >= self.faces.len() {
                return Err(SheetError::UnknownFace(id.0));
            }
        }
        self.cards.push(CardEntry { front, back });
        Ok(())
    }

    /// Statistics for the cards added so far, counting only the pages that
    /// will actually be rendered
    pub fn statistics(&self) -> Result<LayoutStatistics> {
        let options = &self.options;
        let mut stats =
            calculate_statistics(&options.page, &options.card, options.mode, self.cards.len())?;
        stats.output_pages = stats.sheets * options.pages_per_sheet();
        Ok(stats)
    }

    /// Render all cards into PDF bytes.
    ///
    /// Consumes the sheet so that each face can be freed once the last card
    /// using it has been drawn.
    pub fn render(self) -> Result<Vec<u8>> {
        if self.cards.is_empty() {
            return Err(SheetError::Config("No cards to render".to_string()));
        }

        let mut renderer = Renderer::new(self);
        let pages = match renderer.options.mode {
            PrintMode::Folded => renderer.folded_pages()?,
            PrintMode::TwoSided => renderer.duplex_pages()?,
        };
        log::info!(
            "rendered {} cards on {} pages ({} images embedded)",
            renderer.cards.len(),
            pages.len(),
            renderer.images.len()
        );

        let mut doc = renderer.doc;
        doc.pages = pages;

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("{} warnings while writing PDF", warnings.len());
        }
        Ok(bytes)
    }
}

// =============================================================================
// Rendering
// =============================================================================

struct Renderer {
    options: PdfOptions,
    cards: Vec<CardEntry>,
    /// Face pixels, taken out once no remaining card needs them
    faces: Vec<Option<RgbImage>>,
    /// Index of the last card using each face
    last_use: Vec<Option<usize>>,
    doc: PdfDocument,
    /// Embedded images keyed by face and whether it is turned 180°
    images: HashMap<(FaceId, bool), XObjectId>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Front,
    Back,
}

impl Renderer {
    fn new(sheet: CardSheet) -> Self {
        let mut last_use = vec![None; sheet.faces.len()];
        for (index, entry) in sheet.cards.iter().enumerate() {
            for face in [entry.front, entry.back].into_iter().flatten() {
                last_use[face.0] = Some(index);
            }
        }

        Self {
            options: sheet.options,
            cards: sheet.cards,
            faces: sheet.faces.into_iter().map(Some).collect(),
            last_use,
            doc: PdfDocument::new(DOCUMENT_TITLE),
            images: HashMap::new(),
        }
    }

    fn new_page(&self, ops: Vec<Op>) -> PdfPage {
        let page = &self.options.page;
        PdfPage::new(Mm(page.width_mm()), Mm(page.height_mm()), ops)
    }

    /// One page per sheet: fronts above the fold line, backs below it
    fn folded_pages(&mut self) -> Result<Vec<PdfPage>> {
        let options = self.options.clone();
        let layout = create_fold_layout(&options.page, &options.card)?;
        let guides = fold_cut_guides(&layout, &options.card);
        let frame = PageFrame::new(&options.page);
        let placements = place_folded(&layout, self.cards.len());

        let mut pages = Vec::new();
        for chunk in placements.chunks(layout.cols) {
            let mut ops = guide_ops(&guides, &options.page, &frame);
            for placement in chunk {
                if options.fronts {
                    ops.extend(self.card_ops(Side::Front, &placement.front, &frame));
                }
                if options.backs {
                    ops.extend(self.card_ops(Side::Back, &placement.back, &frame));
                }
            }
            pages.push(self.new_page(ops));
            if let Some(last) = chunk.last() {
                self.release_faces(last.front.card);
            }
        }
        Ok(pages)
    }

    /// A front page and a back page per sheet, either of which may be left out
    fn duplex_pages(&mut self) -> Result<Vec<PdfPage>> {
        let options = self.options.clone();
        let grid = create_grid(&options.page, &options.card)?;
        let guides = grid_cut_guides(&grid, &options.card);
        let front_frame = PageFrame::new(&options.page);
        let back_frame = front_frame.shifted(options.back_offset_x_mm, options.back_offset_y_mm);
        let placements = place_duplex(&grid, options.page.feed_direction, self.cards.len());

        let mut pages = Vec::new();
        for chunk in placements.chunks(grid.cell_count()) {
            if options.fronts {
                let mut ops = guide_ops(&guides, &options.page, &front_frame);
                for placement in chunk {
                    ops.extend(self.card_ops(Side::Front, &placement.front, &front_frame));
                }
                pages.push(self.new_page(ops));
            }
            if options.backs {
                let mut ops = guide_ops(&guides, &options.page, &back_frame);
                for placement in chunk {
                    ops.extend(self.card_ops(Side::Back, &placement.back, &back_frame));
                }
                pages.push(self.new_page(ops));
            }
            if let Some(last) = chunk.last() {
                self.release_faces(last.front.card);
            }
        }
        Ok(pages)
    }

    /// Free the pixels of faces no card after `drawn` uses
    fn release_faces(&mut self, drawn: usize) {
        for (face, last_use) in self.faces.iter_mut().zip(&self.last_use) {
            if face.is_some() && last_use.is_none_or(|last| last <= drawn) {
                *face = None;
            }
        }
    }

    fn card_ops(&mut self, side: Side, placement: &Placement, frame: &PageFrame) -> Vec<Op> {
        let entry = self.cards[placement.card];
        let face = match side {
            Side::Front => entry.front,
            Side::Back => entry.back,
        };

        let Some(face) = face else {
            return blank_card_ops(&placement.rect, frame);
        };
        let Some((id, (width_px, height_px))) = self.embed(face, placement.rotated) else {
            return blank_card_ops(&placement.rect, frame);
        };

        // Scale the pixels onto the card's rectangle
        let dpi = width_px as f32 * 25.4 / placement.rect.width;
        let natural_height_mm = height_px as f32 * 25.4 / dpi;
        let scale_y = placement.rect.height / natural_height_mm;
        let (x, y) = frame.origin(&placement.rect);

        vec![Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(x),
                translate_y: Some(y),
                dpi: Some(dpi),
                scale_y: if (scale_y - 1.0).abs() > 1e-4 {
                    Some(scale_y)
                } else {
                    None
                },
                ..Default::default()
            },
        }]
    }

    /// Embed a face once per orientation, returning its handle and pixel
    /// size. `None` for a face that is unknown or already released.
    fn embed(&mut self, face: FaceId, rotated: bool) -> Option<(XObjectId, (u32, u32))> {
        let pixels = self.faces.get(face.0)?.as_ref()?;
        let size = pixels.dimensions();
        if let Some(id) = self.images.get(&(face, rotated)) {
            return Some((id.clone(), size));
        }

        let raw = if rotated {
            raw_image(imageops::rotate180(pixels))
        } else {
            raw_image(pixels.clone())
        };
        let id = self.doc.add_image(&raw);
        self.images.insert((face, rotated), id.clone());
        Some((id, size))
    }
}

fn raw_image(rgb: RgbImage) -> RawImage {
    RawImage {
        width: rgb.width() as usize,
        height: rgb.height() as usize,
        pixels: RawImageData::U8(rgb.into_raw()),
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    }
}
