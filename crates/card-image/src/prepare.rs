use crate::card::CardImage;
use crate::transform::ImageTransform;
use crate::types::{ImageError, Result};
use card_layout::{CardSpec, mm_to_px, validate_dpi};

/// Turn a loaded image into a card face ready for placement.
///
/// The image is assumed to show the card's trim area plus
/// `existing_bleed_mm` on every side. After the optional transform, bleed
/// is added or cropped to reach `card.bleed_mm`, and the pixels are scaled
/// to the card's total size at `dpi`.
pub fn prepare_card(
    image: CardImage,
    card: &CardSpec,
    dpi: f32,
    existing_bleed_mm: f32,
    transform: Option<&dyn ImageTransform>,
) -> Result<CardImage> {
    if !(existing_bleed_mm >= 0.0) {
        return Err(ImageError::InvalidBleed(format!(
            "bleed included in image must be non-negative, got {} mm",
            existing_bleed_mm
        )));
    }

    validate_dpi(dpi)?;
    card.validate()?;

    let mut img = match transform {
        Some(transform) => transform.apply(image),
        None => image,
    };

    img.set_size_mm(
        card.width_mm + 2.0 * existing_bleed_mm,
        card.height_mm + 2.0 * existing_bleed_mm,
    );

    let delta = card.bleed_mm - existing_bleed_mm;
    if delta > 0.0 {
        img = img.add_bleed(delta)?;
    } else if delta < 0.0 {
        img = img.crop_bleed(-delta)?;
    }

    let width_px = mm_to_px(card.total_width_mm(), dpi);
    let height_px = mm_to_px(card.total_height_mm(), dpi);
    let mut img = img.resized(width_px, height_px)?;
    img.set_size_mm(card.total_width_mm(), card.total_height_mm());
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::AspectRotation;
    use image::RgbaImage;

    fn card() -> CardSpec {
        CardSpec {
            width_mm: 63.5,
            height_mm: 88.9,
            bleed_mm: 3.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_prepared_size_matches_dpi() {
        let img = CardImage::new(RgbaImage::new(250, 350), 63.5, 88.9).unwrap();
        let out = prepare_card(img, &card(), 300.0, 0.0, None).unwrap();

        // 69.5mm and 94.9mm at 300dpi
        assert_eq!(out.width_px(), 820);
        assert_eq!(out.height_px(), 1120);
        assert_eq!(out.width_mm(), 69.5);
    }

    #[test]
    fn test_existing_bleed_is_cropped() {
        let img = CardImage::new(RgbaImage::new(300, 400), 1.0, 1.0).unwrap();
        let spec = CardSpec {
            bleed_mm: 0.0,
            ..card()
        };
        let out = prepare_card(img, &spec, 300.0, 3.0, None).unwrap();
        assert_eq!(out.width_mm(), 63.5);
        assert_eq!(out.width_px(), 750);
    }

    #[test]
    fn test_transform_runs_first() {
        // Landscape source becomes portrait before sizing
        let img = CardImage::new(RgbaImage::new(400, 300), 88.9, 63.5).unwrap();
        let rotation = AspectRotation::default();
        let out = prepare_card(img, &card(), 300.0, 3.0, Some(&rotation)).unwrap();
        assert!(out.height_px() > out.width_px());
    }

    #[test]
    fn test_huge_dpi_rejected() {
        let img = CardImage::new(RgbaImage::new(10, 10), 1.0, 1.0).unwrap();
        assert!(matches!(
            prepare_card(img, &card(), 1e9, 0.0, None),
            Err(ImageError::Layout(_))
        ));
    }

    #[test]
    fn test_negative_existing_bleed() {
        let img = CardImage::new(RgbaImage::new(10, 10), 1.0, 1.0).unwrap();
        assert!(prepare_card(img, &card(), 300.0, -1.0, None).is_err());
    }
}
