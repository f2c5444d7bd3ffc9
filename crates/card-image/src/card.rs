//! Card images with a physical size
//!
//! Pixels alone do not say how large a card is on paper, so every image
//! carries its width and height in millimeters. Bleed amounts are given in
//! millimeters and converted to pixels from that ratio.

use crate::types::{ImageError, Result};
use card_layout::{px_to_mm, validate_dpi};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage, RgbaImage};

#[derive(Debug, Clone, PartialEq)]
pub struct CardImage {
    pixels: RgbaImage,
    width_mm: f32,
    height_mm: f32,
}

/// Pixels covering `bleed_mm` on one side of an image that is `size_mm`
/// wide once the bleed is included on both sides.
fn bleed_px(size_px: u32, size_mm: f32, bleed_mm: f32) -> u32 {
    let relative = bleed_mm / (size_mm + 2.0 * bleed_mm);
    (size_px as f32 * relative) as u32
}

fn check_bleed(bleed_mm: f32) -> Result<()> {
    if !(bleed_mm >= 0.0) {
        return Err(ImageError::InvalidBleed(format!(
            "bleed must be non-negative, got {} mm",
            bleed_mm
        )));
    }
    Ok(())
}

impl CardImage {
    /// Wrap pixels with an explicit physical size
    pub fn new(pixels: RgbaImage, width_mm: f32, height_mm: f32) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(ImageError::Empty);
        }
        Ok(Self {
            pixels,
            width_mm,
            height_mm,
        })
    }

    /// Wrap a decoded image, deriving its physical size from `dpi`
    pub fn from_dynamic(image: DynamicImage, dpi: f32) -> Result<Self> {
        validate_dpi(dpi)?;
        let pixels = image.into_rgba8();
        let width_mm = px_to_mm(pixels.width(), dpi);
        let height_mm = px_to_mm(pixels.height(), dpi);
        Self::new(pixels, width_mm, height_mm)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    pub fn width_px(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height_px(&self) -> u32 {
        self.pixels.height()
    }

    pub fn width_mm(&self) -> f32 {
        self.width_mm
    }

    pub fn height_mm(&self) -> f32 {
        self.height_mm
    }

    /// Change the physical size without touching the pixels
    pub fn set_size_mm(&mut self, width_mm: f32, height_mm: f32) {
        self.width_mm = width_mm;
        self.height_mm = height_mm;
    }

    /// Add bleed by extending the outermost pixels outwards.
    ///
    /// Edge rows and columns are repeated into the new border; corners take
    /// the colour of the nearest corner pixel. The physical size grows by
    /// `2 * bleed_mm` in both directions.
    pub fn add_bleed(&self, bleed_mm: f32) -> Result<CardImage> {
        check_bleed(bleed_mm)?;
        if bleed_mm == 0.0 {
            return Ok(self.clone());
        }

        let (w, h) = self.pixels.dimensions();
        let bw = bleed_px(w, self.width_mm, bleed_mm);
        let bh = bleed_px(h, self.height_mm, bleed_mm);

        let src = &self.pixels;
        let pixels = ImageBuffer::from_fn(w + 2 * bw, h + 2 * bh, |x, y| {
            let sx = x.saturating_sub(bw).min(w - 1);
            let sy = y.saturating_sub(bh).min(h - 1);
            *src.get_pixel(sx, sy)
        });

        log::debug!(
            "added {} mm bleed: {}x{} px -> {}x{} px",
            bleed_mm,
            w,
            h,
            pixels.width(),
            pixels.height()
        );

        Ok(CardImage {
            pixels,
            width_mm: self.width_mm + 2.0 * bleed_mm,
            height_mm: self.height_mm + 2.0 * bleed_mm,
        })
    }

    /// Remove `bleed_mm` from every side.
    ///
    /// Pixel amounts use the same relative formula as [`add_bleed`], so
    /// cropping what was added restores the original pixel size.
    ///
    /// [`add_bleed`]: CardImage::add_bleed
    pub fn crop_bleed(&self, bleed_mm: f32) -> Result<CardImage> {
        check_bleed(bleed_mm)?;
        if bleed_mm == 0.0 {
            return Ok(self.clone());
        }

        let (w, h) = self.pixels.dimensions();
        let inner_w_mm = self.width_mm - 2.0 * bleed_mm;
        let inner_h_mm = self.height_mm - 2.0 * bleed_mm;
        if inner_w_mm <= 0.0 || inner_h_mm <= 0.0 {
            return Err(ImageError::InvalidBleed(format!(
                "cannot crop {} mm from a {:.1}x{:.1} mm image",
                bleed_mm, self.width_mm, self.height_mm
            )));
        }

        let bw = bleed_px(w, self.width_mm, bleed_mm);
        let bh = bleed_px(h, self.height_mm, bleed_mm);
        if bw == 0 && bh == 0 {
            return Ok(self.clone());
        }
        if 2 * bw >= w || 2 * bh >= h {
            return Err(ImageError::Empty);
        }

        let pixels = imageops::crop_imm(&self.pixels, bw, bh, w - 2 * bw, h - 2 * bh).to_image();

        Ok(CardImage {
            pixels,
            width_mm: inner_w_mm,
            height_mm: inner_h_mm,
        })
    }

    /// Drop the alpha channel by compositing onto a white background
    pub fn to_rgb_on_white(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width_px(), self.height_px(), |x, y| {
            let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
            let blend = |c: u8| ((c as u16 * a as u16 + 255 * (255 - a as u16) + 127) / 255) as u8;
            Rgb([blend(r), blend(g), blend(b)])
        })
    }

    /// Rotate 90° clockwise
    pub fn rotate_clockwise(&self) -> CardImage {
        CardImage {
            pixels: imageops::rotate90(&self.pixels),
            width_mm: self.height_mm,
            height_mm: self.width_mm,
        }
    }

    /// Rotate 90° anticlockwise
    pub fn rotate_anticlockwise(&self) -> CardImage {
        CardImage {
            pixels: imageops::rotate270(&self.pixels),
            width_mm: self.height_mm,
            height_mm: self.width_mm,
        }
    }

    /// Rotate 180°
    pub fn rotate_half(&self) -> CardImage {
        CardImage {
            pixels: imageops::rotate180(&self.pixels),
            width_mm: self.width_mm,
            height_mm: self.height_mm,
        }
    }

    /// Scale the pixels to exactly `width_px` x `height_px`.
    ///
    /// The physical size is kept.
    pub fn resized(&self, width_px: u32, height_px: u32) -> Result<CardImage> {
        if width_px == 0 || height_px == 0 {
            return Err(ImageError::Empty);
        }
        if self.pixels.dimensions() == (width_px, height_px) {
            return Ok(self.clone());
        }
        Ok(CardImage {
            pixels: imageops::resize(&self.pixels, width_px, height_px, FilterType::CatmullRom),
            width_mm: self.width_mm,
            height_mm: self.height_mm,
        })
    }
}
