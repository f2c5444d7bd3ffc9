//! Image transforms applied to cards before layout

use crate::card::CardImage;
use card_layout::Orientation;
use std::fmt;
use std::str::FromStr;

/// Direction for quarter-turn rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotateDirection {
    Clockwise,
    #[default]
    Anticlockwise,
}

impl FromStr for RotateDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clockwise" => Ok(RotateDirection::Clockwise),
            "anticlockwise" => Ok(RotateDirection::Anticlockwise),
            _ => Err(format!("Illegal rotate direction: {}", s)),
        }
    }
}

impl fmt::Display for RotateDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotateDirection::Clockwise => f.write_str("clockwise"),
            RotateDirection::Anticlockwise => f.write_str("anticlockwise"),
        }
    }
}

/// A transform from one card image to another
pub trait ImageTransform {
    fn apply(&self, image: CardImage) -> CardImage;
}

/// Quarter turn in a fixed direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation(pub RotateDirection);

impl ImageTransform for Rotation {
    fn apply(&self, image: CardImage) -> CardImage {
        match self.0 {
            RotateDirection::Clockwise => image.rotate_clockwise(),
            RotateDirection::Anticlockwise => image.rotate_anticlockwise(),
        }
    }
}

/// Rotates an image whose aspect does not match the target aspect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRotation {
    pub aspect: Orientation,
    pub direction: RotateDirection,
    /// Compare physical size (mm) rather than pixel counts
    pub physical: bool,
}

impl Default for AspectRotation {
    fn default() -> Self {
        Self {
            aspect: Orientation::Portrait,
            direction: RotateDirection::Anticlockwise,
            physical: true,
        }
    }
}

impl AspectRotation {
    /// Whether `image` has the wrong aspect. Square images never rotate.
    pub fn needs_rotation(&self, image: &CardImage) -> bool {
        let (w, h) = if self.physical {
            (image.width_mm(), image.height_mm())
        } else {
            (image.width_px() as f32, image.height_px() as f32)
        };
        match self.aspect {
            Orientation::Portrait => w > h,
            Orientation::Landscape => h > w,
        }
    }
}

impl ImageTransform for AspectRotation {
    fn apply(&self, image: CardImage) -> CardImage {
        if self.needs_rotation(&image) {
            log::debug!("rotating {} to {:?} aspect", self.direction, self.aspect);
            Rotation(self.direction).apply(image)
        } else {
            image
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn image(w_px: u32, h_px: u32, w_mm: f32, h_mm: f32) -> CardImage {
        CardImage::new(RgbaImage::new(w_px, h_px), w_mm, h_mm).unwrap()
    }

    #[test]
    fn test_landscape_image_rotated_to_portrait() {
        let rotation = AspectRotation::default();
        let out = rotation.apply(image(300, 200, 88.0, 63.0));
        assert_eq!((out.width_px(), out.height_px()), (200, 300));
        assert_eq!(out.width_mm(), 63.0);
    }

    #[test]
    fn test_matching_aspect_untouched() {
        let rotation = AspectRotation::default();
        let img = image(200, 300, 63.0, 88.0);
        assert_eq!(rotation.apply(img.clone()), img);
    }

    #[test]
    fn test_physical_vs_pixel_aspect() {
        // Pixels say landscape, physical size says portrait
        let img = image(300, 200, 50.0, 90.0);

        let physical = AspectRotation::default();
        assert!(!physical.needs_rotation(&img));

        let pixels = AspectRotation {
            physical: false,
            ..Default::default()
        };
        assert!(pixels.needs_rotation(&img));
    }

    #[test]
    fn test_to_landscape() {
        let rotation = AspectRotation {
            aspect: Orientation::Landscape,
            direction: RotateDirection::Clockwise,
            physical: true,
        };
        assert!(rotation.needs_rotation(&image(200, 300, 63.0, 88.0)));
        assert!(!rotation.needs_rotation(&image(300, 300, 60.0, 60.0)));
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(
            "Clockwise".parse::<RotateDirection>().unwrap(),
            RotateDirection::Clockwise
        );
        assert!("widdershins".parse::<RotateDirection>().is_err());
    }
}
