//! Raster operations on card images: bleed, rotation, sizing and file I/O.

mod card;
mod io;
mod prepare;
mod transform;
mod types;

pub use card::CardImage;
pub use image::RgbaImage;
pub use io::{
    DEFAULT_IMAGE_DPI, collect_image_paths, has_image_extension, is_valid_image, load_image,
    save_image,
};
pub use prepare::prepare_card;
pub use transform::{AspectRotation, ImageTransform, RotateDirection, Rotation};
pub use types::*;
