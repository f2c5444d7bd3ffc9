//! Image file I/O

use crate::card::CardImage;
use crate::types::{ImageError, Result};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Resolution assumed for image files, which rarely carry a usable one
pub const DEFAULT_IMAGE_DPI: f32 = 300.0;

/// Load an image file, taking its physical size from `dpi`
pub async fn load_image(path: impl AsRef<Path>, dpi: f32) -> Result<CardImage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;

    let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await?;
    let decoded = decoded.map_err(|_| ImageError::NotAnImage(path.clone()))?;

    log::debug!(
        "loaded {} ({}x{} px)",
        path.display(),
        decoded.width(),
        decoded.height()
    );
    CardImage::from_dynamic(decoded, dpi)
}

/// Save an image; the format follows the file extension
pub async fn save_image(image: &CardImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let format = ImageFormat::from_path(&path)?;
    // JPEG has no alpha channel
    let dynamic = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb_on_white()),
        _ => DynamicImage::ImageRgba8(image.pixels().clone()),
    };

    let bytes = tokio::task::spawn_blocking(move || {
        let mut buffer = Cursor::new(Vec::new());
        dynamic.write_to(&mut buffer, format)?;
        Ok::<_, ImageError>(buffer.into_inner())
    })
    .await??;

    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

/// Whether the file name has an extension of a readable image format
pub fn has_image_extension(path: &Path) -> bool {
    ImageFormat::from_path(path)
        .map(|format| format.reading_enabled())
        .unwrap_or(false)
}

/// Check that a file decodes as an image (header only)
pub async fn is_valid_image(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || image::image_dimensions(&path).is_ok())
        .await
        .unwrap_or(false)
}

/// Expand a list of files and directories into image files.
///
/// Directories contribute every image file directly inside them, sorted by
/// name. Explicitly named files must be images, otherwise the whole call
/// fails.
pub async fn collect_image_paths(inputs: &[impl AsRef<Path>]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        let metadata = tokio::fs::metadata(input).await?;

        if metadata.is_dir() {
            let mut found = Vec::new();
            let mut entries = tokio::fs::read_dir(input).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_file()
                    && has_image_extension(&path)
                    && is_valid_image(&path).await
                {
                    found.push(path);
                }
            }
            found.sort();
            log::debug!("{} images in {}", found.len(), input.display());
            paths.extend(found);
        } else {
            if !is_valid_image(input).await {
                return Err(ImageError::NotAnImage(input.to_owned()));
            }
            paths.push(input.to_owned());
        }
    }

    Ok(paths)
}
