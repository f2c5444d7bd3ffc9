use crate::ConfArgs;
use anyhow::{Context, Result};
use card_config::ConfigFile;
use card_image::{AspectRotation, CardImage, DEFAULT_IMAGE_DPI, ImageTransform, RotateDirection};
use card_layout::{CardSpec, Orientation};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Log to stderr. `RUST_LOG` overrides the level chosen here.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

impl ConfArgs {
    fn enabled(&self) -> bool {
        self.conf || self.config.is_some() || self.game.is_some() || self.profile.is_some()
    }

    pub fn path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(card_config::config_path(self.game.as_deref())?),
        }
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// The config file, or an empty one when config is not in use
    pub async fn load(&self) -> Result<ConfigFile> {
        if !self.enabled() {
            return Ok(ConfigFile::default());
        }
        let path = self.path()?;
        ConfigFile::load(&path)
            .await
            .with_context(|| format!("Failed to load config file {}", path.display()))
    }
}

pub async fn read_stdin() -> Result<String> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read stdin")?;
    Ok(text)
}

/// Rotation that turns images to the card's own aspect
pub fn card_aspect_rotation(card: &CardSpec, direction: RotateDirection) -> AspectRotation {
    let aspect = if card.width_mm > card.height_mm {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    };
    AspectRotation {
        aspect,
        direction,
        physical: true,
    }
}

/// Load an image file and prepare it as a card face
pub async fn load_face(
    path: &Path,
    card: &CardSpec,
    dpi: f32,
    existing_bleed_mm: f32,
    rotation: Option<AspectRotation>,
) -> Result<CardImage> {
    let image = card_image::load_image(path, DEFAULT_IMAGE_DPI)
        .await
        .with_context(|| format!("Failed to load image {}", path.display()))?;

    let card = *card;
    let face = tokio::task::spawn_blocking(move || {
        let transform = rotation.as_ref().map(|r| r as &dyn ImageTransform);
        card_image::prepare_card(image, &card, dpi, existing_bleed_mm, transform)
    })
    .await?
    .with_context(|| format!("Failed to prepare card image {}", path.display()))?;

    Ok(face)
}

/// Expand image arguments (files or directories)
pub async fn collect_images(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    card_image::collect_image_paths(inputs)
        .await
        .context("Failed to collect card images")
}
