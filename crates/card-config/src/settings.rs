//! Resolved settings for a run
//!
//! Each value comes from the first of: command line, profile, default
//! section, built-in default.

use crate::file::ConfigFile;
use crate::properties::Property;
use crate::types::{ConfigError, Result};
use card_layout::constants::{
    DEFAULT_CARD_HEIGHT_MM, DEFAULT_CARD_WIDTH_MM, DEFAULT_DPI, DEFAULT_FOLD_DISTANCE_MM,
    DEFAULT_MARGIN_MM,
};
use card_layout::{CardSpec, FeedDirection, Orientation, PageSpec, PaperSize, PrintMode};
use serde::{Serialize, Serializer};
use std::fmt::Display;
use std::path::PathBuf;

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub paper: Option<PaperSize>,
    pub margin_mm: Option<f32>,
    pub feed_direction: Option<FeedDirection>,
    pub dpi: Option<f32>,
    pub card_width_mm: Option<f32>,
    pub card_height_mm: Option<f32>,
    pub bleed_mm: Option<f32>,
    pub spacing_mm: Option<f32>,
    pub fold_distance_mm: Option<f32>,
    pub two_sided: Option<bool>,
    pub verbose: Option<bool>,
    pub overwrite: Option<bool>,
    pub append: Option<bool>,
    pub back_image: Option<PathBuf>,
    pub back_bleed_mm: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    #[serde(rename = "pagesize", serialize_with = "lowercase")]
    pub paper: PaperSize,
    #[serde(rename = "page_margin_mm")]
    pub margin_mm: f32,
    #[serde(rename = "feed_dir", serialize_with = "lowercase")]
    pub feed_direction: FeedDirection,
    #[serde(rename = "page_dpi")]
    pub dpi: f32,
    pub card_width_mm: f32,
    pub card_height_mm: f32,
    #[serde(rename = "card_bleed_mm")]
    pub bleed_mm: f32,
    #[serde(rename = "card_min_spacing_mm")]
    pub spacing_mm: f32,
    #[serde(rename = "card_fold_distance_mm")]
    pub fold_distance_mm: f32,
    #[serde(rename = "twosided")]
    pub two_sided: bool,
    pub verbose: bool,
    pub overwrite: bool,
    pub append: bool,
    #[serde(rename = "backside_image_file", skip_serializing_if = "Option::is_none")]
    pub back_image: Option<PathBuf>,
    #[serde(rename = "backside_bleed_mm", skip_serializing_if = "is_zero")]
    pub back_bleed_mm: f32,
}

fn lowercase<T: Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string().to_ascii_lowercase())
}

fn is_zero(value: &f32) -> bool {
    *value == 0.0
}

/// Bleed used when nothing is configured. Letter-family paper has less room.
pub fn default_bleed_mm(paper: PaperSize) -> f32 {
    if paper.is_iso() { 3.0 } else { 1.5 }
}

pub fn default_spacing_mm(paper: PaperSize) -> f32 {
    if paper.is_iso() { 1.0 } else { 0.0 }
}

impl Default for Settings {
    fn default() -> Self {
        let paper = PaperSize::A4;
        Self {
            paper,
            margin_mm: DEFAULT_MARGIN_MM,
            feed_direction: FeedDirection::Portrait,
            dpi: DEFAULT_DPI,
            card_width_mm: DEFAULT_CARD_WIDTH_MM,
            card_height_mm: DEFAULT_CARD_HEIGHT_MM,
            bleed_mm: default_bleed_mm(paper),
            spacing_mm: default_spacing_mm(paper),
            fold_distance_mm: DEFAULT_FOLD_DISTANCE_MM,
            two_sided: false,
            verbose: false,
            overwrite: false,
            append: false,
            back_image: None,
            back_bleed_mm: 0.0,
        }
    }
}

impl Settings {
    /// Resolve settings from the command line, a config file and an optional
    /// profile. Naming a profile the file does not have is an error.
    pub fn resolve(
        overrides: &SettingsOverrides,
        config: &ConfigFile,
        profile: Option<&str>,
    ) -> Result<Self> {
        if let Some(name) = profile {
            if !config.has_profile(name) {
                return Err(ConfigError::UnknownProfile(name.to_string()));
            }
        }

        let num = |value: Option<f32>, property: Property| -> Result<Option<f32>> {
            match value {
                Some(v) => Ok(Some(v)),
                None => config.get_f32(profile, property),
            }
        };
        let flag = |value: Option<bool>, property: Property| -> Result<bool> {
            match value {
                Some(v) => Ok(v),
                None => Ok(config.get_bool(profile, property)?.unwrap_or(false)),
            }
        };

        let paper = match overrides.paper {
            Some(paper) => paper,
            None => match config.get_str(profile, Property::PageSize)? {
                Some(name) => name.parse()?,
                None => PaperSize::A4,
            },
        };
        let feed_direction = match overrides.feed_direction {
            Some(feed) => feed,
            None => match config.get_str(profile, Property::FeedDir)? {
                Some(name) => name.parse()?,
                None => FeedDirection::Portrait,
            },
        };

        // Profile-only properties are never read from the default section
        let (back_image, back_bleed) = match profile {
            Some(_) => (
                config.get_path(profile, Property::BacksideImageFile)?,
                config.get_f32(profile, Property::BacksideBleed)?,
            ),
            None => (None, None),
        };

        let settings = Self {
            paper,
            margin_mm: num(overrides.margin_mm, Property::PageMargin)?
                .unwrap_or(DEFAULT_MARGIN_MM),
            feed_direction,
            dpi: num(overrides.dpi, Property::PageDpi)?.unwrap_or(DEFAULT_DPI),
            card_width_mm: num(overrides.card_width_mm, Property::CardWidth)?
                .unwrap_or(DEFAULT_CARD_WIDTH_MM),
            card_height_mm: num(overrides.card_height_mm, Property::CardHeight)?
                .unwrap_or(DEFAULT_CARD_HEIGHT_MM),
            bleed_mm: num(overrides.bleed_mm, Property::CardBleed)?
                .unwrap_or_else(|| default_bleed_mm(paper)),
            spacing_mm: num(overrides.spacing_mm, Property::CardMinSpacing)?
                .unwrap_or_else(|| default_spacing_mm(paper)),
            fold_distance_mm: num(overrides.fold_distance_mm, Property::CardFoldDistance)?
                .unwrap_or(DEFAULT_FOLD_DISTANCE_MM),
            two_sided: flag(overrides.two_sided, Property::TwoSided)?,
            verbose: flag(overrides.verbose, Property::Verbose)?,
            overwrite: flag(overrides.overwrite, Property::Overwrite)?,
            append: flag(overrides.append, Property::Append)?,
            back_image: overrides.back_image.clone().or(back_image),
            back_bleed_mm: overrides.back_bleed_mm.or(back_bleed).unwrap_or(0.0),
        };

        log::debug!("resolved settings: {:?}", settings);
        Ok(settings)
    }

    /// Output page: always landscape
    pub fn page_spec(&self) -> PageSpec {
        PageSpec {
            paper: self.paper,
            orientation: Orientation::Landscape,
            margin_mm: self.margin_mm,
            dpi: self.dpi,
            feed_direction: self.feed_direction,
        }
    }

    pub fn card_spec(&self) -> CardSpec {
        CardSpec {
            width_mm: self.card_width_mm,
            height_mm: self.card_height_mm,
            bleed_mm: self.bleed_mm,
            spacing_mm: self.spacing_mm,
            fold_distance_mm: self.fold_distance_mm,
        }
    }

    pub fn print_mode(&self) -> PrintMode {
        if self.two_sided {
            PrintMode::TwoSided
        } else {
            PrintMode::Folded
        }
    }

    /// Render as config-file TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
