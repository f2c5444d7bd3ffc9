//! Profile configuration and card list files for the card sheet tools.

pub mod cardlist;
mod file;
pub mod paths;
mod properties;
mod settings;
mod types;

pub use cardlist::{CardSet, format_card_set, load_card_list, parse_card_list};
pub use file::ConfigFile;
pub use paths::{config_dir, config_path, expand_tilde, init_config};
pub use properties::{Property, ValueKind};
pub use settings::{Settings, SettingsOverrides, default_bleed_mm, default_spacing_mm};
pub use types::*;
