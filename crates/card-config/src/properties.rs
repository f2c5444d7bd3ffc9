//! Known config properties

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Str,
    Number,
    Bool,
}

impl ValueKind {
    pub fn describe(self) -> &'static str {
        match self {
            ValueKind::Str => "a string",
            ValueKind::Number => "a number",
            ValueKind::Bool => "a boolean",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    PageSize,
    PageMargin,
    FeedDir,
    PageDpi,
    CardWidth,
    CardHeight,
    CardBleed,
    CardMinSpacing,
    CardFoldDistance,
    TwoSided,
    Verbose,
    Overwrite,
    Append,
    BacksideImageFile,
    BacksideBleed,
}

impl Property {
    pub const ALL: [Property; 15] = [
        Property::PageSize,
        Property::PageMargin,
        Property::FeedDir,
        Property::PageDpi,
        Property::CardWidth,
        Property::CardHeight,
        Property::CardBleed,
        Property::CardMinSpacing,
        Property::CardFoldDistance,
        Property::TwoSided,
        Property::Verbose,
        Property::Overwrite,
        Property::Append,
        Property::BacksideImageFile,
        Property::BacksideBleed,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Property::PageSize => "pagesize",
            Property::PageMargin => "page_margin_mm",
            Property::FeedDir => "feed_dir",
            Property::PageDpi => "page_dpi",
            Property::CardWidth => "card_width_mm",
            Property::CardHeight => "card_height_mm",
            Property::CardBleed => "card_bleed_mm",
            Property::CardMinSpacing => "card_min_spacing_mm",
            Property::CardFoldDistance => "card_fold_distance_mm",
            Property::TwoSided => "twosided",
            Property::Verbose => "verbose",
            Property::Overwrite => "overwrite",
            Property::Append => "append",
            Property::BacksideImageFile => "backside_image_file",
            Property::BacksideBleed => "backside_bleed_mm",
        }
    }

    pub fn from_key(key: &str) -> Option<Property> {
        Property::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn kind(self) -> ValueKind {
        match self {
            Property::PageSize | Property::FeedDir | Property::BacksideImageFile => ValueKind::Str,
            Property::TwoSided | Property::Verbose | Property::Overwrite | Property::Append => {
                ValueKind::Bool
            }
            _ => ValueKind::Number,
        }
    }

    /// Properties that only make sense for a named profile
    pub fn profile_only(self) -> bool {
        matches!(self, Property::BacksideImageFile | Property::BacksideBleed)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for property in Property::ALL {
            assert_eq!(Property::from_key(property.key()), Some(property));
        }
        assert_eq!(Property::from_key("page_size"), None);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Property::PageDpi.kind(), ValueKind::Number);
        assert_eq!(Property::FeedDir.kind(), ValueKind::Str);
        assert_eq!(Property::TwoSided.kind(), ValueKind::Bool);
        assert!(Property::BacksideBleed.profile_only());
        assert!(!Property::CardBleed.profile_only());
    }
}
