//! Profile config file
//!
//! A TOML document whose top-level keys form the default section. Every
//! table is a named profile; lookups in a profile fall back to the default
//! section.

use crate::paths::expand_tilde;
use crate::properties::{Property, ValueKind};
use crate::types::{ConfigError, ConfigIssue, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    defaults: Table,
    profiles: BTreeMap<String, Table>,
}

impl ConfigFile {
    pub fn parse(text: &str) -> Result<Self> {
        let table: Table = toml::from_str(text)?;

        let mut config = ConfigFile::default();
        for (key, value) in table {
            match value {
                Value::Table(profile) => {
                    config.profiles.insert(key, profile);
                }
                other => {
                    config.defaults.insert(key, other);
                }
            }
        }
        Ok(config)
    }

    /// Load a config file. A missing file reads as an empty config.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(text) => {
                let config = Self::parse(&text)?;
                log::debug!(
                    "loaded config {} ({} profiles)",
                    path.display(),
                    config.profiles.len()
                );
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let mut table = self.defaults.clone();
        for (name, profile) in &self.profiles {
            table.insert(name.clone(), Value::Table(profile.clone()));
        }
        Ok(toml::to_string(&table)?)
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        tokio::fs::write(path, self.to_toml_string()?).await?;
        Ok(())
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn has_profile(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Set a value in the default section (`profile = None`) or a profile,
    /// creating the profile if needed
    pub fn set(&mut self, profile: Option<&str>, property: Property, value: impl Into<Value>) {
        let table = match profile {
            Some(name) => self.profiles.entry(name.to_string()).or_default(),
            None => &mut self.defaults,
        };
        table.insert(property.key().to_string(), value.into());
    }

    /// Raw lookup with profile fallback
    pub fn get(&self, profile: Option<&str>, property: Property) -> Result<Option<&Value>> {
        let key = property.key();
        if let Some(name) = profile {
            let table = self
                .profiles
                .get(name)
                .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))?;
            if let Some(value) = table.get(key) {
                return Ok(Some(value));
            }
        }
        Ok(self.defaults.get(key))
    }

    pub fn get_str(&self, profile: Option<&str>, property: Property) -> Result<Option<&str>> {
        match self.get(profile, property)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(invalid(property, ValueKind::Str)),
        }
    }

    /// Numbers may be written as integers or floats
    pub fn get_f32(&self, profile: Option<&str>, property: Property) -> Result<Option<f32>> {
        match self.get(profile, property)? {
            None => Ok(None),
            Some(value) => as_number(value)
                .map(Some)
                .ok_or_else(|| invalid(property, ValueKind::Number)),
        }
    }

    pub fn get_bool(&self, profile: Option<&str>, property: Property) -> Result<Option<bool>> {
        match self.get(profile, property)? {
            None => Ok(None),
            Some(Value::Boolean(b)) => Ok(Some(*b)),
            Some(_) => Err(invalid(property, ValueKind::Bool)),
        }
    }

    /// A string property holding a path, with `~` expanded
    pub fn get_path(&self, profile: Option<&str>, property: Property) -> Result<Option<PathBuf>> {
        Ok(self.get_str(profile, property)?.map(expand_tilde))
    }

    /// Check every entry, returning all problems found
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        check_table(&self.defaults, None, &mut issues);
        for (name, table) in &self.profiles {
            check_table(table, Some(name), &mut issues);
        }
        issues
    }
}

fn invalid(property: Property, kind: ValueKind) -> ConfigError {
    ConfigError::InvalidValue {
        key: property.key().to_string(),
        expected: kind.describe(),
    }
}

fn as_number(value: &Value) -> Option<f32> {
    match value {
        Value::Integer(i) => Some(*i as f32),
        Value::Float(f) => Some(*f as f32),
        _ => None,
    }
}

fn check_table(table: &Table, profile: Option<&str>, issues: &mut Vec<ConfigIssue>) {
    let mut report = |key: &str, message: String| {
        issues.push(ConfigIssue {
            profile: profile.map(str::to_string),
            key: key.to_string(),
            message,
        });
    };

    for (key, value) in table {
        let Some(property) = Property::from_key(key) else {
            let message = if value.is_table() {
                "profiles cannot be nested".to_string()
            } else {
                "unknown property".to_string()
            };
            report(key, message);
            continue;
        };

        if property.profile_only() && profile.is_none() {
            report(key, "only allowed in a profile".to_string());
        }

        let type_ok = match property.kind() {
            ValueKind::Str => value.is_str(),
            ValueKind::Number => as_number(value).is_some(),
            ValueKind::Bool => value.is_bool(),
        };
        if !type_ok {
            report(key, format!("expected {}", property.kind().describe()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
pagesize = "letter"
page_dpi = 300
card_bleed_mm = 2.5

[marvel]
backside_image_file = "/cards/back.png"
backside_bleed_mm = 0
card_bleed_mm = 3.0
"#;

    #[test]
    fn test_profile_falls_back_to_defaults() {
        let config = ConfigFile::parse(SAMPLE).unwrap();
        let profile = Some("marvel");

        assert_eq!(config.get_f32(profile, Property::CardBleed).unwrap(), Some(3.0));
        assert_eq!(config.get_f32(profile, Property::PageDpi).unwrap(), Some(300.0));
        assert_eq!(
            config.get_str(profile, Property::PageSize).unwrap(),
            Some("letter")
        );
        assert_eq!(config.get_f32(None, Property::CardBleed).unwrap(), Some(2.5));
        assert_eq!(config.get_bool(profile, Property::TwoSided).unwrap(), None);
    }

    #[test]
    fn test_unknown_profile() {
        let config = ConfigFile::parse(SAMPLE).unwrap();
        assert!(matches!(
            config.get(Some("lotr"), Property::PageDpi),
            Err(ConfigError::UnknownProfile(name)) if name == "lotr"
        ));
    }

    #[test]
    fn test_wrong_type() {
        let config = ConfigFile::parse("page_dpi = \"high\"").unwrap();
        assert!(matches!(
            config.get_f32(None, Property::PageDpi),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_reports_everything() {
        let config = ConfigFile::parse(
            r#"
colour = "red"
twosided = "yes"
backside_bleed_mm = 1

[game]
page_margin_mm = true
"#,
        )
        .unwrap();

        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.iter().any(|i| i.key == "colour"));
        assert!(
            issues
                .iter()
                .any(|i| i.profile.as_deref() == Some("game") && i.key == "page_margin_mm")
        );
    }

    #[test]
    fn test_valid_sample() {
        assert!(ConfigFile::parse(SAMPLE).unwrap().validate().is_empty());
    }

    #[test]
    fn test_set_and_serialize() {
        let mut config = ConfigFile::default();
        config.set(None, Property::PageSize, "a3");
        config.set(Some("arkham"), Property::BacksideBleed, 2.0);

        let reparsed = ConfigFile::parse(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(reparsed, config);
        assert!(reparsed.has_profile("arkham"));
    }
}
