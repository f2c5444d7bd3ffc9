use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("No profile \"{0}\" in config file")]
    UnknownProfile(String),

    #[error("Invalid value for \"{key}\": expected {expected}")]
    InvalidValue { key: String, expected: &'static str },

    #[error("No user config directory on this system")]
    NoConfigDir,

    #[error("Card list line {line}: {message}")]
    CardList { line: usize, message: String },

    #[error(transparent)]
    Layout(#[from] card_layout::LayoutError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// A problem found when validating a config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Profile the problem is in, `None` for the default section
    pub profile: Option<String>,
    pub key: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.profile {
            Some(profile) => write!(f, "[{}] {}: {}", profile, self.key, self.message),
            None => write!(f, "{}: {}", self.key, self.message),
        }
    }
}

