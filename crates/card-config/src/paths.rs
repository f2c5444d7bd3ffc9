//! Config file locations

use crate::types::{ConfigError, Result};
use std::path::{Path, PathBuf};

/// Directory name under the user config dir
pub const APP_DIR: &str = "cardsheet";
pub const CONFIG_FILE_NAME: &str = "cardsheet.toml";
pub const GAMES_DIR: &str = "games";

/// `<user config dir>/cardsheet`
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(ConfigError::NoConfigDir)
}

/// Path of the shared config file, or of a game's own file
pub fn config_path(game: Option<&str>) -> Result<PathBuf> {
    Ok(config_path_in(&config_dir()?, game))
}

pub fn config_path_in(dir: &Path, game: Option<&str>) -> PathBuf {
    match game {
        Some(game) => dir.join(GAMES_DIR).join(format!("{game}.toml")),
        None => dir.join(CONFIG_FILE_NAME),
    }
}

/// Create an empty config file (and its directories) if none exists.
///
/// Returns whether a file was created.
pub async fn init_config(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if tokio::fs::try_exists(path).await? {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, "").await?;
    log::info!("created config file {}", path.display());
    Ok(true)
}

/// Expand a leading `~` to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_paths() {
        let dir = Path::new("/cfg/cardsheet");
        assert_eq!(
            config_path_in(dir, None),
            PathBuf::from("/cfg/cardsheet/cardsheet.toml")
        );
        assert_eq!(
            config_path_in(dir, Some("arkham")),
            PathBuf::from("/cfg/cardsheet/games/arkham.toml")
        );
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/back.png"), PathBuf::from("/abs/back.png"));
        assert_eq!(expand_tilde("rel/~back.png"), PathBuf::from("rel/~back.png"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/back.png"), home.join("back.png"));
        }
    }

    #[tokio::test]
    async fn test_init_creates_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_path_in(dir.path(), Some("marvel"));

        assert!(init_config(&path).await.unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

        std::fs::write(&path, "page_dpi = 300\n").unwrap();
        assert!(!init_config(&path).await.unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "page_dpi = 300\n");
    }
}
