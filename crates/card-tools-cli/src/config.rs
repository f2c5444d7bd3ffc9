use crate::ConfigAction;
use crate::common::init_logging;
use anyhow::{Context, Result, bail};
use card_config::{ConfigFile, Settings, SettingsOverrides};
use std::path::{Path, PathBuf};

pub async fn run(
    action: ConfigAction,
    game: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    init_logging(false);

    let path = match config {
        Some(path) => path,
        None => card_config::config_path(game.as_deref())?,
    };

    match action {
        ConfigAction::Path => {
            println!("{}", path.display());
        }

        ConfigAction::Init => {
            if card_config::init_config(&path).await? {
                println!("Created {}", path.display());
            } else {
                println!("{} already exists", path.display());
            }
        }

        ConfigAction::Check => {
            let file = load(&path).await?;
            let issues = file.validate();
            if issues.is_empty() {
                println!("{}: OK", path.display());
                return Ok(());
            }
            for issue in &issues {
                eprintln!("{}", issue);
            }
            bail!("{} problems in {}", issues.len(), path.display());
        }

        ConfigAction::Show { profile } => {
            let file = load(&path).await?;
            let settings =
                Settings::resolve(&SettingsOverrides::default(), &file, profile.as_deref())?;
            print!("{}", settings.to_toml_string()?);
        }
    }
    Ok(())
}

async fn load(path: &Path) -> Result<ConfigFile> {
    ConfigFile::load(path)
        .await
        .with_context(|| format!("Failed to load config file {}", path.display()))
}
