use crate::CardlistArgs;
use crate::common::{collect_images, init_logging, read_stdin};
use anyhow::{Context, Result, anyhow};
use card_config::{CardSet, Settings, SettingsOverrides, format_card_set};
use tokio::io::AsyncWriteExt;

fn overrides(args: &CardlistArgs) -> SettingsOverrides {
    SettingsOverrides {
        verbose: args.verbose.then_some(true),
        append: args.append.then_some(true),
        back_image: args.back.clone(),
        back_bleed_mm: args.back_bleed,
        ..Default::default()
    }
}

/// Assemble the output: this block, with any stdin card list before or after it
fn assemble(block: &str, stdin: Option<&str>, first: bool) -> String {
    match stdin {
        None => block.to_string(),
        Some(passed) if first => format!("{block}{passed}"),
        Some(passed) => format!("{passed}{block}"),
    }
}

pub async fn run(args: CardlistArgs) -> Result<()> {
    let config = args.conf.load().await?;
    let settings = Settings::resolve(&overrides(&args), &config, args.conf.profile())?;
    init_logging(settings.verbose);

    let back = settings
        .back_image
        .clone()
        .ok_or_else(|| anyhow!("Back side image must be set either as --back or in a profile"))?;

    let set = CardSet {
        back,
        back_bleed_mm: settings.back_bleed_mm,
        front_bleed_mm: args.front_bleed,
        fronts: collect_images(&args.images).await?,
    };
    log::info!("back side image: {}", set.back.display());
    log::info!("bleed on back: {} mm", set.back_bleed_mm);
    log::info!("bleed on fronts: {} mm", set.front_bleed_mm);
    for front in &set.fronts {
        log::info!("adding image: {}", front.display());
    }

    let passed = if args.stdin {
        Some(read_stdin().await?)
    } else {
        None
    };
    let text = assemble(&format_card_set(&set), passed.as_deref(), args.first);

    match &args.output {
        Some(path) => {
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .append(settings.append)
                .truncate(!settings.append)
                .open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            file.write_all(text.as_bytes()).await?;
            file.flush().await?;
            log::info!(
                "{} card list {}",
                if settings.append { "appended to" } else { "wrote" },
                path.display()
            );
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(text.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
