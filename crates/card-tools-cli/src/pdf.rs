use crate::PdfArgs;
use crate::common::{card_aspect_rotation, collect_images, init_logging, load_face, read_stdin};
use anyhow::{Context, Result, bail};
use card_config::{CardSet, Settings, SettingsOverrides, parse_card_list};
use card_image::AspectRotation;
use card_pdf::{CardSheet, FaceId, PdfOptions};
use std::path::Path;

fn overrides(args: &PdfArgs) -> SettingsOverrides {
    SettingsOverrides {
        paper: args.pagesize.map(Into::into),
        margin_mm: args.margin,
        feed_direction: args.feed_dir.map(Into::into),
        dpi: args.dpi,
        card_width_mm: args.width,
        card_height_mm: args.height,
        bleed_mm: args.bleed,
        spacing_mm: args.spacing,
        fold_distance_mm: args.fold,
        two_sided: args.twosided.then_some(true),
        verbose: args.verbose.then_some(true),
        overwrite: args.overwrite.then_some(true),
        append: None,
        back_image: args.back.clone(),
        back_bleed_mm: args.back_bleed,
    }
}

/// Faces are prepared at the page resolution before being placed
struct Loader {
    card: card_layout::CardSpec,
    dpi: f32,
    rotation: Option<AspectRotation>,
}

impl Loader {
    async fn add_face(&self, sheet: &mut CardSheet, path: &Path, bleed_mm: f32) -> Result<FaceId> {
        let face = load_face(path, &self.card, self.dpi, bleed_mm, self.rotation).await?;
        Ok(sheet.add_face(face))
    }

    async fn add_set(&self, sheet: &mut CardSheet, set: &CardSet) -> Result<()> {
        log::info!(
            "back side ({:.1} mm bleed): {}",
            set.back_bleed_mm,
            set.back.display()
        );
        let back = self.add_face(sheet, &set.back, set.back_bleed_mm).await?;
        for front in &set.fronts {
            log::info!("adding card: {}", front.display());
            let front = self.add_face(sheet, front, set.front_bleed_mm).await?;
            sheet.add_card(Some(front), Some(back))?;
        }
        Ok(())
    }
}

pub async fn run(args: PdfArgs) -> Result<()> {
    let config = args.conf.load().await?;
    let settings = Settings::resolve(&overrides(&args), &config, args.conf.profile())?;
    init_logging(settings.verbose);

    if !args.stats_only
        && !settings.overwrite
        && tokio::fs::try_exists(&args.output).await.unwrap_or(false)
    {
        bail!(
            "Output file {} already exists (use --overwrite to replace it)",
            args.output.display()
        );
    }

    let options = PdfOptions {
        page: settings.page_spec(),
        card: settings.card_spec(),
        mode: settings.print_mode(),
        fronts: !args.only_back,
        backs: !args.only_front,
        back_offset_x_mm: args.back_offset_x,
        back_offset_y_mm: args.back_offset_y,
    };
    let mut sheet = CardSheet::new(options).context("Invalid page or card geometry")?;
    let loader = Loader {
        card: settings.card_spec(),
        dpi: settings.dpi,
        rotation: (!args.no_rotate)
            .then(|| card_aspect_rotation(&settings.card_spec(), args.rotate_dir.into())),
    };

    // Cards given directly share the configured back
    if !args.images.is_empty() {
        let back = match &settings.back_image {
            Some(path) => {
                log::info!("back side: {}", path.display());
                Some(loader.add_face(&mut sheet, path, settings.back_bleed_mm).await?)
            }
            None => {
                log::info!("using blank back side");
                None
            }
        };
        for path in collect_images(&args.images).await? {
            log::info!("adding card: {}", path.display());
            let front = loader.add_face(&mut sheet, &path, args.front_bleed).await?;
            sheet.add_card(Some(front), back)?;
        }
    }

    if args.stdin {
        log::info!("parsing card list from stdin");
        let text = read_stdin().await?;
        let sets = parse_card_list(&text).context("Invalid card list on stdin")?;
        for set in &sets {
            loader.add_set(&mut sheet, set).await?;
        }
    }
    for list in &args.lists {
        log::info!("parsing card list {}", list.display());
        let sets = card_config::load_card_list(list)
            .await
            .with_context(|| format!("Invalid card list {}", list.display()))?;
        for set in &sets {
            loader.add_set(&mut sheet, set).await?;
        }
    }

    if sheet.is_empty() {
        bail!("No cards to print: give card images, --list or --stdin");
    }

    let stats = sheet.statistics()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Card Sheet Statistics:");
        println!("  Cards: {}", stats.cards);
        println!("  Cards per sheet: {}", stats.cards_per_sheet);
        println!("  Sheets: {}", stats.sheets);
        println!("  Output pages: {}", stats.output_pages);
        println!("  Empty slots: {}", stats.empty_slots);
    }

    if args.stats_only {
        return Ok(());
    }

    let bytes = card_pdf::generate_pdf(sheet).await?;
    card_pdf::save_pdf(&bytes, &args.output, settings.overwrite).await?;
    println!("Generated {} cards → {}", stats.cards, args.output.display());
    Ok(())
}
