use crate::ImageArgs;
use crate::common::{collect_images, init_logging};
use anyhow::{Context, Result, bail};
use card_image::{AspectRotation, CardImage, ImageTransform, RotateDirection, Rotation};
use std::path::{Path, PathBuf};

/// Rotate, then resize, then add or crop bleed
fn transform(image: CardImage, args: &ImageArgs) -> Result<CardImage> {
    let direction: RotateDirection = args.rotate_dir.into();
    let mut image = if args.rotate_all {
        log::info!("rotating image {}", direction);
        Rotation(direction).apply(image)
    } else if let Some(aspect) = args.rotate_to_aspect {
        AspectRotation {
            aspect: aspect.into(),
            direction,
            physical: true,
        }
        .apply(image)
    } else {
        image
    };

    if args.resize {
        log::info!("resizing image to {}x{} mm", args.width, args.height);
        image.set_size_mm(args.width, args.height);
    }

    if args.bleed > 0.0 {
        log::info!("adding {} mm bleed", args.bleed);
        image = image.add_bleed(args.bleed)?;
    } else if args.bleed < 0.0 {
        log::info!("cropping {} mm", -args.bleed);
        image = image.crop_bleed(-args.bleed)?;
    }
    Ok(image)
}

fn output_path(input: &Path, args: &ImageArgs) -> Result<PathBuf> {
    if let Some(output) = &args.output {
        return Ok(output.clone());
    }
    let prefix = args.prefix.as_deref().unwrap_or_default();
    let name = input
        .file_name()
        .with_context(|| format!("No file name in {}", input.display()))?;
    let mut prefixed = std::ffi::OsString::from(prefix);
    prefixed.push(name);
    Ok(input.with_file_name(prefixed))
}

pub async fn run(args: ImageArgs) -> Result<()> {
    init_logging(args.verbose);

    let inputs = collect_images(&args.images).await?;
    if args.output.is_some() && inputs.len() > 1 {
        bail!("--output can only be used with a single image");
    }

    for input in &inputs {
        log::info!("loading image {}", input.display());
        let image = card_image::load_image(input, args.dpi)
            .await
            .with_context(|| format!("Failed to load image {}", input.display()))?;

        let image = transform(image, &args)
            .with_context(|| format!("Failed to transform {}", input.display()))?;

        let output = output_path(input, &args)?;
        card_image::save_image(&image, &output)
            .await
            .with_context(|| format!("Failed to save {}", output.display()))?;
        println!("{} → {}", input.display(), output.display());
    }
    Ok(())
}
