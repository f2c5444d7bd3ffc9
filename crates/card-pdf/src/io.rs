//! Async entry points for generating and writing sheets

use crate::sheet::CardSheet;
use crate::types::{Result, SheetError};
use std::path::Path;

/// Render a sheet on the blocking pool
pub async fn generate_pdf(sheet: CardSheet) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || sheet.render()).await?
}

/// Write rendered PDF bytes to `path`.
///
/// An existing file is only replaced when `overwrite` is set.
pub async fn save_pdf(bytes: &[u8], path: impl AsRef<Path>, overwrite: bool) -> Result<()> {
    let path = path.as_ref();
    if !overwrite && tokio::fs::try_exists(path).await? {
        return Err(SheetError::OutputExists(path.to_owned()));
    }

    tokio::fs::write(path, bytes).await?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
