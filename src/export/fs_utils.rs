use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::path::confirm_overwrite;
use std::path::Path;

/// Fails unless `path` is free, `force` is set, or the user agrees to overwrite.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    if confirm_overwrite(path)? {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".into(),
        ))
    }
}
