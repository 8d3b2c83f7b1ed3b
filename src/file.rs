// src/file.rs

use std::{fs, path::{Path, PathBuf}};

use crate::{error::AppError, render::RenderedFile};

/// Write every rendered file into `dir`, creating it if needed.
/// Existing files with the same names are overwritten. Returns the paths written, in order.
pub fn write_site(dir: &Path, files: &[RenderedFile]) -> Result<Vec<PathBuf>, AppError> {
    ensure_directory(dir)?;

    let mut written = Vec::with_capacity(files.len());
    for f in files {
        let path = dir.join(&f.name);
        fs::write(&path, &f.contents).map_err(|source| AppError::Write { path: path.clone(), source })?;
        logd!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

pub fn ensure_directory(dir: &Path) -> Result<(), AppError> {
    if dir.exists() && !dir.is_dir() {
        return Err(AppError::Write {
            path: dir.to_path_buf(),
            source: std::io::Error::other("path exists but is not a directory"),
        });
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| AppError::Write { path: dir.to_path_buf(), source })?;
    }
    Ok(())
}
