//! Locating map files and their annotation masks on disk

use crate::io::configuration::{MAP_EXTENSION, MASK_EXTENSIONS};
use crate::io::error::{AnalysisError, Result, file_system_error, invalid_parameter};
use std::path::{Path, PathBuf};

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn sorted_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory)
        .map_err(|e| file_system_error(directory, "read directory", e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| file_system_error(directory, "read directory entry", e))?
            .path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Map files to process: the target itself, or every map file in the target directory
///
/// Directory contents are returned in sorted order.
///
/// # Errors
///
/// Returns an error if the target is neither a map file nor a readable directory
pub fn collect_maps(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        if has_extension(target, &[MAP_EXTENSION]) {
            Ok(vec![target.to_path_buf()])
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &format!("map files must have the .{MAP_EXTENSION} extension"),
            ))
        }
    } else if target.is_dir() {
        Ok(sorted_files(target)?
            .into_iter()
            .filter(|path| has_extension(path, &[MAP_EXTENSION]))
            .collect())
    } else {
        Err(invalid_parameter(
            "target",
            &target.display(),
            &"not a file or directory",
        ))
    }
}

/// Annotation raster for a map named `base`
///
/// Tries `base.tif`, `base.png`, `base_mask.png`, `base.jpg` and `base.jpeg`, then
/// the first file in sorted order whose name starts with `base` and carries a
/// raster extension.
///
/// # Errors
///
/// Returns `MaskNotFound` if no candidate exists, or a file-system error if the
/// directory cannot be listed
pub fn find_mask(directory: &Path, base: &str) -> Result<PathBuf> {
    let preferred = [
        format!("{base}.tif"),
        format!("{base}.png"),
        format!("{base}_mask.png"),
        format!("{base}.jpg"),
        format!("{base}.jpeg"),
    ];
    if let Some(found) = preferred
        .iter()
        .map(|name| directory.join(name))
        .find(|path| path.is_file())
    {
        return Ok(found);
    }

    if directory.is_dir() {
        let fallback = sorted_files(directory)?.into_iter().find(|path| {
            has_extension(path, &MASK_EXTENSIONS)
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(base))
        });
        if let Some(found) = fallback {
            return Ok(found);
        }
    }

    Err(AnalysisError::MaskNotFound {
        base: base.to_string(),
        directory: directory.to_path_buf(),
    })
}
