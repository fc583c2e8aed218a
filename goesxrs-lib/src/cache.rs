//! Local copies of the remote reference files.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{GoesError, Result};

fn file_exists_and_not_empty(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.len() > 0,
        Err(_) => false,
    }
}

fn remote_file_url(remote_base_url: &str, filename: &str) -> String {
    format!("{}/{}", remote_base_url.trim_end_matches('/'), filename)
}

/// Makes sure `filename` exists in `local_dir`, fetching it from
/// `remote_base_url` when it is missing or `force_refresh` is set.
///
/// A failed refresh falls back to an existing local copy; a failed fetch
/// with nothing on disk is an error.
pub fn ensure_local(
    filename: &str,
    remote_base_url: &str,
    local_dir: &Path,
    force_refresh: bool,
) -> Result<PathBuf> {
    let path = local_dir.join(filename);
    if !force_refresh && file_exists_and_not_empty(&path) {
        return Ok(path);
    }

    let url = remote_file_url(remote_base_url, filename);
    match download_file(&url, &path) {
        Ok(()) => {
            info!("downloaded {url} to {}", path.display());
            Ok(path)
        }
        Err(e) if file_exists_and_not_empty(&path) => {
            warn!("could not refresh {filename} ({e}), using local copy");
            Ok(path)
        }
        Err(e) => Err(e),
    }
}

#[cfg(feature = "download")]
fn download_file(url: &str, path: &Path) -> Result<()> {
    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::time::Duration;

    let failed = |reason: String| GoesError::Download {
        file: url.to_string(),
        reason,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| failed(format!("failed to create HTTP client: {e}")))?;
    let mut response = client
        .get(url)
        .send()
        .map_err(|e| failed(e.to_string()))?;
    if !response.status().is_success() {
        return Err(failed(format!("server returned {}", response.status())));
    }

    // Partial downloads must never replace the target
    let temp_path = path.with_extension("tmp");
    let mut file = BufWriter::new(File::create(&temp_path)?);
    response
        .copy_to(&mut file)
        .map_err(|e| failed(e.to_string()))?;
    file.flush()?;
    drop(file);
    fs::rename(temp_path, path)?;
    Ok(())
}

#[cfg(not(feature = "download"))]
fn download_file(url: &str, _path: &Path) -> Result<()> {
    Err(GoesError::Download {
        file: url.to_string(),
        reason: "not present locally and built without the `download` feature".to_string(),
    })
}
