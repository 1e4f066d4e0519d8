//! Saving media to disk.
//!
//! The body is written to `<name>.part` and renamed on success. Any failure
//! yields [`DownloadOutcome::OpenExternally`] so the caller can hand the URL
//! to something that can still show it.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::http::{Request, Transport};

/// Fallback when a name sanitizes to nothing.
const DEFAULT_FILENAME: &str = "pixelpro-download.bin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// File written at this path.
    Saved(PathBuf),
    /// Could not save; open this URL directly instead.
    OpenExternally(String),
}

/// Download `url` into `dir/filename`.
pub fn download<R>(transport: &R, url: &str, dir: &Path, filename: &str, timeout: Duration) -> DownloadOutcome
where
    R: Transport + ?Sized,
{
    match try_download(transport, url, dir, filename, timeout) {
        Ok(path) => {
            tracing::info!(%url, path = %path.display(), "download complete");
            DownloadOutcome::Saved(path)
        }
        Err(e) => {
            tracing::warn!(%url, "download failed, falling back to external open: {:#}", e);
            DownloadOutcome::OpenExternally(url.to_string())
        }
    }
}

fn try_download<R>(transport: &R, url: &str, dir: &Path, filename: &str, timeout: Duration) -> Result<PathBuf>
where
    R: Transport + ?Sized,
{
    let resp = transport
        .get(&Request::get(url).with_timeout(timeout))
        .context("GET request failed")?;
    if !resp.is_success() {
        anyhow::bail!("GET {} returned HTTP {}", url, resp.status);
    }

    let name = safe_filename(filename);
    std::fs::create_dir_all(dir).with_context(|| format!("create dir: {}", dir.display()))?;
    let final_path = dir.join(&name);
    let temp_path = dir.join(format!("{}.part", name));
    std::fs::write(&temp_path, &resp.body)
        .with_context(|| format!("write {}", temp_path.display()))?;
    if let Err(e) = std::fs::rename(&temp_path, &final_path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("rename to {}", final_path.display()));
    }
    Ok(final_path)
}

/// Sanitized name, or a fixed fallback when nothing usable remains.
fn safe_filename(name: &str) -> String {
    let sanitized = sanitize_filename_for_linux(name);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Sanitizes a candidate filename for safe use on Linux.
///
/// - Replaces NUL, `/`, `\`, whitespace, and control characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing spaces, dots, and underscores
/// - Limits length to 255 bytes (Linux NAME_MAX)
pub fn sanitize_filename_for_linux(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let c = if c == '/' || c == '\\' || c.is_control() || c.is_whitespace() {
            '_'
        } else {
            c
        };
        if c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.' || c == '_');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}
