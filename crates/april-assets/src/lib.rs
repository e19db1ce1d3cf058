//! Bundled stylesheet assets for April pages.
//!
//! The stylesheets a rendered page links to live under this crate's
//! `assets/` directory. With the `embed` feature they are compiled into the
//! binary through `rust-embed`; without it they are read from disk at the
//! path the crate was built from.
//!
//! Pages reference the assets through the skeleton's asset prefix, so the tree
//! has to be copied next to the rendered HTML with [`copy_assets`].

use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[cfg(feature = "embed")]
#[derive(rust_embed::RustEmbed)]
#[folder = "assets"]
#[prefix = ""]
struct Bundle;

#[cfg(not(feature = "embed"))]
const BUNDLE_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

/// Error returned by [`copy_assets`].
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The destination already contains the output directory.
    #[error("Asset directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    /// The bundled asset tree is missing or incomplete.
    #[error("Bundled asset missing: {0}")]
    Missing(String),
    /// I/O error while writing assets.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bytes of one bundled file, addressed like `css/april.css`.
#[cfg(feature = "embed")]
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    Bundle::get(path).map(|file| file.data)
}

/// Bytes of one bundled file, addressed like `css/april.css`.
#[cfg(not(feature = "embed"))]
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    fs::read(Path::new(BUNDLE_ROOT).join(path))
        .ok()
        .map(Cow::Owned)
}

/// Every bundled file, sorted, with `/` separators.
pub fn paths() -> Vec<Cow<'static, str>> {
    #[cfg(feature = "embed")]
    let mut paths: Vec<_> = Bundle::iter().collect();
    #[cfg(not(feature = "embed"))]
    let mut paths: Vec<_> = list_files(Path::new(BUNDLE_ROOT))
        .into_iter()
        .map(Cow::Owned)
        .collect();
    paths.sort();
    paths
}

/// Copy the bundled stylesheets into `dest/output_dir_name`.
///
/// `dest` is created if needed. The output directory must not exist yet and
/// is claimed atomically, so two concurrent copies cannot both succeed. If a
/// file fails to copy, the partly written output directory is removed.
///
/// Returns the directory the assets were written to.
pub fn copy_assets(dest: &Path, output_dir_name: &str) -> Result<PathBuf, AssetError> {
    copy_tree(&paths(), get, dest, output_dir_name)
}

fn copy_tree<F>(
    paths: &[Cow<'static, str>],
    read: F,
    dest: &Path,
    output_dir_name: &str,
) -> Result<PathBuf, AssetError>
where
    F: Fn(&str) -> Option<Cow<'static, [u8]>>,
{
    if paths.is_empty() {
        return Err(AssetError::Missing("asset tree is empty".to_owned()));
    }

    fs::create_dir_all(dest)?;
    let target = dest.join(output_dir_name);
    match fs::create_dir(&target) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            return Err(AssetError::AlreadyExists(target));
        }
        Err(err) => return Err(err.into()),
    }

    if let Err(err) = write_files(paths, &read, &target) {
        if let Err(cleanup) = fs::remove_dir_all(&target) {
            tracing::warn!(
                output = %target.display(),
                error = %cleanup,
                "Failed to remove partial asset directory"
            );
        }
        return Err(err);
    }

    tracing::info!(
        files = paths.len(),
        output = %target.display(),
        "Copied bundled assets"
    );
    Ok(target)
}

fn write_files<F>(paths: &[Cow<'static, str>], read: &F, target: &Path) -> Result<(), AssetError>
where
    F: Fn(&str) -> Option<Cow<'static, [u8]>>,
{
    for path in paths {
        let data = read(&**path).ok_or_else(|| AssetError::Missing(path.to_string()))?;
        let out = target.join(&**path);
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out, &data)?;
        tracing::debug!(asset = %path, "Copied asset");
    }
    Ok(())
}

/// Files under `root`, relative to it. Unreadable directories are skipped.
#[cfg(not(feature = "embed"))]
fn list_files(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            tracing::warn!(dir = %dir.display(), "Skipping unreadable asset directory");
            continue;
        };
        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if let Ok(relative) = path.strip_prefix(root) {
                let parts: Vec<_> = relative
                    .components()
                    .map(|part| part.as_os_str().to_string_lossy())
                    .collect();
                files.push(parts.join("/"));
            }
        }
    }
    files
}
