/// Map rendering and output-file handling.
///
/// This layer is a thin collaborator around the analysis core: it owns
/// the output directory lifecycle and turns dataset summaries into
/// static Leaflet HTML pages. Nothing here feeds back into aggregation.
///
/// Submodules:
/// - `map_html` — standalone Leaflet page generation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod map_html;

/// Prepares the output directory.
///
/// With `clean` set, an existing directory is deleted and recreated so
/// stale pages from earlier runs never survive; otherwise the directory
/// is created if missing and existing files are left alone.
pub fn prepare_output_dir(dir: &Path, clean: bool) -> io::Result<()> {
    if clean && dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)
}

/// Writes one rendered page into the output directory and returns its
/// full path.
pub fn write_map(dir: &Path, file_name: &str, html: &str) -> io::Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, html)?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
