// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::{parse_rows, write_dataset};
use crate::data::Dataset;

/// Write the dataset where `ExportOptions` points (file or stdout).
/// Returns the file written to, or `None` for stdout.
pub fn export_dataset(export: &ExportOptions, ds: &Dataset) -> io::Result<Option<PathBuf>> {
    let sep = export.delim();
    match export.out_path() {
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_dataset(&mut out, ds, export.include_headers, sep)?;
            out.flush()?;
            Ok(None)
        }
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    ensure_directory(parent)?;
                }
            }
            let file = File::create(&path)?; // truncate/overwrite
            let mut out = BufWriter::new(file);
            write_dataset(&mut out, ds, export.include_headers, sep)?;
            out.flush()?;
            logf!("Export: {} rows → {}", ds.len(), path.display());
            Ok(Some(path))
        }
    }
}

/// Read a previous export back into rows. Delimiter follows the extension
/// (`.tsv` → tab, anything else → comma).
pub fn read_rows(path: &Path) -> io::Result<Vec<Vec<String>>> {
    let text = fs::read_to_string(path)?;
    let sep = match path.extension().and_then(|e| e.to_str()) {
        Some(e) if e.eq_ignore_ascii_case("tsv") => '\t',
        _ => ',',
    };
    Ok(parse_rows(&text, sep))
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
