//! Export helpers for allowable-pointing grid artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod grid {
    use std::fs::File;
    use std::io::{self, BufReader, Write};
    use std::path::Path;

    use serde::{Deserialize, Serialize};
    use thiserror::Error;
    use tracing::info;

    use super::writer_for_path;

    /// Default artifact location, relative to the working directory.
    pub const DEFAULT_OUTPUT: &str = "allowable_pointings_grid.json";
    /// Schema version written into JSON artifacts.
    pub const GRID_DATASET_VERSION: u32 = 1;
    /// Column order shared by every format.
    pub const COLUMNS: [&str; 3] = ["dlong", "decl", "roll"];

    const HEADER: &str = "dlong,decl,roll";

    /// On-disk layout of the grid artifact.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum GridFormat {
        Json,
        Csv,
    }

    impl GridFormat {
        /// Infer the format from the file extension, defaulting to JSON.
        pub fn from_path(path: &Path) -> Self {
            match path.extension().and_then(|ext| ext.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("csv") => GridFormat::Csv,
                _ => GridFormat::Json,
            }
        }
    }

    /// JSON document holding the allowable `(dlong, decl, roll)` rows.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct GridDocument {
        pub version: u32,
        pub columns: Vec<String>,
        pub rows: Vec<[f64; 3]>,
    }

    impl GridDocument {
        pub fn new(rows: Vec<[f64; 3]>) -> Self {
            Self {
                version: GRID_DATASET_VERSION,
                columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
                rows,
            }
        }
    }

    #[derive(Debug, Error)]
    pub enum ExportError {
        #[error("I/O error: {0}")]
        Io(#[from] io::Error),
        #[error("serialization error: {0}")]
        Json(#[from] serde_json::Error),
        #[error("unsupported grid artifact: {0}")]
        Schema(String),
    }

    /// Write the standard CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Write rows as CSV, header first.
    pub fn write_csv(writer: &mut dyn Write, rows: &[[f64; 3]]) -> io::Result<()> {
        write_header(writer)?;
        for [dlong, decl, roll] in rows {
            writeln!(writer, "{},{},{}", dlong, decl, roll)?;
        }
        writer.flush()
    }

    /// Write rows as a pretty-printed [`GridDocument`].
    pub fn write_json(writer: &mut dyn Write, rows: &[[f64; 3]]) -> Result<(), ExportError> {
        let document = GridDocument::new(rows.to_vec());
        serde_json::to_writer_pretty(&mut *writer, &document)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the artifact to `path` (or stdout for `-`) in the given format.
    pub fn write_grid(path: &Path, format: GridFormat, rows: &[[f64; 3]]) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        match format {
            GridFormat::Json => write_json(writer.as_mut(), rows)?,
            GridFormat::Csv => write_csv(writer.as_mut(), rows)?,
        }
        info!(path = %path.display(), rows = rows.len(), ?format, "grid artifact written");
        Ok(())
    }

    /// Load a JSON artifact, checking version and column order.
    pub fn read_grid_json(path: &Path) -> Result<GridDocument, ExportError> {
        let reader = BufReader::new(File::open(path)?);
        let document: GridDocument = serde_json::from_reader(reader)?;
        if document.version != GRID_DATASET_VERSION {
            return Err(ExportError::Schema(format!(
                "version {} (expected {})",
                document.version, GRID_DATASET_VERSION
            )));
        }
        if document.columns != COLUMNS {
            return Err(ExportError::Schema(format!(
                "columns {:?} (expected {:?})",
                document.columns, COLUMNS
            )));
        }
        Ok(document)
    }

}
