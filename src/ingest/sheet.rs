//! Tabular file extraction
//!
//! Reads a delimited spreadsheet export into raw rows of exactly four
//! trimmed cells: Industry Segment, Domain Group, Category, Sub-Category.
//! The first row is the header. Ragged source data is tolerated: short
//! rows are padded and a data row survives extraction only when at least
//! two of its four target columns are populated.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;

/// Number of meaningful columns in the fixed import layout
pub const SHEET_COLUMNS: usize = 4;

/// Minimum populated cells for a data row to survive extraction
const MIN_POPULATED_CELLS: usize = 2;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("file is not tabular data: {0}")]
    Malformed(#[from] csv::Error),
}

/// Raw extraction output: header row first, then surviving data rows
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SheetData {
    pub rows: Vec<Vec<String>>,
}

impl SheetData {
    /// Data rows, excluding the header
    pub fn data_rows(&self) -> &[Vec<String>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }
}

/// Extract rows from a file on disk
pub fn read_sheet(path: &Path) -> Result<SheetData, SheetError> {
    let file = File::open(path).map_err(|source| SheetError::Open {
        path: path.display().to_string(),
        source,
    })?;
    extract_rows(BufReader::new(file))
}

/// Extract rows from any tabular byte stream
///
/// An undecodable or structurally broken stream is a hard failure; a
/// stream that parses but yields nothing usable returns an empty
/// `SheetData` for the parser to report as a soft failure.
pub fn extract_rows(reader: impl Read) -> Result<SheetData, SheetError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut sheet = SheetData::default();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;

        let mut cells: Vec<String> = record
            .iter()
            .take(SHEET_COLUMNS)
            .map(|cell| cell.trim().to_string())
            .collect();
        cells.resize(SHEET_COLUMNS, String::new());

        let populated = cells.iter().filter(|c| !c.is_empty()).count();

        // Header passes through as-is; data rows must carry enough cells
        if index == 0 || populated >= MIN_POPULATED_CELLS {
            sheet.rows.push(cells);
        }
    }

    Ok(sheet)
}
