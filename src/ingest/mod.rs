//! Spreadsheet ingestion pipeline
//!
//! File → raw rows → parsed rows + hierarchy map + processing statistics.

pub mod parser;
pub mod sheet;
pub mod template;

pub use parser::{
    parse_sheet, HierarchyMap, ParseOutput, ParsedRow, ProcessingResult, NO_DATA_MESSAGE,
};
pub use sheet::{extract_rows, read_sheet, SheetData, SheetError, SHEET_COLUMNS};
pub use template::{bulk_template, BulkTemplate, TEMPLATE_SEGMENT};

use std::path::Path;

/// Run the full pipeline against a file on disk
///
/// Unreadable or non-tabular input is a hard error; a readable file with
/// nothing usable comes back as a soft failure inside the ParseOutput.
pub fn ingest_file(path: &Path) -> Result<ParseOutput, SheetError> {
    let sheet = read_sheet(path)?;
    Ok(parse_sheet(&sheet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_ingest_file_end_to_end() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Industry,Group,Cat,Sub").unwrap();
        writeln!(file, "Life Sciences,Strategy,Planning,Forecasting").unwrap();
        file.flush().unwrap();

        let output = ingest_file(file.path()).unwrap();
        assert_eq!(output.result.total_rows, 1);
        assert_eq!(output.result.valid_rows, 1);
        assert!(output.hierarchy.contains_key("Life Sciences"));
    }

    #[test]
    fn test_ingest_missing_file_is_hard_error() {
        let err = ingest_file(Path::new("/nonexistent/sheet.csv")).unwrap_err();
        assert!(matches!(err, SheetError::Open { .. }));
    }
}
