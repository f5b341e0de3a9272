//! Row parsing and hierarchy assembly
//!
//! Turns extracted sheet rows into per-row parse records, a nested
//! hierarchy map and aggregate processing statistics. Row-level defects
//! are data for the caller to render, never exceptions.

use std::collections::BTreeMap;

use crate::ingest::sheet::SheetData;

/// Message used when a file parses but contains nothing usable
pub const NO_DATA_MESSAGE: &str = "No data found in file";

/// One parsed data row; not persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub industry_segment: String,
    pub domain_group: String,
    pub category: String,
    pub sub_category: String,
    /// 1-based position among data rows
    pub row_number: usize,
    /// True only when all four fields are present
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ParsedRow {
    /// Segment + group are the minimum for a row to contribute to the
    /// hierarchy; category and sub-category are recommended
    pub fn has_minimum_data(&self) -> bool {
        !self.industry_segment.is_empty() && !self.domain_group.is_empty()
    }
}

/// Nested mapping: segment name → group name → category name → sub-category names
///
/// Ordered maps keep downstream merge runs deterministic. Sub-category
/// lists are de-duplicated case-sensitively here; case-insensitive
/// collapsing happens in the merge engine.
pub type HierarchyMap = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<String>>>>;

/// Aggregate statistics for one ingestion run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    /// Data rows, excluding the header
    pub total_rows: usize,
    /// Rows with all four fields populated
    pub valid_rows: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Full output of the parse stage
#[derive(Debug, Default)]
pub struct ParseOutput {
    pub parsed: Vec<ParsedRow>,
    pub hierarchy: HierarchyMap,
    pub result: ProcessingResult,
}

/// Parse extracted rows into the hierarchy map and statistics
pub fn parse_sheet(sheet: &SheetData) -> ParseOutput {
    let mut output = ParseOutput::default();
    let data_rows = sheet.data_rows();

    if data_rows.is_empty() {
        output.result.errors.push(NO_DATA_MESSAGE.to_string());
        return output;
    }

    output.result.total_rows = data_rows.len();
    let mut partial_rows = 0usize;

    for (index, cells) in data_rows.iter().enumerate() {
        let row_number = index + 1;
        let mut row = ParsedRow {
            industry_segment: cells[0].clone(),
            domain_group: cells[1].clone(),
            category: cells[2].clone(),
            sub_category: cells[3].clone(),
            row_number,
            is_valid: false,
            errors: Vec::new(),
        };

        if row.industry_segment.is_empty() {
            row.errors.push("missing industry segment".to_string());
        }
        if row.domain_group.is_empty() {
            row.errors.push("missing domain group".to_string());
        }

        if !row.has_minimum_data() {
            output.result.errors.push(format!(
                "Row {}: {}",
                row_number,
                row.errors.join(", ")
            ));
            output.parsed.push(row);
            continue;
        }

        if row.category.is_empty() {
            row.errors.push("missing category".to_string());
        }
        if row.sub_category.is_empty() {
            row.errors.push("missing sub-category".to_string());
        }

        row.is_valid = row.errors.is_empty();
        if row.is_valid {
            output.result.valid_rows += 1;
        } else {
            partial_rows += 1;
        }

        insert_into_hierarchy(&mut output.hierarchy, &row);
        output.parsed.push(row);
    }

    if partial_rows > 0 {
        output.result.warnings.push(format!(
            "{} row(s) missing recommended category or sub-category data",
            partial_rows
        ));
    }

    output
}

/// Add one row's names to the nested map, creating levels on first sight
fn insert_into_hierarchy(hierarchy: &mut HierarchyMap, row: &ParsedRow) {
    let groups = hierarchy.entry(row.industry_segment.clone()).or_default();
    let categories = groups.entry(row.domain_group.clone()).or_default();

    if row.category.is_empty() {
        return;
    }
    let subs = categories.entry(row.category.clone()).or_default();

    if !row.sub_category.is_empty() && !subs.contains(&row.sub_category) {
        subs.push(row.sub_category.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::sheet::extract_rows;

    fn parse(input: &str) -> ParseOutput {
        parse_sheet(&extract_rows(input.as_bytes()).unwrap())
    }

    #[test]
    fn test_fully_valid_rows() {
        let output = parse(
            "Industry,Group,Cat,Sub\n\
             Life Sciences,Strategy,Planning,Forecasting\n\
             Life Sciences,Strategy,Planning,Budgeting\n",
        );
        assert_eq!(output.result.total_rows, 2);
        assert_eq!(output.result.valid_rows, 2);
        assert!(output.result.errors.is_empty());
        assert!(output.result.warnings.is_empty());

        let subs = &output.hierarchy["Life Sciences"]["Strategy"]["Planning"];
        assert_eq!(subs, &vec!["Forecasting".to_string(), "Budgeting".to_string()]);
    }

    #[test]
    fn test_partial_row_contributes_and_warns() {
        let output = parse(
            "Industry,Group,Cat,Sub\n\
             Life Sciences,Strategy,Planning,Forecasting\n\
             Life Sciences,Strategy,Planning,Budgeting\n\
             Life Sciences,Ops,,\n\
             Life Sciences,Ops,Execution,Delivery\n\
             Life Sciences,Ops,Execution,Tracking\n",
        );
        assert_eq!(output.result.total_rows, 5);
        assert_eq!(output.result.valid_rows, 4);
        assert_eq!(output.result.warnings.len(), 1);
        assert!(output.result.warnings[0].starts_with("1 row(s)"));
        assert!(output.result.errors.is_empty());

        // The partial row still contributed its domain group
        assert!(output.hierarchy["Life Sciences"].contains_key("Ops"));
        let row3 = &output.parsed[2];
        assert!(!row3.is_valid);
        assert!(row3.has_minimum_data());
        assert_eq!(row3.row_number, 3);
    }

    #[test]
    fn test_row_below_minimum_is_an_error() {
        let output = parse(
            "Industry,Group,Cat,Sub\n\
             Life Sciences,,Planning,Forecasting\n",
        );
        assert_eq!(output.result.total_rows, 1);
        assert_eq!(output.result.valid_rows, 0);
        assert_eq!(output.result.errors.len(), 1);
        assert!(output.result.errors[0].starts_with("Row 1:"));
        assert!(output.result.errors[0].contains("missing domain group"));
        assert!(output.hierarchy.is_empty());
    }

    #[test]
    fn test_sub_category_deduplicated_case_sensitively() {
        let output = parse(
            "Industry,Group,Cat,Sub\n\
             Life Sciences,Strategy,Planning,Forecasting\n\
             Life Sciences,Strategy,Planning,Forecasting\n\
             Life Sciences,Strategy,Planning,FORECASTING\n",
        );
        let subs = &output.hierarchy["Life Sciences"]["Strategy"]["Planning"];
        // Exact duplicate collapsed here; case variant survives until merge
        assert_eq!(subs.len(), 2);
    }

    #[test]
    fn test_sub_without_category_is_not_inserted() {
        let output = parse(
            "Industry,Group,Cat,Sub\n\
             Life Sciences,Strategy,,Forecasting\n",
        );
        let categories = &output.hierarchy["Life Sciences"]["Strategy"];
        assert!(categories.is_empty());
        assert!(!output.parsed[0].is_valid);
    }

    #[test]
    fn test_empty_sheet_is_soft_failure() {
        let output = parse("Industry,Group,Cat,Sub\n");
        assert_eq!(output.result.total_rows, 0);
        assert_eq!(output.result.valid_rows, 0);
        assert_eq!(output.result.errors, vec![NO_DATA_MESSAGE.to_string()]);
        assert!(output.hierarchy.is_empty());
    }

    #[test]
    fn test_completely_empty_input_is_soft_failure() {
        let output = parse("");
        assert_eq!(output.result.errors, vec![NO_DATA_MESSAGE.to_string()]);
        assert!(output.hierarchy.is_empty());
    }
}
