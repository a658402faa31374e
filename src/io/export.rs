//! Export a dataset artifact to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use crate::domain::{COLUMN_NAMES, Dataset};
use crate::error::AppError;

/// Header for a dataset of `ncols` columns.
///
/// Assembled datasets get their real column names; anything else gets `col_N`.
pub fn header_for(ncols: usize) -> Vec<String> {
    if ncols == COLUMN_NAMES.len() {
        COLUMN_NAMES.iter().map(|s| s.to_string()).collect()
    } else {
        (0..ncols).map(|i| format!("col_{i}")).collect()
    }
}

/// Write all rows of `data` to a CSV file with a header row.
pub fn write_dataset_csv(path: &Path, data: &Dataset) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writer
        .write_record(header_for(data.ncols()))
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for row in data.rows() {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembled_width_gets_named_columns() {
        assert_eq!(header_for(8)[0], "wind_speed");
        assert_eq!(header_for(8)[7], "water_level");
        assert_eq!(header_for(2), vec!["col_0", "col_1"]);
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let data = Dataset::from_row_major(2, vec![1.0, 2.5, 3.0, 4.0]).unwrap();

        write_dataset_csv(&path, &data).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "col_0,col_1\n1,2.5\n3,4\n");
    }
}
