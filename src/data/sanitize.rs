use crate::domain::Dataset;

/// Drop every row that has a missing (NaN) value in any column.
pub fn sanitize(data: &Dataset) -> Dataset {
    data.filter_rows(|row| row.iter().all(|v| !v.is_nan()))
}
