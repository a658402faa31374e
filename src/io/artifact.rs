//! Binary dataset artifacts.
//!
//! An artifact is a bincode-encoded [`Dataset`]: column count plus row-major
//! values. There is no header describing the columns; readers rely on the fixed
//! column order in `domain::COLUMN_NAMES`.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::Dataset;

/// File extension used for dataset artifacts.
pub const ARTIFACT_EXTENSION: &str = "pkl";

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode dataset into '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("'{path}' is not a dataset artifact: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("'{path}' holds {len} values, which is not a whole number of {ncols}-column rows")]
    Ragged {
        path: PathBuf,
        ncols: usize,
        len: usize,
    },
}

/// Artifact path for a collection run started at `start_date` (YYYYMMDD).
pub fn artifact_path(dir: &Path, start_date: &str) -> PathBuf {
    dir.join(format!("{start_date}.{ARTIFACT_EXTENSION}"))
}

pub fn write_dataset(path: &Path, data: &Dataset) -> Result<(), ArtifactError> {
    let bytes = bincode::serialize(data).map_err(|source| ArtifactError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, bytes).map_err(|source| ArtifactError::Create {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_dataset(path: &Path) -> Result<Dataset, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawDataset =
        bincode::deserialize_from(BufReader::new(file)).map_err(|source| ArtifactError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    let (ncols, len) = (raw.ncols, raw.values.len());
    Dataset::from_row_major(raw.ncols, raw.values).ok_or_else(|| ArtifactError::Ragged {
        path: path.to_path_buf(),
        ncols,
        len,
    })
}

/// Same layout as `Dataset`, decoded without its invariants so they can be checked.
#[derive(serde::Deserialize)]
struct RawDataset {
    ncols: usize,
    values: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_path_uses_start_date_stem() {
        let p = artifact_path(Path::new("out"), "20120101");
        assert_eq!(p, Path::new("out").join("20120101.pkl"));
    }

    #[test]
    fn written_dataset_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("20120101.pkl");
        let data = Dataset::from_row_major(2, vec![1.0, 2.5, -3.0, 4.0]).unwrap();

        write_dataset(&path, &data).unwrap();
        assert_eq!(read_dataset(&path).unwrap(), data);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_dataset(&dir.path().join("nope.pkl")).unwrap_err();
        assert!(matches!(err, ArtifactError::Open { .. }));
    }

    #[test]
    fn garbage_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.pkl");
        std::fs::write(&path, b"abc").unwrap();
        assert!(read_dataset(&path).is_err());
    }
}
