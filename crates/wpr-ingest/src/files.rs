//! Bounded file reads.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Maximum size for a table file or download (100 MB default).
pub const MAX_TABLE_SIZE: u64 = 100 * 1024 * 1024;

/// Check the file size against a limit before loading.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::TooLarge {
            origin: path.display().to_string(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads a whole file after checking its size.
pub fn read_file_bytes(path: &Path, max_size: u64) -> Result<Vec<u8>> {
    check_file_size(path, max_size)?;
    std::fs::read(path).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file() {
        let result = read_file_bytes(Path::new("/definitely/missing.csv"), MAX_TABLE_SIZE);
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn size_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"0123456789").unwrap();
        assert!(check_file_size(file.path(), 10).is_ok());
        assert!(matches!(
            check_file_size(file.path(), 9),
            Err(IngestError::TooLarge { size: 10, .. })
        ));
    }
}
