use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Inline cost rows may use `;` instead of a newline, which is awkward to
/// pass on a command line.
pub fn normalize_rows(inline: &str) -> String {
    inline
        .split(|c: char| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn read_text_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    tracing::debug!("Reading {}", path.display());
    let text = fs::read_to_string(path)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_normalize_rows() {
        assert_eq!(normalize_rows("1,2; 3,4;"), "1,2\n3,4");
        assert_eq!(normalize_rows("1,2\n3,4"), "1,2\n3,4");
    }

    #[test]
    fn test_read_text_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"8,6,10\n9,12,13\n").unwrap();

        assert_eq!(read_text_file(file.path()).unwrap(), "8,6,10\n9,12,13\n");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_text_file("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, crate::utils::error::SolverError::IoError(_)));
    }
}
