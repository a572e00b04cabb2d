//! Delimited integer grid reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use composite_core::Grid;
use csv::{ReaderBuilder, Trim};
use ndarray::Array2;
use tracing::debug;

use crate::error::LoaderError;

/// Field separator of grid files.
pub const DELIMITER: u8 = b';';

/// Parse a `;`-delimited integer grid from any reader.
///
/// # Errors
///
/// - `LoaderError::Empty` when there is no non-blank line
/// - `LoaderError::Ragged` when a row differs in width from the first
/// - `LoaderError::Parse` when a field is not an `i32`
/// - `LoaderError::Csv` when the underlying reader fails
pub fn parse_grid<R: Read>(reader: R) -> Result<Array2<i32>, LoaderError> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut values: Vec<i32> = Vec::new();
    let mut width: Option<usize> = None;
    let mut rows = 0;

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(rows as u64 + 1, |p| p.line());

        let expected = *width.get_or_insert(record.len());
        if record.len() != expected {
            return Err(LoaderError::Ragged {
                line,
                expected,
                found: record.len(),
            });
        }

        for (idx, field) in record.iter().enumerate() {
            let value = field.parse::<i32>().map_err(|_| LoaderError::Parse {
                line,
                field: idx + 1,
                value: field.to_string(),
            })?;
            values.push(value);
        }
        rows += 1;
    }

    let cols = width.ok_or(LoaderError::Empty)?;
    Ok(Array2::from_shape_vec((rows, cols), values)?)
}

/// Read a grid file into a raw integer array.
pub fn read_grid(path: &Path) -> Result<Array2<i32>, LoaderError> {
    let file = File::open(path).map_err(|e| LoaderError::io(path, e))?;
    let raw = parse_grid(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        rows = raw.nrows(),
        cols = raw.ncols(),
        "loaded grid"
    );
    Ok(raw)
}

/// Read a grid file and lift it into a [`Grid`] with every cell valid.
///
/// Out-of-range values are kept; removing them is the Sanitizer's job.
pub fn load_grid(path: &Path) -> Result<Grid, LoaderError> {
    read_grid(path).map(|raw| Grid::from_raw(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_parse_basic() {
        let raw = parse_grid("1;2;3\n-4;5;-6\n".as_bytes()).unwrap();
        assert_eq!(raw, array![[1, 2, 3], [-4, 5, -6]]);
    }

    #[test]
    fn test_parse_trims_and_skips_blank_lines() {
        let raw = parse_grid(" 1 ; 2 \n\n3;4\n\n".as_bytes()).unwrap();
        assert_eq!(raw, array![[1, 2], [3, 4]]);
    }

    #[test]
    fn test_parse_crlf() {
        let raw = parse_grid("7;8\r\n9;10\r\n".as_bytes()).unwrap();
        assert_eq!(raw, array![[7, 8], [9, 10]]);
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let raw = parse_grid("5;6".as_bytes()).unwrap();
        assert_eq!(raw, array![[5, 6]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_grid("".as_bytes()), Err(LoaderError::Empty)));
        assert!(matches!(parse_grid("\n\n".as_bytes()), Err(LoaderError::Empty)));
    }

    #[test]
    fn test_ragged_row() {
        match parse_grid("1;2;3\n4;5\n".as_bytes()) {
            Err(LoaderError::Ragged {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 2);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("Expected Ragged, got {:?}", other),
        }
    }

    #[test]
    fn test_non_integer_field() {
        match parse_grid("1;2\n3;4.5\n".as_bytes()) {
            Err(LoaderError::Parse { line, field, value }) => {
                assert_eq!(line, 2);
                assert_eq!(field, 2);
                assert_eq!(value, "4.5");
            }
            other => panic!("Expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_field_is_parse_error() {
        assert!(matches!(
            parse_grid("1;;3\n".as_bytes()),
            Err(LoaderError::Parse { field: 2, .. })
        ));
    }
}
