//! Distance matrix CSV: a header of `,<label_0>,...,<label_n-1>` followed by
//! one row per label, each starting with that label.

use std::io::{BufReader, Read, Write};

use camino::Utf8Path;
use salesman_core::DistanceMatrix;

use crate::{DataError, fs};

/// Load and validate the matrix stored at `path`.
///
/// # Errors
///
/// See [`read_matrix_from`]; additionally [`DataError::Open`].
pub fn read_matrix(path: &Utf8Path) -> Result<DistanceMatrix, DataError> {
    let file = fs::open_utf8_file(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_matrix_from(BufReader::new(file), path)
}

/// Load and validate a matrix from `reader`; `origin` names the source in
/// errors.
///
/// # Errors
///
/// [`DataError::BadCell`] for a row label that does not match its column or
/// a non-numeric entry, [`DataError::Csv`] for ragged rows and
/// [`DataError::Invalid`] when the matrix is not square, symmetric and
/// non-negative with a zero diagonal.
///
/// # Examples
/// ```
/// use camino::Utf8Path;
/// use salesman_data::read_matrix_from;
///
/// let csv = ",Agra,Jaipur\nAgra,0,240.5\nJaipur,240.5,0\n";
/// let matrix = read_matrix_from(csv.as_bytes(), Utf8Path::new("d.csv"))?;
/// assert_eq!(matrix.get(0, 1), Some(240.5));
/// # Ok::<(), salesman_data::DataError>(())
/// ```
pub fn read_matrix_from<R: Read>(reader: R, origin: &Utf8Path) -> Result<DistanceMatrix, DataError> {
    let csv_error = |source| DataError::Csv {
        path: origin.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let labels: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .skip(1)
        .map(str::to_owned)
        .collect();

    let mut rows = Vec::with_capacity(labels.len());
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map_or(0, csv::Position::line);
        let bad_cell = |column: &str, reason: String| DataError::BadCell {
            path: origin.to_path_buf(),
            line,
            column: column.to_owned(),
            reason,
        };

        let mut cells = record.iter();
        let name = cells.next().unwrap_or_default();
        let expected = labels.get(rows.len()).map_or("", String::as_str);
        if name != expected {
            return Err(bad_cell(
                "",
                format!("row label {name:?} does not match column label {expected:?}"),
            ));
        }
        let values = cells
            .zip(&labels)
            .map(|(cell, column)| {
                cell.parse::<f64>()
                    .map_err(|err| bad_cell(column, format!("{cell:?} is not a number: {err}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(values);
    }

    let matrix = DistanceMatrix::from_rows(labels, rows).map_err(|source| DataError::Invalid {
        path: origin.to_path_buf(),
        source,
    })?;
    log::debug!("read {0}x{0} distance matrix from {origin}", matrix.len());
    Ok(matrix)
}

/// Write `matrix` to a new CSV file at `path`, creating parent directories.
///
/// # Errors
///
/// [`DataError::Open`] when the file cannot be created and
/// [`DataError::Csv`] when writing fails.
pub fn write_matrix(path: &Utf8Path, matrix: &DistanceMatrix) -> Result<(), DataError> {
    let file = fs::create_utf8_file(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_matrix_to(file, matrix, path)
}

/// Write `matrix` as CSV to `writer`; `origin` names the sink in errors.
///
/// # Errors
///
/// [`DataError::Csv`] when a record cannot be written or flushed.
pub fn write_matrix_to<W: Write>(
    writer: W,
    matrix: &DistanceMatrix,
    origin: &Utf8Path,
) -> Result<(), DataError> {
    let csv_error = |source| DataError::Csv {
        path: origin.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(std::iter::once("").chain(matrix.labels().iter().map(String::as_str)))
        .map_err(csv_error)?;
    for (label, row) in matrix.labels().iter().zip(matrix.rows()) {
        let record = std::iter::once(label.clone()).chain(row.iter().map(f64::to_string));
        writer.write_record(record).map_err(csv_error)?;
    }
    writer
        .flush()
        .map_err(|source| csv_error(csv::Error::from(source)))
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "fixtures should fail fast during setup")]
mod tests {
    use super::*;
    use rstest::rstest;
    use salesman_core::InvalidInputError;

    fn origin() -> &'static Utf8Path {
        Utf8Path::new("distances.csv")
    }

    #[rstest]
    fn written_matrices_read_back_identically() {
        let matrix = DistanceMatrix::from_rows(
            vec!["Agra".into(), "Jaipur".into(), "Delhi".into()],
            vec![
                vec![0.0, 221.1234567, 178.25],
                vec![221.1234567, 0.0, 235.5],
                vec![178.25, 235.5, 0.0],
            ],
        )
        .expect("matrix");
        let mut buffer = Vec::new();
        write_matrix_to(&mut buffer, &matrix, origin()).expect("written");
        let text = String::from_utf8(buffer).expect("utf8");
        assert!(text.starts_with(",Agra,Jaipur,Delhi\nAgra,0,221.1234567,178.25\n"));
        let reread = read_matrix_from(text.as_bytes(), origin()).expect("reread");
        assert_eq!(reread, matrix);
    }

    #[rstest]
    fn row_labels_must_follow_the_header() {
        let csv = ",A,B\nB,0,1\nA,1,0\n";
        let err = read_matrix_from(csv.as_bytes(), origin()).expect_err("swapped rows");
        assert!(matches!(err, DataError::BadCell { line: 2, .. }), "{err:?}");
    }

    #[rstest]
    fn non_numeric_cells_name_their_column() {
        let csv = ",A,B\nA,0,far\nB,1,0\n";
        let err = read_matrix_from(csv.as_bytes(), origin()).expect_err("bad cell");
        match err {
            DataError::BadCell { column, line, .. } => {
                assert_eq!(column, "B");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[rstest]
    fn ragged_rows_are_rejected() {
        let csv = ",A,B\nA,0\nB,1,0\n";
        let err = read_matrix_from(csv.as_bytes(), origin()).expect_err("ragged");
        assert!(matches!(err, DataError::Csv { .. }));
    }

    #[rstest]
    fn asymmetric_tables_are_invalid() {
        let csv = ",A,B\nA,0,1\nB,2,0\n";
        let err = read_matrix_from(csv.as_bytes(), origin()).expect_err("asymmetric");
        assert!(matches!(
            err,
            DataError::Invalid {
                source: InvalidInputError::Asymmetric { .. },
                ..
            }
        ));
    }

    #[rstest]
    fn missing_rows_leave_the_table_short() {
        let csv = ",A,B\nA,0,1\n";
        let err = read_matrix_from(csv.as_bytes(), origin()).expect_err("short");
        assert!(matches!(
            err,
            DataError::Invalid {
                source: InvalidInputError::LabelCountMismatch { .. },
                ..
            }
        ));
    }
}
