//! Points CSV: `,id,name,lat,lon,location`.
//!
//! The leading unnamed index column is optional on input and always written
//! on output. `id` defaults to the one-based row number and `location`
//! defaults to the point name.

use std::io::{BufReader, Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use salesman_core::Point;
use serde::Deserialize;

use crate::{DataError, fs};

const REQUIRED_COLUMNS: [&str; 3] = ["name", "lat", "lon"];

#[derive(Debug, Deserialize)]
struct PointRow {
    #[serde(default)]
    id: Option<u64>,
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    location: Option<String>,
}

/// Load validated points from the CSV file at `path`.
///
/// # Errors
///
/// See [`read_points_from`]; additionally [`DataError::Open`] when the file
/// cannot be opened.
pub fn read_points(path: &Utf8Path) -> Result<Vec<Point>, DataError> {
    let file = fs::open_utf8_file(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_points_from(BufReader::new(file), path)
}

/// Load validated points from `reader`; `origin` names the source in errors.
///
/// # Errors
///
/// [`DataError::MissingColumn`] when `name`, `lat` or `lon` is absent,
/// [`DataError::Csv`] for unreadable rows and [`DataError::Invalid`] for
/// out-of-range coordinates.
///
/// # Examples
/// ```
/// use camino::Utf8Path;
/// use salesman_data::read_points_from;
///
/// let csv = ",id,name,lat,lon,location\n0,7,Delhi,28.6139,77.209,\"Delhi, India\"\n";
/// let points = read_points_from(csv.as_bytes(), Utf8Path::new("inline.csv"))?;
/// assert_eq!(points[0].id(), 7);
/// assert_eq!(points[0].display_label(), "Delhi, India");
/// # Ok::<(), salesman_data::DataError>(())
/// ```
pub fn read_points_from<R: Read>(reader: R, origin: &Utf8Path) -> Result<Vec<Point>, DataError> {
    let csv_error = |source| DataError::Csv {
        path: origin.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|header| header == *column))
    {
        return Err(DataError::MissingColumn {
            path: origin.to_path_buf(),
            column,
        });
    }

    let mut points = Vec::new();
    for (row_number, row) in (1_u64..).zip(reader.deserialize::<PointRow>()) {
        let row = row.map_err(csv_error)?;
        let label = row.location.unwrap_or_else(|| row.name.clone());
        let point = Point::new(row.id.unwrap_or(row_number), row.name, row.lat, row.lon, label)
            .map_err(|source| DataError::Invalid {
                path: origin.to_path_buf(),
                source,
            })?;
        points.push(point);
    }
    log::debug!("read {} points from {origin}", points.len());
    Ok(points)
}

/// Write `points` to a new CSV file at `path`, creating parent directories.
///
/// # Errors
///
/// [`DataError::Open`] when the file cannot be created and
/// [`DataError::Csv`] when writing fails.
pub fn write_points(path: &Utf8Path, points: &[Point]) -> Result<(), DataError> {
    let file = fs::create_utf8_file(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_points_to(file, points, path)
}

/// Write `points` as CSV to `writer`; `origin` names the sink in errors.
///
/// # Errors
///
/// [`DataError::Csv`] when a record cannot be written or flushed.
pub fn write_points_to<W: Write>(
    writer: W,
    points: &[Point],
    origin: &Utf8Path,
) -> Result<(), DataError> {
    let path: Utf8PathBuf = origin.to_path_buf();
    let csv_error = |source| DataError::Csv {
        path: path.clone(),
        source,
    };
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(["", "id", "name", "lat", "lon", "location"])
        .map_err(csv_error)?;
    for (index, point) in points.iter().enumerate() {
        writer
            .write_record([
                index.to_string(),
                point.id().to_string(),
                point.name().to_owned(),
                point.latitude().to_string(),
                point.longitude().to_string(),
                point.display_label().to_owned(),
            ])
            .map_err(csv_error)?;
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

    fn origin() -> &'static Utf8Path {
        Utf8Path::new("points.csv")
    }

    #[rstest]
    fn index_column_is_optional() {
        let csv = "name,lat,lon\nAgra,27.1767,78.0081\nJaipur,26.9124,75.7873\n";
        let points = read_points_from(csv.as_bytes(), origin()).expect("points");
        assert_eq!(points.len(), 2);
        let jaipur = points.last().expect("second point");
        assert_eq!(jaipur.id(), 2);
        assert_eq!(jaipur.display_label(), "Jaipur");
    }

    #[rstest]
    fn blank_locations_fall_back_to_the_name() {
        let csv = ",id,name,lat,lon,location\n0,4,Agra,27.1767,78.0081,\n";
        let points = read_points_from(csv.as_bytes(), origin()).expect("points");
        let agra = points.first().expect("one point");
        assert_eq!(agra.display_label(), "Agra");
    }

    #[rstest]
    #[case::no_lat("name,lon\nAgra,78.0\n", "lat")]
    #[case::no_name("lat,lon\n27.0,78.0\n", "name")]
    fn missing_columns_are_named(#[case] csv: &str, #[case] expected: &str) {
        let err = read_points_from(csv.as_bytes(), origin()).expect_err("missing column");
        match err {
            DataError::MissingColumn { column, .. } => assert_eq!(column, expected),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[rstest]
    fn out_of_range_coordinates_are_rejected() {
        let csv = "name,lat,lon\nNowhere,95.0,10.0\n";
        let err = read_points_from(csv.as_bytes(), origin()).expect_err("latitude");
        assert!(matches!(err, DataError::Invalid { .. }));
        assert_eq!(err.to_string(), "invalid data in points.csv");
    }

    #[rstest]
    fn non_numeric_coordinates_are_csv_errors() {
        let csv = "name,lat,lon\nAgra,north,78.0\n";
        let err = read_points_from(csv.as_bytes(), origin()).expect_err("bad number");
        assert!(matches!(err, DataError::Csv { .. }));
    }

    #[rstest]
    fn written_files_carry_the_index_column() {
        let points = vec![
            Point::new(11, "Agra", 27.1767, 78.0081, "Agra, India").expect("point"),
            Point::new(12, "Jaipur", 26.9124, 75.7873, "Jaipur, India").expect("point"),
        ];
        let mut buffer = Vec::new();
        write_points_to(&mut buffer, &points, origin()).expect("written");
        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(
            text,
            ",id,name,lat,lon,location\n\
             0,11,Agra,27.1767,78.0081,\"Agra, India\"\n\
             1,12,Jaipur,26.9124,75.7873,\"Jaipur, India\"\n"
        );
        let reread = read_points_from(text.as_bytes(), origin()).expect("reread");
        assert_eq!(reread, points);
    }
}
