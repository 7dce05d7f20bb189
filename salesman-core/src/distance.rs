//! Great-circle distances and the symmetric matrix the formulation reads.
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_KM`]. The radius is the polar radius and is fixed.

use geo::Coord;

use crate::{InvalidInputError, MIN_NODES, Point};

/// Sphere radius used by [`distance`], in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6357.0;

/// Relative tolerance when checking externally supplied matrices for symmetry.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Haversine distance between two WGS84 coordinates, in kilometres.
#[must_use]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let half_dlat = (lat2 - lat1) / 2.0;
    let half_dlon = (to.x - from.x).to_radians() / 2.0;

    let a = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();
    c * EARTH_RADIUS_KM
}

/// Great-circle distance between two points, in kilometres.
///
/// Returns `0.0` for points at the same coordinates.
///
/// # Examples
/// ```
/// use salesman_core::{Point, distance};
///
/// let a = Point::new(1, "A", 0.0, 0.0, "")?;
/// let b = Point::new(2, "B", 0.0, 1.0, "")?;
/// let km = distance(&a, &b);
/// assert!((km - 110.95).abs() < 0.01);
/// assert_eq!(distance(&a, &a), 0.0);
/// # Ok::<(), salesman_core::InvalidInputError>(())
/// ```
#[must_use]
pub fn distance(a: &Point, b: &Point) -> f64 {
    haversine_km(a.location(), b.location())
}

/// Square table of distances between labelled places.
///
/// Invariants, enforced by every constructor: at least [`MIN_NODES`] rows,
/// one row per label, one entry per label in each row, zero diagonal,
/// symmetric, finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistanceMatrix {
    labels: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Compute the matrix for `points`, labelled by point name.
    ///
    /// Fails with [`InvalidInputError::TooFewPoints`] when `points` holds
    /// fewer than [`MIN_NODES`] places.
    pub fn build(points: &[Point]) -> Result<Self, InvalidInputError> {
        let n = points.len();
        if n < MIN_NODES {
            return Err(InvalidInputError::TooFewPoints {
                required: MIN_NODES,
                found: n,
            });
        }

        let mut rows = vec![vec![0.0; n]; n];
        for (i, from) in points.iter().enumerate() {
            for (j, to) in points.iter().enumerate().skip(i + 1) {
                let km = distance(from, to);
                rows[i][j] = km;
                rows[j][i] = km;
            }
        }

        let labels = points.iter().map(|p| p.name().to_owned()).collect();
        log::debug!("built {n}x{n} haversine distance matrix");
        Ok(Self { labels, rows })
    }

    /// Validate an externally supplied matrix.
    ///
    /// # Examples
    /// ```
    /// use salesman_core::DistanceMatrix;
    ///
    /// let matrix = DistanceMatrix::from_rows(
    ///     vec!["A".into(), "B".into()],
    ///     vec![vec![0.0, 3.5], vec![3.5, 0.0]],
    /// )?;
    /// assert_eq!(matrix.get(0, 1), Some(3.5));
    ///
    /// let asymmetric = DistanceMatrix::from_rows(
    ///     vec!["A".into(), "B".into()],
    ///     vec![vec![0.0, 3.5], vec![4.0, 0.0]],
    /// );
    /// assert!(asymmetric.is_err());
    /// # Ok::<(), salesman_core::InvalidInputError>(())
    /// ```
    pub fn from_rows(labels: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, InvalidInputError> {
        if labels.len() != rows.len() {
            return Err(InvalidInputError::LabelCountMismatch {
                labels: labels.len(),
                rows: rows.len(),
            });
        }
        let n = rows.len();
        if n < MIN_NODES {
            return Err(InvalidInputError::TooFewPoints {
                required: MIN_NODES,
                found: n,
            });
        }
        for (row, values) in rows.iter().enumerate() {
            if values.len() != n {
                return Err(InvalidInputError::NotSquare {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() {
                    return Err(InvalidInputError::NonFiniteDistance { row, col });
                }
                if value < 0.0 {
                    return Err(InvalidInputError::NegativeDistance { row, col, value });
                }
            }
        }
        for i in 0..n {
            let diagonal = rows[i][i];
            if diagonal != 0.0 {
                return Err(InvalidInputError::NonZeroDiagonal {
                    index: i,
                    value: diagonal,
                });
            }
            for j in (i + 1)..n {
                let forward = rows[i][j];
                let backward = rows[j][i];
                let scale = forward.abs().max(backward.abs()).max(1.0);
                if (forward - backward).abs() > SYMMETRY_TOLERANCE * scale {
                    return Err(InvalidInputError::Asymmetric {
                        row: i,
                        col: j,
                        forward,
                        backward,
                    });
                }
            }
        }
        Ok(Self { labels, rows })
    }

    /// Number of places, `n`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false`; constructors reject matrices below [`MIN_NODES`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distance from place `from` to place `to`, if both indices exist.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        self.rows.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Row labels in index order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Matrix rows in index order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Check that row `i` is labelled with the name of `points[i]`.
    pub fn aligned_with(&self, points: &[Point]) -> Result<(), InvalidInputError> {
        if points.len() != self.len() {
            return Err(InvalidInputError::LabelCountMismatch {
                labels: self.len(),
                rows: points.len(),
            });
        }
        for (index, (label, point)) in self.labels.iter().zip(points).enumerate() {
            if label != point.name() {
                return Err(InvalidInputError::LabelMismatch {
                    index,
                    expected: point.name().to_owned(),
                    found: label.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Build the distance matrix over `points`.
///
/// Shorthand for [`DistanceMatrix::build`].
pub fn build_matrix(points: &[Point]) -> Result<DistanceMatrix, InvalidInputError> {
    DistanceMatrix::build(points)
}
