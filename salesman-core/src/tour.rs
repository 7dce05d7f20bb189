//! Closed tours and their leg labels.

use std::fmt;

use crate::Point;

/// Format a leg distance the way map labels show it.
///
/// # Examples
/// ```
/// assert_eq!(salesman_core::format_leg(1145.5721), "1145.57 K.M.");
/// ```
#[must_use]
pub fn format_leg(km: f64) -> String {
    format!("{km:.2} K.M.")
}

/// A closed visiting order with per-leg distances.
///
/// `stops` has `n + 1` entries and ends where it starts; `legs[k]` is the
/// distance from `stops[k]` to `stops[k + 1]`. Tours are built by
/// [`crate::build_tour`] and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tour {
    order: Vec<usize>,
    stops: Vec<Point>,
    legs: Vec<f64>,
    total_km: f64,
}

impl Tour {
    pub(crate) fn from_parts(order: Vec<usize>, stops: Vec<Point>, legs: Vec<f64>) -> Self {
        let total_km = legs.iter().sum();
        Self {
            order,
            stops,
            legs,
            total_km,
        }
    }

    /// Point indices in visiting order, without the closing repeat.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Points in visiting order, closing on the first.
    #[must_use]
    pub fn stops(&self) -> &[Point] {
        &self.stops
    }

    /// Leg distances in kilometres.
    #[must_use]
    pub fn legs(&self) -> &[f64] {
        &self.legs
    }

    /// Sum of the legs in kilometres.
    #[must_use]
    pub const fn total_km(&self) -> f64 {
        self.total_km
    }

    /// Number of distinct points visited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the tour visits nothing. Never true for planned tours.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Leg distances formatted as map labels.
    #[must_use]
    pub fn leg_labels(&self) -> Vec<String> {
        self.legs.iter().copied().map(format_leg).collect()
    }

    /// Stop names in visiting order, closing on the first.
    #[must_use]
    pub fn stop_names(&self) -> Vec<&str> {
        self.stops.iter().map(Point::name).collect()
    }
}

/// `A -> B -> C -> A`
impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stop_names().join(" -> "))
    }
}
