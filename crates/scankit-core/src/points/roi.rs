//! Regions of interest
//!
//! A region of interest restricts which generated positions of an area scan
//! are actually visited. Regions are stored alongside scan path models in a
//! compound model rather than embedded in them: one physical region can
//! restrict several models, and keeping models region-agnostic simplifies
//! persistence.
//!
//! Geometric resolution of model-to-region pairings happens in the external
//! point-generator service; this module only defines the shapes and a local
//! `contains` test.

use serde::{Deserialize, Serialize};

/// Geometric region restricting an area scan path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Roi {
    /// A single point
    Point {
        /// Fast-axis coordinate
        x: f64,
        /// Slow-axis coordinate
        y: f64,
    },
    /// A circle
    Circular {
        /// Centre coordinates
        centre: (f64, f64),
        /// Radius
        radius: f64,
    },
    /// A rectangle, optionally rotated about its origin corner
    Rectangular {
        /// Origin corner coordinates
        origin: (f64, f64),
        /// Side lengths (width, height)
        lengths: (f64, f64),
        /// Rotation angle in radians, counter-clockwise
        angle: f64,
    },
    /// A closed polygon
    Polygonal {
        /// Ordered vertices; the closing edge back to the first vertex is
        /// implicit
        points: Vec<(f64, f64)>,
    },
}

impl Roi {
    /// Create a circular region
    pub fn circle(centre: (f64, f64), radius: f64) -> Self {
        Roi::Circular { centre, radius }
    }

    /// Create an axis-aligned or rotated rectangular region
    pub fn rectangle(origin: (f64, f64), lengths: (f64, f64), angle: f64) -> Self {
        Roi::Rectangular {
            origin,
            lengths,
            angle,
        }
    }

    /// Create a polygonal region from its vertices
    pub fn polygon(points: Vec<(f64, f64)>) -> Self {
        Roi::Polygonal { points }
    }

    /// Test whether a position falls inside this region.
    ///
    /// Boundaries count as inside. A point region matches only its own
    /// coordinates.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        match self {
            Roi::Point { x, y } => px == *x && py == *y,
            Roi::Circular { centre, radius } => {
                let dx = px - centre.0;
                let dy = py - centre.1;
                dx * dx + dy * dy <= radius * radius
            }
            Roi::Rectangular {
                origin,
                lengths,
                angle,
            } => {
                // Rotate the query point into the rectangle's frame
                let dx = px - origin.0;
                let dy = py - origin.1;
                let (sin, cos) = angle.sin_cos();
                let local_x = dx * cos + dy * sin;
                let local_y = -dx * sin + dy * cos;
                local_x >= 0.0 && local_x <= lengths.0 && local_y >= 0.0 && local_y <= lengths.1
            }
            Roi::Polygonal { points } => polygon_contains(points, px, py),
        }
    }
}

/// Even-odd rule point-in-polygon test.
fn polygon_contains(points: &[(f64, f64)], px: f64, py: f64) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_contains_centre_and_boundary() {
        let roi = Roi::circle((4.0, 6.0), 5.0);
        assert!(roi.contains(4.0, 6.0));
        assert!(roi.contains(9.0, 6.0));
        assert!(!roi.contains(9.1, 6.0));
    }

    #[test]
    fn rectangle_contains_respects_rotation() {
        // Unit square rotated 90 degrees CCW about the origin covers
        // x in [-1, 0], y in [0, 1]
        let roi = Roi::rectangle((0.0, 0.0), (1.0, 1.0), std::f64::consts::FRAC_PI_2);
        assert!(roi.contains(-0.5, 0.5));
        assert!(!roi.contains(0.5, 0.5));
    }

    #[test]
    fn polygon_contains_triangle() {
        let roi = Roi::polygon(vec![(5.0, 5.0), (5.0, 10.0), (10.0, 5.0)]);
        assert!(roi.contains(6.0, 6.0));
        assert!(!roi.contains(9.0, 9.0));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let roi = Roi::polygon(vec![(0.0, 0.0), (1.0, 1.0)]);
        assert!(!roi.contains(0.5, 0.5));
    }
}
