//! Normalized position of a target inside a validated cell.
//!
//! Each local coordinate is the perpendicular distance from the target to one
//! reference edge, divided by the nominal spacing: `y'` is measured from the top
//! edge `c3-c2` and `x'` from the left edge `c3-c0`. Because the cell may be
//! rotated relative to the projection axes, distances are taken to the infinite
//! line through each edge rather than along x or y.

use num_traits::Float;

use super::Corners;
use crate::{CellSpec, Error, Point, Result};

/// Target position in cell-local coordinates.
///
/// Both coordinates are in `[0, 1]` for a target inside the cell. Distances are
/// unsigned, so a target beyond an edge reflects back to a positive value;
/// [`LocalPosition::is_inside`] only reports values that exceed the unit range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPosition<T> {
    pub x_prime: T,
    pub y_prime: T,
}

impl<T: Float> LocalPosition<T> {
    pub fn new(x_prime: T, y_prime: T) -> Self {
        Self { x_prime, y_prime }
    }

    /// Whether both coordinates lie in `[0, 1]`
    pub fn is_inside(&self) -> bool {
        let unit = |v: T| v >= T::zero() && v <= T::one();
        unit(self.x_prime) && unit(self.y_prime)
    }
}

/// Distance from `p` to the foot of its perpendicular on the line through `a` and `b`.
///
/// Vertical and horizontal lines are measured directly along the other axis.
///
/// # Errors
/// * If `a` and `b` coincide, which leaves the line undefined
pub fn perpendicular_distance<T: Float>(a: Point<T>, b: Point<T>, p: Point<T>) -> Result<T> {
    if a == b {
        return Err(Error::Geometry(
            "reference edge has zero length".to_string(),
        ));
    }

    if a.x == b.x {
        return Ok((p.x - a.x).abs());
    }
    if a.y == b.y {
        return Ok((p.y - a.y).abs());
    }

    // Foot of the perpendicular: a + t * (b - a), t = (p - a).(b - a) / |b - a|^2
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / (dx * dx + dy * dy);
    let foot = Point::new(a.x + t * dx, a.y + t * dy);

    Ok(p.dist(&foot))
}

/// Solve the target's local coordinates within assigned corners.
///
/// # Errors
/// * If a reference edge has zero length
pub fn solve<K, T: Float>(
    corners: &Corners<'_, K, T>,
    target: Point<T>,
    cell: &CellSpec<T>,
) -> Result<LocalPosition<T>> {
    let (c0, c2, c3) = (
        corners.c0.position(),
        corners.c2.position(),
        corners.c3.position(),
    );

    let y_prime = perpendicular_distance(c3, c2, target)? / cell.spacing();
    let x_prime = perpendicular_distance(c3, c0, target)? / cell.spacing();

    Ok(LocalPosition { x_prime, y_prime })
}
