//! Convenience methods for laying out grid cells and sweeping observation points.
use num_traits::Float;

use crate::Point;

/// Generates `n` evenly spaced values from start to stop,
/// including the endpoint. `n == 1` gives `[start]`, `n == 0` nothing.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let steps = T::from(n - 1).unwrap_or_else(T::nan);
            let dx: T = (stop - start) / steps;
            (0..n)
                .map(|i| start + T::from(i).unwrap_or_else(T::nan) * dx)
                .collect()
        }
    }
}

/// Corners of a square cell with side `spacing`, rotated by `angle` radians
/// counterclockwise about `origin`.
///
/// Points run counterclockwise from `origin`; for rotations smaller than
/// 45 degrees this matches the canonical corner order `[c0, c1, c2, c3]`.
pub fn square_cell<T: Float>(origin: Point<T>, spacing: T, angle: T) -> [Point<T>; 4] {
    let (s, c) = angle.sin_cos();
    let along = Point::new(spacing * c, spacing * s);
    let up = Point::new(-(spacing * s), spacing * c);

    let p1 = Point::new(origin.x + along.x, origin.y + along.y);
    [
        origin,
        p1,
        Point::new(p1.x + up.x, p1.y + up.y),
        Point::new(origin.x + up.x, origin.y + up.y),
    ]
}
