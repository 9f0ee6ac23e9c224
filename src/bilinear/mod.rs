//! Bilinear interpolation inside a square cell of four support sites.
//!
//! The support is assigned to canonical corners (see [`corners`]), checked against the
//! nominal cell size, and the target is located in cell-local coordinates
//! `(x', y')` (see [`local`]). Each aligned key is then evaluated as
//!
//! ```text
//! R1 = c0 * (1 - x') + c1 * x'
//! R2 = c2 * x' + c3 * (1 - x')
//! v  = R1 * y' + R2 * (1 - y')
//! ```
//!
//! which recovers `c0` at `(0, 1)`, `c1` at `(1, 1)`, `c2` at `(1, 0)` and `c3` at `(0, 0)`.
//!
//! ```rust
//! use siteinterp::{interpolate_bilinear, Alignment, CellSpec, PlanarSite, Point};
//!
//! let corner = |name: &str, x: f64, y: f64, v: f64| {
//!     PlanarSite::<usize, f64>::positional(name, Point::new(x, y), &[v]).unwrap()
//! };
//! let support = [
//!     corner("LB", 0.0, 0.0, 1.0),
//!     corner("RB", 10_000.0, 0.0, 2.0),
//!     corner("RT", 10_000.0, 10_000.0, 2.0),
//!     corner("LT", 0.0, 10_000.0, 1.0),
//! ];
//!
//! let est = interpolate_bilinear(
//!     &support,
//!     Point::new(5_000.0, 5_000.0),
//!     &CellSpec::default(),
//!     Alignment::Positional,
//! )
//! .unwrap();
//! assert_eq!(est.values(), &[(0, 1.5)]);
//! ```

pub mod corners;
pub mod local;

use std::hash::Hash;

use num_traits::Float;

pub use corners::Corners;
pub use local::LocalPosition;

use crate::align::{align, Alignment};
use crate::{CellSpec, PlanarSite, Point, Result};

/// Output of a bilinear interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct BilinearEstimate<K, T> {
    values: Vec<(K, T)>,
    dropped_keys: usize,
    local: LocalPosition<T>,
    corners: [String; 4],
}

impl<K, T: Copy> BilinearEstimate<K, T> {
    /// Interpolated value for each aligned key
    pub fn values(&self) -> &[(K, T)] {
        &self.values
    }

    pub fn into_values(self) -> Vec<(K, T)> {
        self.values
    }

    /// Number of keys present at some corners but not all of them
    pub fn dropped_keys(&self) -> usize {
        self.dropped_keys
    }

    /// Target position in cell-local coordinates
    pub fn local(&self) -> LocalPosition<T> {
        self.local
    }

    /// Identities of the sites assigned to `[c0, c1, c2, c3]`
    pub fn corners(&self) -> &[String; 4] {
        &self.corners
    }
}

/// Evaluate the bilinear weighting for corner values `[c0, c1, c2, c3]`.
#[inline]
pub fn eval_one<T: Float>(c: [T; 4], local: LocalPosition<T>) -> T {
    let LocalPosition { x_prime, y_prime } = local;
    let r1 = c[0] * (T::one() - x_prime) + c[1] * x_prime;
    let r2 = c[2] * x_prime + c[3] * (T::one() - x_prime);
    r1 * y_prime + r2 * (T::one() - y_prime)
}

/// Interpolate every aligned sample of a 4-site support onto a target.
///
/// The support may be given in any order. Keyed alignment intersects the keys of all
/// four sites; keys missing at any corner are dropped and counted in the result.
///
/// # Errors
/// * `Geometry` if the target position is not finite
/// * `Geometry` if the support is not four sites forming a square of `cell.spacing()`
///   within `cell.tolerance()`
/// * `DataAlignment` if the samples cannot be aligned
pub fn interpolate_bilinear<K, T>(
    support: &[PlanarSite<K, T>],
    target: Point<T>,
    cell: &CellSpec<T>,
    alignment: Alignment,
) -> Result<BilinearEstimate<K, T>>
where
    K: Clone + Eq + Hash,
    T: Float,
{
    target.check_finite("target")?;
    let corners = Corners::from_slice(support)?;
    corners.validate(cell)?;

    let local = local::solve(&corners, target, cell)?;
    tracing::debug!(
        x_prime = local.x_prime.to_f64(),
        y_prime = local.y_prime.to_f64(),
        "solved local position"
    );
    if !local.is_inside() {
        tracing::warn!(
            x_prime = local.x_prime.to_f64(),
            y_prime = local.y_prime.to_f64(),
            "target lies outside the support cell"
        );
    }

    let aligned = align(&corners.as_array(), alignment)?;
    if aligned.dropped() > 0 {
        tracing::warn!(
            dropped = aligned.dropped(),
            kept = aligned.len(),
            "dropped keys not shared by all corners"
        );
    }

    let values = (0..aligned.len())
        .map(|i| {
            let c = [0, 1, 2, 3].map(|j| aligned.column(j)[i]);
            (aligned.keys()[i].clone(), eval_one(c, local))
        })
        .collect();

    Ok(BilinearEstimate {
        values,
        dropped_keys: aligned.dropped(),
        local,
        corners: corners.as_array().map(|s| s.identity().to_string()),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use crate::utils::square_cell;
    use crate::{Error, EventId};

    fn square(values: [&[f64]; 4]) -> Vec<PlanarSite<usize, f64>> {
        square_cell(Point::new(0.0, 0.0), 10_000.0, 0.0)
            .iter()
            .zip(values)
            .enumerate()
            .map(|(i, (&p, v))| PlanarSite::positional(format!("c{i}"), p, v).unwrap())
            .collect()
    }

    #[test]
    fn test_eval_one_corner_reduction() {
        let mut rng = rng_fixed_seed();
        for _ in 0..100 {
            let c: Vec<f64> = randn(&mut rng, 4);
            let c = [c[0], c[1], c[2], c[3]];
            assert_eq!(eval_one(c, LocalPosition::new(0.0, 1.0)), c[0]);
            assert_eq!(eval_one(c, LocalPosition::new(1.0, 1.0)), c[1]);
            assert_eq!(eval_one(c, LocalPosition::new(1.0, 0.0)), c[2]);
            assert_eq!(eval_one(c, LocalPosition::new(0.0, 0.0)), c[3]);
        }
    }

    #[test]
    fn test_center_of_square() {
        let support = square([&[1.0], &[2.0], &[2.0], &[1.0]]);
        let est = interpolate_bilinear(
            &support,
            Point::new(5_000.0, 5_000.0),
            &CellSpec::default(),
            Alignment::Positional,
        )
        .unwrap();

        assert_eq!(est.local(), LocalPosition::new(0.5, 0.5));
        assert_eq!(est.values(), &[(0, 1.5)]);
        assert_eq!(est.dropped_keys(), 0);
        assert_eq!(est.corners(), &["c0", "c1", "c2", "c3"].map(String::from));
    }

    #[test]
    fn test_corner_reduction_end_to_end() {
        let mut rng = rng_fixed_seed();
        let vals: Vec<Vec<f64>> = (0..4).map(|_| randn(&mut rng, 20)).collect();
        let support = square([&vals[0], &vals[1], &vals[2], &vals[3]]);

        // Support in scrambled order must not change anything
        let scrambled = vec![
            support[2].clone(),
            support[0].clone(),
            support[3].clone(),
            support[1].clone(),
        ];

        for (i, site) in support.iter().enumerate() {
            let est = interpolate_bilinear(
                &scrambled,
                site.position(),
                &CellSpec::default(),
                Alignment::Positional,
            )
            .unwrap();
            let got: Vec<f64> = est.values().iter().map(|&(_, v)| v).collect();
            assert_eq!(got, vals[i]);
        }
    }

    /// A plane is reproduced exactly by bilinear weighting, for any rotation of the cell.
    #[test]
    fn test_plane_in_rotated_cell() {
        let mut rng = rng_fixed_seed();
        let plane = |p: Point<f64>| 3.0 + 2e-4 * p.x - 5e-5 * p.y;

        for _ in 0..20 {
            let r: Vec<f64> = randn(&mut rng, 3);
            let angle = (r[0] - 0.5) * 1.4;
            let pts = square_cell(Point::new(380_000.0, 3_750_000.0), 10_000.0, angle);
            let support: Vec<PlanarSite<usize, f64>> = pts
                .iter()
                .enumerate()
                .map(|(i, &p)| PlanarSite::positional(format!("s{i}"), p, &[plane(p)]).unwrap())
                .collect();

            let (c, s) = (angle.cos(), angle.sin());
            let (u, v) = (r[1], r[2]);
            let target = Point::new(
                pts[0].x + 10_000.0 * (u * c - v * s),
                pts[0].y + 10_000.0 * (u * s + v * c),
            );

            let est =
                interpolate_bilinear(&support, target, &CellSpec::default(), Alignment::Positional)
                    .unwrap();
            assert!((est.values()[0].1 - plane(target)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_keyed_drops_unshared_events() {
        let e = |r| EventId::new(7, r, 0);
        let pts = square_cell(Point::new(0.0, 0.0), 10_000.0, 0.0);
        let samples = [
            vec![(e(1), 1.0), (e(2), 10.0)],
            vec![(e(1), 2.0), (e(3), 20.0)],
            vec![(e(3), 30.0), (e(1), 2.0), (e(2), 20.0)],
            vec![(e(1), 1.0)],
        ];
        let support: Vec<PlanarSite<EventId, f64>> = pts
            .iter()
            .zip(samples)
            .enumerate()
            .map(|(i, (&p, s))| PlanarSite::new(format!("s{i}"), p, s).unwrap())
            .collect();

        let est = interpolate_bilinear(
            &support,
            Point::new(5_000.0, 5_000.0),
            &CellSpec::default(),
            Alignment::Keyed,
        )
        .unwrap();
        assert_eq!(est.values(), &[(e(1), 1.5)]);
        assert_eq!(est.dropped_keys(), 2);
    }

    #[test]
    fn test_errors_abort_whole_request() {
        let support = square([&[1.0, 2.0], &[2.0], &[2.0], &[1.0]]);
        assert!(matches!(
            interpolate_bilinear(
                &support,
                Point::new(5_000.0, 5_000.0),
                &CellSpec::default(),
                Alignment::Positional
            ),
            Err(Error::DataAlignment(_))
        ));

        let support = square([&[1.0], &[2.0], &[2.0], &[1.0]]);
        let tight = CellSpec::new(12_000.0, 0.01).unwrap();
        assert!(matches!(
            interpolate_bilinear(&support, Point::new(5_000.0, 5_000.0), &tight, Alignment::Positional),
            Err(Error::Geometry(_))
        ));

        assert!(matches!(
            interpolate_bilinear(
                &support[..3],
                Point::new(5_000.0, 5_000.0),
                &CellSpec::default(),
                Alignment::Positional
            ),
            Err(Error::Geometry(_))
        ));
    }

    #[test]
    fn test_non_finite_target_rejected() {
        let support = square([&[1.0], &[2.0], &[2.0], &[1.0]]);
        for target in [
            Point::new(f64::INFINITY, 0.0),
            Point::new(5_000.0, f64::NAN),
            Point::new(f64::NEG_INFINITY, f64::NAN),
        ] {
            assert!(matches!(
                interpolate_bilinear(&support, target, &CellSpec::default(), Alignment::Positional),
                Err(Error::Geometry(_))
            ));
        }
    }
}
