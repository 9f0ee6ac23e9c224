//! Linear interpolation between two support sites.

use std::hash::Hash;

use num_traits::Float;

use super::Span;
use crate::align::{align, Alignment};
use crate::{Error, PlanarSite, Point, Result};

/// Linear interpolant over a two-site span, weighting by x distance.
#[derive(Debug, Clone, Copy)]
pub struct Linear1D<T> {
    span: Span<T>,
}

impl<T: Float> Linear1D<T> {
    pub fn new(span: Span<T>) -> Self {
        Self { span }
    }

    /// Weights `(w0, w1)` of the two sites for a target,
    /// `w0 = |x1 - x| / |x1 - x0|` and `w1 = |x - x0| / |x1 - x0|`.
    ///
    /// A target at either site gives exactly `(1, 0)` or `(0, 1)`.
    ///
    /// # Errors
    /// * If the target is outside the span
    #[inline]
    pub fn weights(&self, target: Point<T>) -> Result<(T, T)> {
        self.span.check_bounds(target)?;

        let (x0, x1) = (self.span.p0().x, self.span.p1().x);
        let width = (x1 - x0).abs();
        let w0 = (x1 - target.x).abs() / width;
        let w1 = (target.x - x0).abs() / width;

        Ok((w0, w1))
    }

    /// Evaluate the interpolant at a target for paired value sequences.
    ///
    /// # Errors
    /// * If the target is outside the span
    /// * If the value sequences and output differ in length
    pub fn eval(&self, target: Point<T>, v0: &[T], v1: &[T], out: &mut [T]) -> Result<()> {
        if v0.len() != out.len() || v1.len() != out.len() {
            return Err(Error::DataAlignment("Length mismatch".into()));
        }
        let (w0, w1) = self.weights(target)?;
        for i in 0..out.len() {
            out[i] = v0[i] * w0 + v1[i] * w1;
        }
        Ok(())
    }
}

/// Interpolate every aligned sample of two support sites onto a target.
///
/// The sites are used in the order given. Output keys follow `s0`
/// for positional alignment, or the shorter site for keyed alignment.
///
/// # Errors
/// * `Geometry` if the target position is not finite, or the sites share an x coordinate
/// * `OutOfBounds` if the target is outside the box the sites span
/// * `DataAlignment` if the samples cannot be aligned
pub fn interpolate_linear<K, T>(
    s0: &PlanarSite<K, T>,
    s1: &PlanarSite<K, T>,
    target: Point<T>,
    alignment: Alignment,
) -> Result<Vec<(K, T)>>
where
    K: Clone + Eq + Hash,
    T: Float,
{
    target.check_finite("target")?;
    let interp = Linear1D::new(Span::new(s0.position(), s1.position())?);
    let (w0, w1) = interp.weights(target)?;
    let aligned = align(&[s0, s1], alignment)?;

    tracing::debug!(
        s0 = s0.identity(),
        s1 = s1.identity(),
        w0 = w0.to_f64(),
        w1 = w1.to_f64(),
        n = aligned.len(),
        "linear interpolation"
    );

    let mut values = vec![T::zero(); aligned.len()];
    interp.eval(target, aligned.column(0), aligned.column(1), &mut values)?;

    Ok(aligned.keys().iter().cloned().zip(values).collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use crate::EventId;

    fn site(name: &str, x: f64, y: f64, vals: &[f64]) -> PlanarSite<usize, f64> {
        PlanarSite::positional(name, Point::new(x, y), vals).unwrap()
    }

    #[test]
    fn test_linear_midpoint() {
        let s0 = site("s0", 0.0, 0.0, &[10.0]);
        let s1 = site("s1", 10.0, 0.0, &[20.0]);

        let out = interpolate_linear(&s0, &s1, Point::new(5.0, 0.0), Alignment::Positional).unwrap();
        assert_eq!(out, vec![(0, 15.0)]);
    }

    #[test]
    fn test_linear_endpoint_reduction() {
        let mut rng = rng_fixed_seed();
        let v0 = hazard_curve(&mut rng, 50);
        let v1 = hazard_curve(&mut rng, 50);
        let s0 = site("s0", 381_234.5, 3_770_001.25, &v0);
        let s1 = site("s1", 372_117.75, 3_761_880.0, &v1);

        let at0 = interpolate_linear(&s0, &s1, s0.position(), Alignment::Positional).unwrap();
        let at1 = interpolate_linear(&s0, &s1, s1.position(), Alignment::Positional).unwrap();
        for i in 0..v0.len() {
            assert_eq!(at0[i].1, v0[i]);
            assert_eq!(at1[i].1, v1[i]);
        }
    }

    #[test]
    fn test_linear_is_linear_in_x() {
        let s0 = site("s0", 2.0, 0.0, &[-4.0, 1.0]);
        let s1 = site("s1", 6.0, 1.0, &[4.0, 1.0]);
        let interp = Linear1D::new(Span::new(s0.position(), s1.position()).unwrap());

        let mut out = [0.0; 1];
        for x in crate::utils::linspace(2.0, 6.0, 9) {
            interp.eval(Point::new(x, 0.5), &[-4.0], &[4.0], &mut out).unwrap();
            assert!((out[0] - (2.0 * x - 8.0)).abs() < 1e-12);
        }

        let mut out = [0.0; 2];
        interp
            .eval(Point::new(3.0, 0.5), &[-4.0, 1.0], &[4.0, 1.0], &mut out)
            .unwrap();
        assert!((out[0] + 2.0).abs() < 1e-12);
        assert!((out[1] - 1.0).abs() < 1e-12);

        assert!(matches!(
            interp.eval(Point::new(3.0, 0.5), &[-4.0], &[4.0, 1.0], &mut out),
            Err(Error::DataAlignment(_))
        ));
    }

    #[test]
    fn test_linear_errors() {
        let s0 = site("s0", 0.0, 0.0, &[1.0]);
        let s1 = site("s1", 10.0, 0.0, &[2.0]);
        let same_x = site("s2", 0.0, 10.0, &[3.0]);
        let longer = site("s3", 10.0, 0.0, &[2.0, 3.0]);

        // Degenerate axis is reported even though the target is on it
        assert!(matches!(
            interpolate_linear(&s0, &same_x, Point::new(0.0, 5.0), Alignment::Positional),
            Err(Error::Geometry(_))
        ));
        assert!(matches!(
            interpolate_linear(&s0, &s1, Point::new(11.0, 0.0), Alignment::Positional),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            interpolate_linear(&s0, &s1, Point::new(5.0, 0.1), Alignment::Positional),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            interpolate_linear(&s0, &longer, Point::new(5.0, 0.0), Alignment::Positional),
            Err(Error::DataAlignment(_))
        ));
    }

    #[test]
    fn test_linear_rejects_non_finite_target() {
        let s0 = site("s0", 0.0, 0.0, &[1.0]);
        let s1 = site("s1", 10.0, 0.0, &[2.0]);

        for target in [
            Point::new(f64::NAN, 0.0),
            Point::new(5.0, f64::NAN),
            Point::new(f64::INFINITY, 0.0),
        ] {
            assert!(matches!(
                interpolate_linear(&s0, &s1, target, Alignment::Positional),
                Err(Error::Geometry(_))
            ));
        }
    }

    #[test]
    fn test_linear_keyed() {
        let e = |r| EventId::new(1, r, 0);
        let s0 = PlanarSite::new(
            "s0",
            Point::new(0.0, 0.0),
            vec![(e(1), 1.0), (e(2), 2.0), (e(3), 3.0)],
        )
        .unwrap();
        let s1 = PlanarSite::new("s1", Point::new(4.0, 0.0), vec![(e(3), 7.0), (e(1), 5.0)]).unwrap();

        let out = interpolate_linear(&s0, &s1, Point::new(1.0, 0.0), Alignment::Keyed).unwrap();
        assert_eq!(out, vec![(e(3), 4.0), (e(1), 2.0)]);
    }
}
