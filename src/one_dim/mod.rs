//! Two-site interpolation, which weights the pair along the x axis only
//! and requires the target to sit inside the box the pair spans.

pub mod linear;

use num_traits::Float;

use crate::{Error, Point, Result};

/// Extrapolation flag for one axis of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extrap {
    Inside,
    OutsideLow,
    OutsideHigh,
}

impl Extrap {
    #[inline]
    fn classify<T: Float>(v: T, a: T, b: T) -> Self {
        match v {
            v if v < a.min(b) => Extrap::OutsideLow,
            v if v > a.max(b) => Extrap::OutsideHigh,
            _ => Extrap::Inside,
        }
    }
}

/// The axis-aligned box spanned by two support sites, in the order they were given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span<T> {
    p0: Point<T>,
    p1: Point<T>,
}

impl<T: Float> Span<T> {
    /// # Errors
    /// * If the two sites share an x coordinate, which leaves no axis to weight along
    pub fn new(p0: Point<T>, p1: Point<T>) -> Result<Self> {
        if p0.x == p1.x {
            return Err(Error::Geometry(format!(
                "support sites share x = {}; zero-length interpolation axis",
                p0.x.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(Self { p0, p1 })
    }

    pub fn p0(&self) -> Point<T> {
        self.p0
    }

    pub fn p1(&self) -> Point<T> {
        self.p1
    }

    /// Classify a target on each axis like (x, y).
    #[inline]
    pub fn locate(&self, target: Point<T>) -> (Extrap, Extrap) {
        (
            Extrap::classify(target.x, self.p0.x, self.p1.x),
            Extrap::classify(target.y, self.p0.y, self.p1.y),
        )
    }

    /// Check whether a target lies inside the span on both axes, bounds included.
    ///
    /// # Errors
    /// * If the target is outside on either axis
    pub fn check_bounds(&self, target: Point<T>) -> Result<()> {
        match self.locate(target) {
            (Extrap::Inside, Extrap::Inside) => Ok(()),
            _ => {
                let f = |v: T| v.to_f64().unwrap_or(f64::NAN);
                Err(Error::OutOfBounds {
                    x: f(target.x),
                    y: f(target.y),
                    x_lo: f(self.p0.x.min(self.p1.x)),
                    x_hi: f(self.p0.x.max(self.p1.x)),
                    y_lo: f(self.p0.y.min(self.p1.y)),
                    y_hi: f(self.p0.y.max(self.p1.y)),
                })
            }
        }
    }
}
