//! Request-scoped site values: planar positions and their sample sequences.

use core::fmt;

use num_traits::Float;

use crate::{Error, Result};

/// A location in a common planar projection, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T: Float> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point
    #[inline]
    pub fn dist_sq(&self, other: &Point<T>) -> T {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn dist(&self, other: &Point<T>) -> T {
        self.dist_sq(other).sqrt()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// # Errors
    /// * `Geometry` naming `what` if either coordinate is NaN or infinite
    pub(crate) fn check_finite(&self, what: &str) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(Error::Geometry(format!("{what} has a non-finite position")))
        }
    }
}

/// Composite key identifying one simulated event:
/// a rupture variation of a rupture of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId {
    pub source_id: u32,
    pub rupture_id: u32,
    pub rup_var_id: u32,
}

impl EventId {
    pub fn new(source_id: u32, rupture_id: u32, rup_var_id: u32) -> Self {
        Self {
            source_id,
            rupture_id,
            rup_var_id,
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.source_id, self.rupture_id, self.rup_var_id
        )
    }
}

/// A site with a known position and, for support sites, its sample sequence.
///
/// Keys are either an implicit position along a hazard curve (`usize`)
/// or an explicit composite key such as [`EventId`]. Sites are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarSite<K, T> {
    identity: String,
    position: Point<T>,
    samples: Vec<(K, T)>,
}

impl<K, T: Float> PlanarSite<K, T> {
    /// Build a site.
    ///
    /// # Errors
    /// * If either coordinate is NaN or infinite
    pub fn new(identity: impl Into<String>, position: Point<T>, samples: Vec<(K, T)>) -> Result<Self> {
        let identity = identity.into();
        position.check_finite(&format!("site {identity}"))?;

        Ok(Self {
            identity,
            position,
            samples,
        })
    }

    /// Build a site whose samples are keyed by their position in `values`.
    pub fn positional(identity: impl Into<String>, position: Point<T>, values: &[T]) -> Result<Self>
    where
        K: From<usize>,
    {
        let samples = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (K::from(i), v))
            .collect();
        Self::new(identity, position, samples)
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn position(&self) -> Point<T> {
        self.position
    }

    #[inline]
    pub fn x(&self) -> T {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> T {
        self.position.y
    }

    pub fn samples(&self) -> &[(K, T)] {
        &self.samples
    }
}
