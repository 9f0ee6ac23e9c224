//! Canonical corner assignment for a 4-site support, and the check that
//! the assigned corners form a square cell of the expected size.
//!
//! Corners are labeled counterclockwise from the lower left:
//!
//! ```text
//!   c3 ---- c2
//!   |        |
//!   |        |
//!   c0 ---- c1
//! ```

use core::cmp::Ordering;

use itertools::Itertools;
use num_traits::Float;

use crate::{CellSpec, Error, PlanarSite, Result};

/// Labels used in diagnostics, indexed like [`Corners::as_array`]
const LABELS: [&str; 4] = ["c0", "c1", "c2", "c3"];

/// Four support sites assigned to canonical corner slots.
#[derive(Debug)]
pub struct Corners<'a, K, T> {
    pub c0: &'a PlanarSite<K, T>,
    pub c1: &'a PlanarSite<K, T>,
    pub c2: &'a PlanarSite<K, T>,
    pub c3: &'a PlanarSite<K, T>,
}

impl<'a, K, T: Float> Corners<'a, K, T> {
    /// Assign four sites to corners.
    ///
    /// Sites are stable-sorted by x. Of the two leftmost, the one with smaller y is `c0`
    /// and the other `c3`; of the two rightmost, the one with smaller y is `c1`
    /// and the other `c2`. On equal y, the later site in sorted order takes the lower slot.
    ///
    /// The result depends only on the sites' coordinates, not on the order they are given in,
    /// as long as no three share an x coordinate and no sorted pair shares a y coordinate.
    pub fn assign(sites: [&'a PlanarSite<K, T>; 4]) -> Self {
        let mut sorted = sites;
        // Positions are finite, so the comparison is total
        sorted.sort_by(|a, b| a.x().partial_cmp(&b.x()).unwrap_or(Ordering::Equal));

        let (c0, c3) = if sorted[0].y() < sorted[1].y() {
            (sorted[0], sorted[1])
        } else {
            (sorted[1], sorted[0])
        };
        let (c1, c2) = if sorted[2].y() < sorted[3].y() {
            (sorted[2], sorted[3])
        } else {
            (sorted[3], sorted[2])
        };

        tracing::debug!(
            c0 = c0.identity(),
            c1 = c1.identity(),
            c2 = c2.identity(),
            c3 = c3.identity(),
            "assigned corners"
        );

        Self { c0, c1, c2, c3 }
    }

    /// Assign corners from a slice of exactly four sites.
    ///
    /// # Errors
    /// * If the slice does not hold exactly four sites
    pub fn from_slice(sites: &'a [PlanarSite<K, T>]) -> Result<Self> {
        match sites {
            [a, b, c, d] => Ok(Self::assign([a, b, c, d])),
            _ => Err(Error::Geometry(format!(
                "bilinear interpolation needs exactly 4 support sites, got {}",
                sites.len()
            ))),
        }
    }

    /// Corners in slot order `[c0, c1, c2, c3]`
    pub fn as_array(&self) -> [&'a PlanarSite<K, T>; 4] {
        [self.c0, self.c1, self.c2, self.c3]
    }

    /// Check that the corners form a square with side `cell.spacing()`.
    ///
    /// All four edges must lie within the edge bounds of `cell`,
    /// and both diagonals within its diagonal bounds.
    ///
    /// # Errors
    /// * If any two corners coincide
    /// * If any edge or diagonal is out of bounds
    pub fn validate(&self, cell: &CellSpec<T>) -> Result<()> {
        let corners = self.as_array();

        for (i, j) in (0..4).tuple_combinations::<(usize, usize)>() {
            if corners[i].position() == corners[j].position() {
                return Err(Error::Geometry(format!(
                    "sites {} and {} share a position",
                    corners[i].identity(),
                    corners[j].identity()
                )));
            }
        }

        let edges = (0..4)
            .circular_tuple_windows::<(usize, usize)>()
            .map(|e| (e, cell.edge_bounds()));
        let diagonals = [(0, 2), (1, 3)]
            .into_iter()
            .map(|e| (e, cell.diagonal_bounds()));

        for ((i, j), (lo, hi)) in edges.chain(diagonals) {
            let d = corners[i].position().dist(&corners[j].position());
            if !(lo <= d && d <= hi) {
                let f = |v: T| v.to_f64().unwrap_or(f64::NAN);
                return Err(Error::Geometry(format!(
                    "sites do not form a square: {}-{} ({} to {}) has length {}, expected [{}, {}]",
                    LABELS[i],
                    LABELS[j],
                    corners[i].identity(),
                    corners[j].identity(),
                    f(d),
                    f(lo),
                    f(hi)
                )));
            }
        }

        Ok(())
    }
}
