//! Interpolation of simulated-site values onto sites that were never simulated,
//! from two support sites (linear) or the four corners of a square grid cell (bilinear).
//!
//! Values are hazard curves, aligned by position across sites, or per-event
//! intensity measures, aligned by event key. Positions are planar coordinates
//! in meters, already projected by the caller.
//!
//! | Method                          | Support       | Checks                                        |
//! |---------------------------------|---------------|-----------------------------------------------|
//! | [`one_dim::linear`]             | 2 sites       | distinct x, target inside the spanned box     |
//! | [`bilinear`]                    | 4 sites       | square of nominal spacing, within tolerance   |
//!
//! Every failure aborts the whole request; no partial results are returned.
//! Keys that some corners lack are dropped from bilinear output and counted.
//!
//! # Example: Linear
//! ```rust
//! use siteinterp::{interpolate_linear, Alignment, PlanarSite, Point};
//!
//! let s0 = PlanarSite::<usize, f64>::positional("s0", Point::new(0.0, 0.0), &[10.0]).unwrap();
//! let s1 = PlanarSite::<usize, f64>::positional("s1", Point::new(10.0, 0.0), &[20.0]).unwrap();
//!
//! let out = interpolate_linear(&s0, &s1, Point::new(5.0, 0.0), Alignment::Positional).unwrap();
//! assert_eq!(out, vec![(0, 15.0)]);
//! ```
//!
//! # Example: Requests through collaborators
//! ```rust
//! use siteinterp::provider::{InMemoryProjector, InMemorySampleProvider, Selector};
//! use siteinterp::{EngineConfig, Estimator, InterpolationRequest, Point};
//!
//! let mut projector = InMemoryProjector::new();
//! let mut provider = InMemorySampleProvider::new();
//! let corners = [
//!     ("LB", 0.0, 0.0, 1.0),
//!     ("RB", 10_000.0, 0.0, 2.0),
//!     ("RT", 10_000.0, 10_000.0, 2.0),
//!     ("LT", 0.0, 10_000.0, 1.0),
//! ];
//! for (name, x, y, p) in corners {
//!     projector.insert(name, Point::new(x, y));
//!     provider.insert_curve(name, 2.0, vec![p]);
//! }
//! projector.insert("MID", Point::new(5_000.0, 5_000.0));
//!
//! let config = EngineConfig { compare_target: false, ..Default::default() };
//! let estimator = Estimator::new(&projector, &provider, config).unwrap();
//! let request = InterpolationRequest::new("MID", ["LB", "RB", "RT", "LT"], Selector::default());
//! let est = estimator.estimate(&request).unwrap();
//! assert_eq!(est.values[0].1, 1.5);
//! ```
// These "needless" range loops read closer to the formulas
#![allow(clippy::needless_range_loop)]

pub mod align;
pub use align::{align, AlignedSamples, Alignment};

pub mod bilinear;
pub use bilinear::{interpolate_bilinear, BilinearEstimate, Corners, LocalPosition};

pub mod config;
pub use config::{CellSpec, EngineConfig};

mod error;
pub use error::{Error, Result};

pub mod estimate;
pub use estimate::{Estimate, Estimator, InterpolationRequest};

pub mod one_dim;
pub use one_dim::{linear::interpolate_linear, linear::Linear1D, Span};

pub mod provider;
pub use provider::{CoordinateProjector, SampleProvider, Selector};

pub mod quality;
pub use quality::FitQuality;

mod site;
pub use site::{EventId, PlanarSite, Point};

pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
