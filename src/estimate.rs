//! Request orchestration: resolve sites through injected collaborators,
//! then run the linear or bilinear path depending on the support size.

use std::collections::HashSet;
use std::hash::Hash;

use num_traits::Float;

use crate::bilinear::{interpolate_bilinear, LocalPosition};
use crate::one_dim::linear::interpolate_linear;
use crate::provider::{CoordinateProjector, SampleProvider, Selector};
use crate::quality::{fit_quality, FitQuality};
use crate::{CellSpec, EngineConfig, Error, PlanarSite, Point, Result};

/// Sites and samples to interpolate.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationRequest {
    /// Site whose values are estimated
    pub target: String,
    /// Exactly 2 (linear) or 4 (bilinear) support sites
    pub support: Vec<String>,
    pub selector: Selector,
}

impl InterpolationRequest {
    pub fn new<S: Into<String>>(
        target: impl Into<String>,
        support: impl IntoIterator<Item = S>,
        selector: Selector,
    ) -> Self {
        Self {
            target: target.into(),
            support: support.into_iter().map(Into::into).collect(),
            selector,
        }
    }
}

/// Result of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate<K, T> {
    /// Interpolated value for each aligned key
    pub values: Vec<(K, T)>,
    /// Keys present at some support sites but not all of them
    pub dropped_keys: usize,
    /// Target position in cell-local coordinates, for 4-site supports
    pub local: Option<LocalPosition<T>>,
    /// Agreement with the target's own hazard curve, when it was compared
    pub quality: Option<FitQuality<T>>,
}

/// Runs interpolation requests against a projector and a sample provider.
pub struct Estimator<'a, P, S, T> {
    projector: &'a P,
    provider: &'a S,
    config: EngineConfig,
    cell: CellSpec<T>,
}

impl<'a, P, S, T> Estimator<'a, P, S, T>
where
    T: Float,
    P: CoordinateProjector<T>,
    S: SampleProvider<T>,
    S::Key: Clone + Eq + Hash,
{
    /// # Errors
    /// * `Config` if the configuration is invalid
    pub fn new(projector: &'a P, provider: &'a S, config: EngineConfig) -> Result<Self> {
        let cell = config.cell_spec()?;
        Ok(Self {
            projector,
            provider,
            config,
            cell,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Estimate the selected samples at the request's target.
    ///
    /// With `compare_target` set and a hazard-curve selector, the target's own curve
    /// is also fetched and compared against the estimate. A target without a curve
    /// of its own still gets its estimate, with no `quality`.
    ///
    /// # Errors
    /// * `Upstream` if any site or its samples cannot be resolved
    /// * `Geometry` if the support is not 2 or 4 distinct sites in a valid layout
    /// * `OutOfBounds` if the target is outside a 2-site support
    /// * `DataAlignment` if the samples cannot be aligned
    pub fn estimate(&self, request: &InterpolationRequest) -> Result<Estimate<S::Key, T>> {
        let mut seen = HashSet::new();
        if let Some(dup) = request.support.iter().find(|s| !seen.insert(s.as_str())) {
            return Err(Error::Geometry(format!("support site {dup} listed twice")));
        }

        let target = self.projector.resolve_planar_position(&request.target)?;
        let support = request
            .support
            .iter()
            .map(|name| self.resolve(name, &request.selector))
            .collect::<Result<Vec<_>>>()?;
        let alignment = request.selector.alignment();

        let (values, dropped_keys, local) = match support.as_slice() {
            [s0, s1] => (interpolate_linear(s0, s1, target, alignment)?, 0, None),
            [_, _, _, _] => {
                let est = interpolate_bilinear(&support, target, &self.cell, alignment)?;
                let (dropped, local) = (est.dropped_keys(), est.local());
                (est.into_values(), dropped, Some(local))
            }
            _ => {
                return Err(Error::Geometry(format!(
                    "need 2 or 4 support sites, got {}",
                    support.len()
                )))
            }
        };

        let quality = match request.selector {
            Selector::HazardCurve { .. } if self.config.compare_target => {
                match self.provider.fetch_samples(&request.target, &request.selector) {
                    Ok(actual) => {
                        let floor = T::from(self.config.percent_diff_floor).unwrap_or_else(T::zero);
                        fit_quality(&actual, &values, floor)
                    }
                    Err(e) => {
                        tracing::warn!(site = %request.target, error = %e, "target not compared");
                        None
                    }
                }
            }
            _ => None,
        };

        tracing::info!(
            site = %request.target,
            support = request.support.len(),
            values = values.len(),
            dropped_keys,
            max_percent_diff = quality.and_then(|q| q.max_percent_diff.to_f64()),
            "interpolated target"
        );

        Ok(Estimate {
            values,
            dropped_keys,
            local,
            quality,
        })
    }

    fn resolve(&self, site: &str, selector: &Selector) -> Result<PlanarSite<S::Key, T>> {
        let position: Point<T> = self.projector.resolve_planar_position(site)?;
        let samples = self.provider.fetch_samples(site, selector)?;
        PlanarSite::new(site, position, samples)
    }
}
