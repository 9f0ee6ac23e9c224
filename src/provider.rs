//! Collaborators that supply site positions and sample sequences.
//!
//! The engine never performs I/O itself. A caller injects a [`CoordinateProjector`]
//! and a [`SampleProvider`] for each request; both are consulted once per
//! participating site, and may be backed by a database, files, or memory.

use std::collections::HashMap;

use num_traits::Float;

use crate::{Alignment, Error, EventId, Point, Result};

/// Default hazard-curve period, in seconds
pub const DEFAULT_PERIOD: f64 = 2.0;

/// Which events to fetch intensity measures for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventFilter {
    /// Every event recorded for the site
    #[default]
    All,
    /// All rupture variations of one rupture
    Rupture { source_id: u32, rupture_id: u32 },
    /// A single rupture variation
    Event {
        source_id: u32,
        rupture_id: u32,
        rup_var_id: u32,
    },
}

impl EventFilter {
    /// Build a filter from optional parts.
    ///
    /// Accepts nothing, a source and rupture, or a source, rupture and rupture variation.
    ///
    /// # Errors
    /// * For any other combination of parts
    pub fn from_parts(
        source_id: Option<u32>,
        rupture_id: Option<u32>,
        rup_var_id: Option<u32>,
    ) -> Result<Self> {
        match (source_id, rupture_id, rup_var_id) {
            (None, None, None) => Ok(EventFilter::All),
            (Some(source_id), Some(rupture_id), None) => Ok(EventFilter::Rupture {
                source_id,
                rupture_id,
            }),
            (Some(source_id), Some(rupture_id), Some(rup_var_id)) => Ok(EventFilter::Event {
                source_id,
                rupture_id,
                rup_var_id,
            }),
            parts => Err(Error::InvalidSelector(format!(
                "expected no event parts, source+rupture, or source+rupture+rup_var; got {parts:?}"
            ))),
        }
    }

    /// Whether an event passes the filter
    pub fn matches(&self, event: &EventId) -> bool {
        match *self {
            EventFilter::All => true,
            EventFilter::Rupture {
                source_id,
                rupture_id,
            } => event.source_id == source_id && event.rupture_id == rupture_id,
            EventFilter::Event {
                source_id,
                rupture_id,
                rup_var_id,
            } => {
                event.source_id == source_id
                    && event.rupture_id == rupture_id
                    && event.rup_var_id == rup_var_id
            }
        }
    }
}

/// What to fetch for a site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selector {
    /// Hazard curve at a spectral period, aligned by position across sites
    HazardCurve { period: f64 },
    /// Per-event intensity measures, keyed by event
    EventIm(EventFilter),
}

impl Default for Selector {
    fn default() -> Self {
        Selector::HazardCurve {
            period: DEFAULT_PERIOD,
        }
    }
}

impl Selector {
    /// How sequences fetched with this selector are matched across sites
    pub fn alignment(&self) -> Alignment {
        match self {
            Selector::HazardCurve { .. } => Alignment::Positional,
            Selector::EventIm(_) => Alignment::Keyed,
        }
    }
}

/// Maps a site identity to planar coordinates.
pub trait CoordinateProjector<T: Float> {
    /// # Errors
    /// * `Upstream` if the site is unknown or cannot be projected
    fn resolve_planar_position(&self, site: &str) -> Result<Point<T>>;
}

/// Supplies a site's ordered sample sequence.
///
/// Hazard-curve sequences for the same selector must come back in the same
/// order and with the same length for every site; the engine checks the length
/// but relies on the provider for the order.
pub trait SampleProvider<T: Float> {
    type Key;

    /// # Errors
    /// * `Upstream` on lookup failure
    fn fetch_samples(&self, site: &str, selector: &Selector) -> Result<Vec<(Self::Key, T)>>;
}

/// Projector backed by a table of known positions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjector<T> {
    positions: HashMap<String, Point<T>>,
}

impl<T: Float> InMemoryProjector<T> {
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
        }
    }

    pub fn insert(&mut self, site: impl Into<String>, position: Point<T>) -> &mut Self {
        self.positions.insert(site.into(), position);
        self
    }
}

impl<T: Float> FromIterator<(String, Point<T>)> for InMemoryProjector<T> {
    fn from_iter<I: IntoIterator<Item = (String, Point<T>)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

impl<T: Float> CoordinateProjector<T> for InMemoryProjector<T> {
    fn resolve_planar_position(&self, site: &str) -> Result<Point<T>> {
        self.positions
            .get(site)
            .copied()
            .ok_or_else(|| Error::upstream(site, "unknown site"))
    }
}

/// Sample provider backed by in-memory tables.
///
/// Hazard curves are stored per site and period; event intensity measures are
/// stored per site and filtered by [`EventFilter`] on fetch.
#[derive(Debug, Clone, Default)]
pub struct InMemorySampleProvider<T> {
    curves: HashMap<(String, u64), Vec<T>>,
    events: HashMap<String, Vec<(EventId, T)>>,
}

impl<T: Float> InMemorySampleProvider<T> {
    pub fn new() -> Self {
        Self {
            curves: HashMap::new(),
            events: HashMap::new(),
        }
    }

    /// Store a hazard curve's probabilities for a site at a period
    pub fn insert_curve(&mut self, site: impl Into<String>, period: f64, probs: Vec<T>) -> &mut Self {
        self.curves.insert((site.into(), period.to_bits()), probs);
        self
    }

    /// Store a site's per-event intensity measures
    pub fn insert_events(
        &mut self,
        site: impl Into<String>,
        events: Vec<(EventId, T)>,
    ) -> &mut Self {
        self.events.insert(site.into(), events);
        self
    }
}

impl<T: Float> SampleProvider<T> for InMemorySampleProvider<T> {
    type Key = SampleKey;

    fn fetch_samples(&self, site: &str, selector: &Selector) -> Result<Vec<(SampleKey, T)>> {
        match selector {
            Selector::HazardCurve { period } => self
                .curves
                .get(&(site.to_string(), period.to_bits()))
                .map(|probs| {
                    probs
                        .iter()
                        .enumerate()
                        .map(|(i, &p)| (SampleKey::Index(i), p))
                        .collect()
                })
                .ok_or_else(|| Error::upstream(site, format!("no hazard curve at period {period}"))),
            Selector::EventIm(filter) => self
                .events
                .get(site)
                .map(|events| {
                    events
                        .iter()
                        .filter(|(e, _)| filter.matches(e))
                        .map(|&(e, v)| (SampleKey::Event(e), v))
                        .collect()
                })
                .ok_or_else(|| Error::upstream(site, "no intensity measures")),
        }
    }
}

/// Key of a sample from either kind of sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SampleKey {
    /// Position along a hazard curve
    Index(usize),
    /// Simulated event
    Event(EventId),
}

impl From<usize> for SampleKey {
    fn from(i: usize) -> Self {
        SampleKey::Index(i)
    }
}

impl From<EventId> for SampleKey {
    fn from(e: EventId) -> Self {
        SampleKey::Event(e)
    }
}
