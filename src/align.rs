//! Reconcile sample keys across support sites.
//!
//! Hazard curves arrive aligned index-for-index from the upstream query, and only
//! need their lengths checked. Event intensity measures carry explicit keys that
//! differ between sites, and are intersected.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use itertools::Itertools;
use num_traits::Float;

use crate::{Error, PlanarSite, Result};

/// How sample sequences of different sites are matched up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Sequences are already aligned by position and must have equal length
    #[default]
    Positional,
    /// Sequences are matched by key; only keys present at every support site survive
    Keyed,
}

/// Sample values of several sites, matched up key by key.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSamples<K, T> {
    keys: Vec<K>,
    /// One column of values per site, each the same length as `keys`
    columns: Vec<Vec<T>>,
    dropped: usize,
}

impl<K, T: Copy> AlignedSamples<K, T> {
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Values of site `i`, in key order
    pub fn column(&self, i: usize) -> &[T] {
        &self.columns[i]
    }

    /// Number of keys present at some sites but not all of them
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Match up the sample sequences of `sites`.
///
/// Positional: output keys are those of the first site.
///
/// Keyed: output follows the key order of the site with the fewest samples
/// (the first such site on ties), filtered to keys present at every site.
///
/// # Errors
/// * If no sites are given
/// * Positional: if sequence lengths differ
/// * Keyed: if a key repeats within one site, or no key is shared by all sites
pub fn align<K, T>(sites: &[&PlanarSite<K, T>], alignment: Alignment) -> Result<AlignedSamples<K, T>>
where
    K: Clone + Eq + Hash,
    T: Float,
{
    let first = sites
        .first()
        .ok_or_else(|| Error::DataAlignment("no sites to align".into()))?;

    match alignment {
        Alignment::Positional => {
            let n = first.samples().len();
            if let Some(bad) = sites.iter().find(|s| s.samples().len() != n) {
                return Err(Error::DataAlignment(format!(
                    "site {} has {} samples, expected {} to match site {}",
                    bad.identity(),
                    bad.samples().len(),
                    n,
                    first.identity()
                )));
            }

            let keys = first.samples().iter().map(|(k, _)| k.clone()).collect();
            let columns = sites
                .iter()
                .map(|s| s.samples().iter().map(|&(_, v)| v).collect())
                .collect();

            Ok(AlignedSamples {
                keys,
                columns,
                dropped: 0,
            })
        }
        Alignment::Keyed => {
            let lookups = sites
                .iter()
                .map(|s| key_lookup(s))
                .collect::<Result<Vec<_>>>()?;

            // `sites` is non-empty, so the fallback is never taken
            let reference = sites
                .iter()
                .position_min_by_key(|s| s.samples().len())
                .unwrap_or(0);

            let keys: Vec<K> = sites[reference]
                .samples()
                .iter()
                .map(|(k, _)| k)
                .filter(|k| lookups.iter().all(|l| l.contains_key(k)))
                .cloned()
                .collect();

            if keys.is_empty() {
                return Err(Error::DataAlignment(format!(
                    "no key is shared by all of {}",
                    sites.iter().map(|s| s.identity()).join(", ")
                )));
            }

            let union: HashSet<&K> = lookups.iter().flat_map(|l| l.keys().copied()).collect();
            let dropped = union.len() - keys.len();

            let columns = lookups
                .iter()
                .map(|l| keys.iter().map(|k| l[k]).collect())
                .collect();

            Ok(AlignedSamples {
                keys,
                columns,
                dropped,
            })
        }
    }
}

fn key_lookup<K, T>(site: &PlanarSite<K, T>) -> Result<HashMap<&K, T>>
where
    K: Eq + Hash,
    T: Float,
{
    let mut lookup = HashMap::with_capacity(site.samples().len());
    for (k, v) in site.samples() {
        if lookup.insert(k, *v).is_some() {
            return Err(Error::DataAlignment(format!(
                "site {} repeats a sample key",
                site.identity()
            )));
        }
    }
    Ok(lookup)
}
