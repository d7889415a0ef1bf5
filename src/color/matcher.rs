//! Descriptor ranking
//!
//! Linear scan over the catalog descriptors, ordered by 1-D Wasserstein
//! distance to the query. At a few hundred records nothing faster is
//! warranted.

use crate::color::ColorDescriptor;
use crate::LogoRecord;

/// One ranked candidate: catalog index plus its distance to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub index: usize,
    pub distance: f64,
}

/// Wasserstein distance between two descriptors, treating each as an
/// equally-weighted sample of channel values: sort both, average the
/// absolute differences position by position.
pub fn wasserstein_distance(a: &ColorDescriptor, b: &ColorDescriptor) -> f64 {
    let mut a_sorted = *a.channels();
    let mut b_sorted = *b.channels();
    a_sorted.sort_by(f64::total_cmp);
    b_sorted.sort_by(f64::total_cmp);

    let sum: f64 = a_sorted
        .iter()
        .zip(b_sorted.iter())
        .map(|(x, y)| (x - y).abs())
        .sum();
    sum / a_sorted.len() as f64
}

/// Rank all records with a present descriptor by distance to `query`,
/// ascending, and keep the `k` closest.
///
/// The sort is stable, so equal distances keep catalog order. Records
/// without a descriptor never appear in the output.
pub fn rank(records: &[LogoRecord], query: &ColorDescriptor, k: usize) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            record.descriptor.as_ref().map(|descriptor| Ranked {
                index,
                distance: wasserstein_distance(descriptor, query),
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked.truncate(k);
    ranked
}
