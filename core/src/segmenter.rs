//! Archetype segmentation.
//!
//! Pipeline, applied to a whole batch:
//!   1. Normalize raw rows into `Reservation`s.
//!   2. Rule-based `classify` per row (first matching rule wins).
//!   3. Tour-group override: large same-day company|channel blocks.
//!   4. Optional `Refiner` over rows still labeled `Other`.

use crate::{
    archetype::Archetype,
    reservation::{RawReservation, Reservation},
    types::{Day, MISSING_TEXT},
};
use rand::{seq::index::sample, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::collections::HashMap;

/// Reservations sharing arrival date and company|channel at or above this
/// count are relabeled TourGroup.
pub const TOUR_GROUP_THRESHOLD: usize = 10;

/// Rule-based archetype for one reservation.
pub fn classify(r: &Reservation) -> Archetype {
    let adults = r.adults;
    let children = r.children;
    let group = adults.saturating_add(children);
    let los = r.length_of_stay;
    let channel = r.channel.to_lowercase();
    let company = r.company.to_lowercase();
    let room_type = r.room_type.to_lowercase();
    let is_weekday = matches!(r.arrival_weekday, Some(0..=4));

    let has_company = !company.is_empty() && company != MISSING_TEXT;
    if adults == 1
        && children == 0
        && los <= 3
        && is_weekday
        && (channel.contains("corp") || has_company)
    {
        return Archetype::SoloBusiness;
    }
    // The "" alternative matches every channel; kept as observed.
    if adults == 2
        && children == 0
        && (r.is_weekend_arrival || los >= 2)
        && ["ota", "direct", ""].iter().any(|k| channel.contains(k))
    {
        return Archetype::LeisureCouple;
    }
    if children >= 1 || group >= 3 || ["suite", "family"].iter().any(|k| room_type.contains(k)) {
        return Archetype::FamilyWithKids;
    }
    Archetype::Other
}

fn tour_key(r: &Reservation) -> String {
    let company = match r.company.as_str() {
        MISSING_TEXT | "None" => "",
        other => other,
    };
    format!("{company}|{}", r.channel)
}

/// Relabel every reservation in a (arrival date, company|channel) block of
/// at least `threshold` rows as TourGroup. Rows without an arrival date are
/// never grouped. Returns how many rows were relabeled.
pub fn detect_tour_groups(reservations: &mut [Reservation], threshold: usize) -> usize {
    let mut counts: HashMap<(Day, String), usize> = HashMap::new();
    for r in reservations.iter() {
        if let Some(d) = r.arrival_date {
            *counts.entry((d, tour_key(r))).or_insert(0) += 1;
        }
    }

    let mut relabeled = 0;
    for r in reservations.iter_mut() {
        let Some(d) = r.arrival_date else { continue };
        if counts.get(&(d, tour_key(r))).copied().unwrap_or(0) >= threshold {
            r.archetype = Archetype::TourGroup;
            relabeled += 1;
        }
    }
    if relabeled > 0 {
        log::debug!("segmenter: {relabeled} reservations relabeled TourGroup");
    }
    relabeled
}

// ── Refinement ───────────────────────────────────────────────────────────────

/// Post-classification hook for rows the rules left as `Other`.
///
/// Receives only those rows and returns one label per row, in order.
/// Returning `None` leaves the batch untouched.
pub trait Refiner {
    fn name(&self) -> &'static str;

    fn refine(&self, others: &[&Reservation]) -> Option<Vec<Archetype>>;
}

/// Feature vector used for clustering:
/// (length of stay, group size, arrival weekday, adults, children).
fn features(r: &Reservation) -> [f64; 5] {
    [
        r.length_of_stay as f64,
        f64::from(r.group_size),
        r.arrival_weekday.map(f64::from).unwrap_or(0.0),
        f64::from(r.adults),
        f64::from(r.children),
    ]
}

const GROUP_SIZE: usize = 1;
const LENGTH_OF_STAY: usize = 0;

/// Lloyd's k-means over the clustering features, with seeded initial
/// centroids so a batch always refines the same way.
#[derive(Debug, Clone)]
pub struct KMeansRefiner {
    pub n_clusters: usize,
    pub seed: u64,
    pub max_iterations: usize,
}

impl Default for KMeansRefiner {
    fn default() -> Self {
        Self {
            n_clusters: 4,
            seed: 42,
            max_iterations: 100,
        }
    }
}

fn sq_dist(a: &[f64; 5], b: &[f64; 5]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest(point: &[f64; 5], centroids: &[[f64; 5]]) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = sq_dist(point, c);
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}

impl KMeansRefiner {
    /// Cluster assignment per point.
    pub fn cluster(&self, points: &[[f64; 5]]) -> Vec<usize> {
        let mut rng = Pcg64Mcg::seed_from_u64(self.seed);
        let k = self.n_clusters.min(points.len());
        if k == 0 {
            return vec![0; points.len()];
        }
        let mut centroids: Vec<[f64; 5]> = sample(&mut rng, points.len(), k)
            .into_iter()
            .map(|i| points[i])
            .collect();

        let mut labels: Vec<usize> = points.iter().map(|p| nearest(p, &centroids)).collect();
        for _ in 0..self.max_iterations {
            let mut sums = vec![[0.0; 5]; centroids.len()];
            let mut counts = vec![0usize; centroids.len()];
            for (p, &l) in points.iter().zip(&labels) {
                counts[l] += 1;
                for (s, x) in sums[l].iter_mut().zip(p) {
                    *s += x;
                }
            }
            for (k, c) in centroids.iter_mut().enumerate() {
                if counts[k] > 0 {
                    for (ci, s) in c.iter_mut().zip(&sums[k]) {
                        *ci = s / counts[k] as f64;
                    }
                }
            }

            let next: Vec<usize> = points.iter().map(|p| nearest(p, &centroids)).collect();
            if next == labels {
                break;
            }
            labels = next;
        }
        labels
    }

    /// Map a cluster to a label from its member means.
    fn label_for(members: &[[f64; 5]]) -> Archetype {
        if members.is_empty() {
            return Archetype::Other;
        }
        let n = members.len() as f64;
        let avg_group = members.iter().map(|p| p[GROUP_SIZE]).sum::<f64>() / n;
        let avg_los = members.iter().map(|p| p[LENGTH_OF_STAY]).sum::<f64>() / n;
        if avg_group >= 3.0 {
            Archetype::FamilyWithKids
        } else if avg_los <= 2.0 {
            Archetype::SoloBusiness
        } else {
            Archetype::LeisureCouple
        }
    }
}

impl Refiner for KMeansRefiner {
    fn name(&self) -> &'static str {
        "kmeans"
    }

    fn refine(&self, others: &[&Reservation]) -> Option<Vec<Archetype>> {
        if self.n_clusters == 0 || others.len() < self.n_clusters {
            return None;
        }
        let points: Vec<[f64; 5]> = others.iter().map(|r| features(r)).collect();
        let labels = self.cluster(&points);

        let mapping: Vec<Archetype> = (0..self.n_clusters)
            .map(|k| {
                let members: Vec<[f64; 5]> = points
                    .iter()
                    .zip(&labels)
                    .filter(|&(_, &l)| l == k)
                    .map(|(p, _)| *p)
                    .collect();
                Self::label_for(&members)
            })
            .collect();

        Some(labels.into_iter().map(|l| mapping[l]).collect())
    }
}

// ── Segmenter ────────────────────────────────────────────────────────────────

/// Batch enrichment: normalization, rules, tour groups, optional refiner.
#[derive(Default)]
pub struct Segmenter {
    refiner: Option<Box<dyn Refiner>>,
    tour_group_threshold: Option<usize>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_refiner(mut self, refiner: Box<dyn Refiner>) -> Self {
        self.refiner = Some(refiner);
        self
    }

    pub fn with_tour_group_threshold(mut self, threshold: usize) -> Self {
        self.tour_group_threshold = Some(threshold);
        self
    }

    pub fn enrich(&self, rows: &[RawReservation]) -> Vec<Reservation> {
        let reservations = rows
            .iter()
            .enumerate()
            .map(|(i, raw)| Reservation::from_raw(raw, i))
            .collect();
        self.classify_all(reservations)
    }

    /// Classify already-normalized reservations (labels are recomputed).
    pub fn classify_all(&self, mut reservations: Vec<Reservation>) -> Vec<Reservation> {
        for r in reservations.iter_mut() {
            r.archetype = classify(r);
        }
        detect_tour_groups(
            &mut reservations,
            self.tour_group_threshold.unwrap_or(TOUR_GROUP_THRESHOLD),
        );
        if let Some(refiner) = &self.refiner {
            self.apply_refiner(refiner.as_ref(), &mut reservations);
        }
        reservations
    }

    fn apply_refiner(&self, refiner: &dyn Refiner, reservations: &mut [Reservation]) {
        let idx: Vec<usize> = reservations
            .iter()
            .enumerate()
            .filter(|(_, r)| r.archetype == Archetype::Other)
            .map(|(i, _)| i)
            .collect();
        let others: Vec<&Reservation> = idx.iter().map(|&i| &reservations[i]).collect();

        let Some(labels) = refiner.refine(&others) else {
            log::debug!("segmenter: {} refiner skipped ({} rows)", refiner.name(), idx.len());
            return;
        };
        if labels.len() != idx.len() {
            log::warn!(
                "segmenter: {} refiner returned {} labels for {} rows, ignoring",
                refiner.name(),
                labels.len(),
                idx.len()
            );
            return;
        }
        let mut relabeled = 0;
        for (i, label) in idx.into_iter().zip(labels) {
            if label != Archetype::Other {
                relabeled += 1;
            }
            reservations[i].archetype = label;
        }
        log::info!("segmenter: {} refiner relabeled {relabeled} rows", refiner.name());
    }
}
