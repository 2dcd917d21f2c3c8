use std::cmp::Ordering;

use tracing::{debug, info};

use super::models::Venue;

/// Picks the best-fit venue for a budget and headcount.
///
/// A venue is eligible when `cost <= budget` and `capacity >= guest_count`.
/// The cheapest eligible venue wins, ties go to the smallest capacity and any
/// remaining tie is resolved by input order (the earliest venue wins).
pub fn select_venue(venues: &[Venue], budget: f64, guest_count: usize) -> Option<&Venue> {
    let mut eligible = 0usize;
    let best = venues
        .iter()
        .filter(|venue| venue.is_eligible(budget, guest_count))
        .inspect(|venue| {
            eligible += 1;
            debug!(
                target: "venue.selector",
                venue = %venue.name,
                cost = venue.cost,
                capacity = venue.capacity,
                "eligible venue"
            );
        })
        .min_by(|a, b| compare_fit(a, b));

    match best {
        Some(venue) => info!(
            target: "venue.selector",
            budget,
            guest_count,
            eligible,
            venue = %venue.name,
            "venue selected"
        ),
        None => info!(
            target: "venue.selector",
            budget,
            guest_count,
            candidates = venues.len(),
            "no venue fits"
        ),
    }
    best
}

fn compare_fit(a: &Venue, b: &Venue) -> Ordering {
    // Eligible costs are never NaN, and -0.0 must tie with 0.0.
    a.cost
        .partial_cmp(&b.cost)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.capacity.cmp(&b.capacity))
}

/// A venue catalog paired with the selection rule.
#[derive(Debug, Clone, Default)]
pub struct VenueSelector {
    venues: Vec<Venue>,
}

impl VenueSelector {
    pub fn new(venues: Vec<Venue>) -> Self {
        Self { venues }
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn select(&self, budget: f64, guest_count: usize) -> Option<&Venue> {
        select_venue(&self.venues, budget, guest_count)
    }

    pub fn find(&self, name: &str) -> Option<&Venue> {
        self.venues.iter().find(|venue| venue.name == name)
    }
}
