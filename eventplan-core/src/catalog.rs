//! Built-in sample data used when no catalog or guest list is supplied.

use crate::guest::Guest;
use crate::venue::Venue;

const SAMPLE_GROUPS: [&str; 4] = ["family", "friends", "neighbors", "coworkers"];

pub fn sample_venues() -> Vec<Venue> {
    vec![
        Venue::new("Community Hall", 1500.0, 40, 5, 8),
        Venue::new("Garden Hall", 2500.0, 60, 8, 8),
        Venue::new("Grand Ballroom", 5000.0, 120, 15, 8),
    ]
}

/// Generates `Guest1..GuestN`, rotating through the sample groups so that
/// guest `i` gets `SAMPLE_GROUPS[i % 4]`.
pub fn generate_guests(count: usize) -> Vec<Guest> {
    (1..=count)
        .map(|index| {
            Guest::new(
                format!("Guest{index}"),
                SAMPLE_GROUPS[index % SAMPLE_GROUPS.len()],
            )
        })
        .collect()
}
