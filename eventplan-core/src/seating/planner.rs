use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::guest::Guest;
use crate::venue::Venue;

use super::chart::SeatingChart;
use super::error::{SeatingError, SeatingResult};

/// Which headcount ceiling seating enforces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Only the physical layout, `tables * seats_per_table`.
    #[default]
    Physical,
    /// The smaller of the declared capacity and the physical layout.
    Strictest,
}

impl CapacityPolicy {
    pub fn seat_limit(&self, venue: &Venue) -> usize {
        let physical = venue.total_seats();
        match self {
            CapacityPolicy::Physical => physical,
            CapacityPolicy::Strictest => physical.min(venue.capacity as usize),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeatingPlanner {
    venue: Venue,
    policy: CapacityPolicy,
}

impl SeatingPlanner {
    pub fn new(venue: Venue) -> Self {
        Self {
            venue,
            policy: CapacityPolicy::default(),
        }
    }

    pub fn with_capacity_policy(mut self, policy: CapacityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.policy
    }

    /// Seats `guests` table by table, keeping groups together where possible.
    ///
    /// Guests are bucketed by group tag (keeping their input order) and each
    /// table is filled from the largest remaining group first, ties going to
    /// the lexicographically smaller tag. A group larger than the free seats
    /// at a table fills them and carries its remaining members, still in
    /// order, over to the next table.
    ///
    /// An empty guest list or a venue without tables or seats yields an empty
    /// chart. Otherwise every table `1..=tables` appears in the chart.
    pub fn generate_seating(&self, guests: &[Guest]) -> SeatingResult<SeatingChart> {
        let venue = &self.venue;
        if guests.is_empty() || !venue.has_seating_layout() {
            return Ok(SeatingChart::new());
        }

        let seats = self.policy.seat_limit(venue);
        if guests.len() > seats {
            warn!(
                target: "seating.planner",
                venue = %venue.name,
                guests = guests.len(),
                seats,
                "not enough seats for all guests"
            );
            return Err(SeatingError::Capacity {
                guests: guests.len(),
                seats,
            });
        }

        let mut groups: HashMap<&str, VecDeque<&Guest>> = HashMap::new();
        for guest in guests {
            groups
                .entry(guest.group_tag.as_str())
                .or_default()
                .push_back(guest);
        }

        let mut pending: BTreeSet<(Reverse<usize>, &str)> = groups
            .iter()
            .map(|(tag, members)| (Reverse(members.len()), *tag))
            .collect();

        let seats_per_table = venue.seats_per_table as usize;
        let mut chart = SeatingChart::new();
        for table in 1..=venue.tables as usize {
            let mut seated = Vec::with_capacity(seats_per_table);
            let mut seats_left = seats_per_table;

            while seats_left > 0 {
                let Some((_, tag)) = pending.pop_first() else {
                    break;
                };
                let Some(members) = groups.get_mut(tag) else {
                    continue;
                };
                let take = seats_left.min(members.len());
                seated.extend(members.drain(..take).cloned());
                seats_left -= take;

                if !members.is_empty() {
                    debug!(
                        target: "seating.planner",
                        table,
                        group = tag,
                        seated = take,
                        remaining = members.len(),
                        "group continues at next table"
                    );
                    pending.insert((Reverse(members.len()), tag));
                }
            }

            debug!(
                target: "seating.planner",
                table,
                seated = seated.len(),
                free = seats_left,
                "table filled"
            );
            chart.seat_table(table, seated);
        }

        info!(
            target: "seating.planner",
            venue = %venue.name,
            guests = guests.len(),
            groups = groups.len(),
            tables = chart.table_count(),
            "seating generated"
        );
        Ok(chart)
    }
}

/// Seats `guests` at `venue` under the default [`CapacityPolicy`].
pub fn generate_seating(venue: &Venue, guests: &[Guest]) -> SeatingResult<SeatingChart> {
    SeatingPlanner::new(venue.clone()).generate_seating(guests)
}
