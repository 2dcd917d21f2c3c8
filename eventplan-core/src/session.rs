use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::catalog::{generate_guests, sample_venues};
use crate::config::EventConfig;
use crate::guest::{Guest, GuestList};
use crate::ledger::{Task, TaskLedger};
use crate::seating::{CapacityPolicy, SeatingChart, SeatingError, SeatingPlanner};
use crate::venue::{Venue, VenueSelector};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("add guests first")]
    NoGuests,
    #[error("select a venue first")]
    NoVenueSelected,
    #[error("venue {0} not found")]
    VenueNotFound(String),
    #[error(transparent)]
    Seating(#[from] SeatingError),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// State of one planning session: the guest list, venue catalog and choice,
/// and the preparation task ledger.
#[derive(Debug, Clone)]
pub struct EventSession {
    guests: GuestList,
    selector: VenueSelector,
    selected: Option<Venue>,
    ledger: TaskLedger,
    capacity_policy: CapacityPolicy,
}

impl Default for EventSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSession {
    pub fn new() -> Self {
        Self {
            guests: GuestList::new(),
            selector: VenueSelector::new(sample_venues()),
            selected: None,
            ledger: TaskLedger::new(),
            capacity_policy: CapacityPolicy::default(),
        }
    }

    pub fn from_config(config: &EventConfig) -> Self {
        Self {
            guests: GuestList::new(),
            selector: VenueSelector::new(config.catalog()),
            selected: None,
            ledger: TaskLedger::new().with_undo_policy(config.ledger.undo_policy),
            capacity_policy: config.seating.capacity_policy,
        }
    }

    pub fn with_venues(mut self, venues: Vec<Venue>) -> Self {
        self.selector = VenueSelector::new(venues);
        self.selected = None;
        self
    }

    pub fn guests(&self) -> &GuestList {
        &self.guests
    }

    pub fn venues(&self) -> &[Venue] {
        self.selector.venues()
    }

    pub fn selected_venue(&self) -> Option<&Venue> {
        self.selected.as_ref()
    }

    pub fn ledger(&self) -> &TaskLedger {
        &self.ledger
    }

    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.capacity_policy
    }

    /// Appends `count` generated guests and resets the catalog to the sample
    /// venues. Returns the number of guests added.
    pub fn load_sample_data(&mut self, count: usize) -> usize {
        self.guests.extend(generate_guests(count));
        self.selector = VenueSelector::new(sample_venues());
        self.selected = None;
        info!(
            target: "session",
            added = count,
            guests = self.guests.count(),
            venues = self.selector.venues().len(),
            "sample data loaded"
        );
        count
    }

    pub fn add_guest(&mut self, guest: Guest) {
        self.guests.add(guest);
    }

    pub fn extend_guests(&mut self, guests: impl IntoIterator<Item = Guest>) {
        self.guests.extend(guests);
    }

    pub fn remove_guest(&mut self, name: &str) -> bool {
        self.guests.remove(name)
    }

    pub fn find_guest(&self, name: &str) -> Option<&Guest> {
        self.guests.find(name)
    }

    /// Picks the best venue for the current headcount. A previous selection
    /// is cleared when nothing fits.
    pub fn select_venue(&mut self, budget: f64) -> SessionResult<Option<&Venue>> {
        let guest_count = self.guests.count();
        if guest_count == 0 {
            return Err(SessionError::NoGuests);
        }
        self.selected = self.selector.select(budget, guest_count).cloned();
        Ok(self.selected.as_ref())
    }

    /// Selects a catalog venue by name, bypassing the budget rule.
    pub fn choose_venue(&mut self, name: &str) -> SessionResult<&Venue> {
        let venue = self
            .selector
            .find(name)
            .cloned()
            .ok_or_else(|| SessionError::VenueNotFound(name.to_string()))?;
        Ok(&*self.selected.insert(venue))
    }

    pub fn generate_seating(&self) -> SessionResult<SeatingChart> {
        let venue = self
            .selected
            .as_ref()
            .ok_or(SessionError::NoVenueSelected)?;
        if self.guests.is_empty() {
            return Err(SessionError::NoGuests);
        }
        let planner =
            SeatingPlanner::new(venue.clone()).with_capacity_policy(self.capacity_policy);
        Ok(planner.generate_seating(self.guests.all())?)
    }

    pub fn add_task(&mut self, task: impl Into<Task>) -> usize {
        self.ledger.add_task(task);
        self.ledger.remaining_task_count()
    }

    pub fn execute_next_task(&mut self) -> Option<Task> {
        self.ledger.execute_next_task()
    }

    pub fn undo_last_task(&mut self) -> Option<Task> {
        self.ledger.undo_last_task()
    }

    pub fn remaining_tasks(&self) -> usize {
        self.ledger.remaining_task_count()
    }

    pub fn summary(&self) -> EventSummary {
        EventSummary {
            guest_count: self.guests.count(),
            groups: self.guests.group_counts(),
            venue: self.selected.clone(),
            pending_tasks: self.ledger.remaining_task_count(),
            completed_tasks: self.ledger.completed_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub guest_count: usize,
    pub groups: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    pub pending_tasks: usize,
    pub completed_tasks: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_requires_guests() {
        let mut session = EventSession::new();
        assert!(matches!(
            session.select_venue(2000.0),
            Err(SessionError::NoGuests)
        ));
    }

    #[test]
    fn seating_requires_selected_venue() {
        let mut session = EventSession::new();
        session.add_guest(Guest::new("Alice", "family"));
        assert!(matches!(
            session.generate_seating(),
            Err(SessionError::NoVenueSelected)
        ));
    }

    #[test]
    fn failed_selection_clears_previous_choice() {
        let mut session = EventSession::new();
        session.load_sample_data(5);
        assert!(session.select_venue(2000.0).unwrap().is_some());
        assert!(session.select_venue(100.0).unwrap().is_none());
        assert!(session.selected_venue().is_none());
    }

    #[test]
    fn choose_unknown_venue() {
        let mut session = EventSession::new();
        let err = session.choose_venue("Moon Base").unwrap_err();
        assert_eq!(err.to_string(), "venue Moon Base not found");
    }

    #[test]
    fn capacity_error_passes_through() {
        let mut session =
            EventSession::new().with_venues(vec![Venue::new("Booth", 10.0, 10, 1, 2)]);
        session.extend_guests(generate_guests(3));
        session.choose_venue("Booth").unwrap();
        let err = session.generate_seating().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Seating(SeatingError::Capacity { guests: 3, seats: 2 })
        ));
        assert_eq!(
            err.to_string(),
            "not enough seats for all guests: 3 guests, 2 seats"
        );
    }
}
