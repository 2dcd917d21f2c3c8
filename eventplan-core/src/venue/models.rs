use serde::{Deserialize, Serialize};

/// A bookable venue.
///
/// `capacity` is the declared headcount ceiling and is independent of the
/// physical seating layout (`tables * seats_per_table`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Venue {
    pub name: String,
    pub cost: f64,
    pub capacity: u32,
    pub tables: u32,
    pub seats_per_table: u32,
}

impl Venue {
    pub fn new(
        name: impl Into<String>,
        cost: f64,
        capacity: u32,
        tables: u32,
        seats_per_table: u32,
    ) -> Self {
        Self {
            name: name.into(),
            cost,
            capacity,
            tables,
            seats_per_table,
        }
    }

    pub fn total_seats(&self) -> usize {
        self.tables as usize * self.seats_per_table as usize
    }

    /// False when the venue has no tables or no seats per table.
    pub fn has_seating_layout(&self) -> bool {
        self.tables > 0 && self.seats_per_table > 0
    }

    pub fn is_eligible(&self, budget: f64, guest_count: usize) -> bool {
        self.cost <= budget && self.capacity as usize >= guest_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_seats_ignores_declared_capacity() {
        let venue = Venue::new("Hall", 100.0, 50, 6, 8);
        assert_eq!(venue.total_seats(), 48);
        assert!(venue.has_seating_layout());
        assert!(!Venue::new("Empty", 0.0, 10, 0, 8).has_seating_layout());
    }

    #[test]
    fn eligibility_is_inclusive_on_both_bounds() {
        let venue = Venue::new("Hall", 1999.99, 40, 5, 8);
        assert!(venue.is_eligible(1999.99, 40));
        assert!(!venue.is_eligible(1999.98, 40));
        assert!(!venue.is_eligible(2000.0, 41));
    }
}
