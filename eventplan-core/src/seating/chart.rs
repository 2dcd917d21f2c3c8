use std::collections::BTreeMap;

use serde::Serialize;

use crate::guest::Guest;

/// Table number (1-based) to the guests seated there, in seating order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SeatingChart {
    tables: BTreeMap<usize, Vec<Guest>>,
}

impl SeatingChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn seat_table(&mut self, table: usize, guests: Vec<Guest>) {
        self.tables.insert(table, guests);
    }

    pub fn table(&self, table: usize) -> Option<&[Guest]> {
        self.tables.get(&table).map(Vec::as_slice)
    }

    /// Tables in ascending order, including empty ones.
    pub fn tables(&self) -> impl Iterator<Item = (usize, &[Guest])> + '_ {
        self.tables
            .iter()
            .map(|(table, guests)| (*table, guests.as_slice()))
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn seated_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    /// True when nobody is seated, whether or not tables were laid out.
    pub fn is_empty(&self) -> bool {
        self.seated_count() == 0
    }

    /// Tables holding at least one member of `group_tag`.
    pub fn tables_for_group(&self, group_tag: &str) -> Vec<usize> {
        self.tables
            .iter()
            .filter(|(_, guests)| guests.iter().any(|guest| guest.group_tag == group_tag))
            .map(|(table, _)| *table)
            .collect()
    }

    pub fn into_inner(self) -> BTreeMap<usize, Vec<Guest>> {
        self.tables
    }
}
