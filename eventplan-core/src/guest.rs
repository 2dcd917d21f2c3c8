use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{load_toml, load_yaml};
use crate::error::{ConfigError, Result};

/// An invited guest. An empty `group_tag` means the guest has no group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    #[serde(default, alias = "group")]
    pub group_tag: String,
}

impl Guest {
    pub fn new(name: impl Into<String>, group_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group_tag: group_tag.into(),
        }
    }
}

/// Ordered guest collection. Names are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestList {
    guests: Vec<Guest>,
}

impl GuestList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, guest: Guest) {
        self.guests.push(guest);
    }

    /// Removes the first guest with `name`.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.guests.iter().position(|guest| guest.name == name) {
            Some(index) => {
                self.guests.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn find(&self, name: &str) -> Option<&Guest> {
        self.guests.iter().find(|guest| guest.name == name)
    }

    pub fn all(&self) -> &[Guest] {
        &self.guests
    }

    pub fn count(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    /// Guest count per group tag, ordered by tag.
    pub fn group_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for guest in &self.guests {
            *counts.entry(guest.group_tag.clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl FromIterator<Guest> for GuestList {
    fn from_iter<I: IntoIterator<Item = Guest>>(iter: I) -> Self {
        Self {
            guests: iter.into_iter().collect(),
        }
    }
}

impl Extend<Guest> for GuestList {
    fn extend<I: IntoIterator<Item = Guest>>(&mut self, iter: I) {
        self.guests.extend(iter);
    }
}

#[derive(Debug, Deserialize)]
struct GuestFile {
    #[serde(default)]
    guests: Vec<Guest>,
}

/// Reads a guest list from a `.yaml`/`.yml` file or, for any other
/// extension, a TOML file with a `[[guests]]` array.
pub fn load_guest_list<P: AsRef<Path>>(path: P) -> Result<GuestList> {
    let path = path.as_ref();
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);
    let file: GuestFile = if is_yaml {
        load_yaml(path)?
    } else {
        load_toml(path)?
    };
    if let Some(index) = file
        .guests
        .iter()
        .position(|guest| guest.name.trim().is_empty())
    {
        return Err(ConfigError::Invalid(format!(
            "guest #{} in {} has an empty name",
            index + 1,
            path.display()
        )));
    }
    Ok(file.guests.into_iter().collect())
}
