use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::catalog::sample_venues;
use crate::error::{ConfigError, Result};
use crate::ledger::UndoPolicy;
use crate::seating::CapacityPolicy;
use crate::venue::Venue;

/// Top-level planner configuration, normally read from `eventplan.toml`.
///
/// Every section is optional; a missing file section falls back to its
/// default and an empty `[[venues]]` list falls back to the sample catalog.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventConfig {
    #[serde(default)]
    pub seating: SeatingSection,
    #[serde(default)]
    pub ledger: LedgerSection,
    #[serde(default)]
    pub venues: Vec<Venue>,
}

impl EventConfig {
    /// Venue catalog the selector should work from.
    pub fn catalog(&self) -> Vec<Venue> {
        if self.venues.is_empty() {
            sample_venues()
        } else {
            self.venues.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        for venue in &self.venues {
            if venue.name.trim().is_empty() {
                return Err(ConfigError::Invalid("venue name must not be empty".into()));
            }
            if !venue.cost.is_finite() || venue.cost < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "venue {} must have a finite, non-negative cost",
                    venue.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeatingSection {
    #[serde(default)]
    pub capacity_policy: CapacityPolicy,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerSection {
    #[serde(default)]
    pub undo_policy: UndoPolicy,
}

pub fn load_event_config<P: AsRef<Path>>(path: P) -> Result<EventConfig> {
    let mut config: EventConfig = load_toml(path)?;
    config.validate()?;
    for venue in &mut config.venues {
        // Folds -0.0 into 0.0.
        venue.cost += 0.0;
    }
    Ok(config)
}

pub(crate) fn load_toml<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = read(path)?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        source,
        path: path.to_path_buf(),
    })
}

pub(crate) fn load_yaml<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = read(path)?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
        source,
        path: path.to_path_buf(),
    })
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        source,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_fixture_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../configs/eventplan.toml");
        let config = load_event_config(path).expect("fixture should parse");
        assert_eq!(config.seating.capacity_policy, CapacityPolicy::Physical);
        assert_eq!(config.ledger.undo_policy, UndoPolicy::Discard);
        assert_eq!(config.venues.len(), 3);
        assert_eq!(config.venues[0].name, "Community Hall");
    }

    #[test]
    fn empty_file_uses_defaults_and_sample_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file).unwrap();
        let config = load_event_config(file.path()).unwrap();
        assert_eq!(config.seating.capacity_policy, CapacityPolicy::Physical);
        assert_eq!(config.ledger.undo_policy, UndoPolicy::Discard);
        assert_eq!(config.catalog(), sample_venues());
    }

    #[test]
    fn parses_policies_and_venues() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[seating]
capacity_policy = "strictest"

[ledger]
undo_policy = "requeue"

[[venues]]
name = "Loft"
cost = 300.0
capacity = 12
tables = 2
seats_per_table = 6
"#
        )
        .unwrap();
        let config = load_event_config(file.path()).unwrap();
        assert_eq!(config.seating.capacity_policy, CapacityPolicy::Strictest);
        assert_eq!(config.ledger.undo_policy, UndoPolicy::Requeue);
        assert_eq!(config.catalog(), vec![Venue::new("Loft", 300.0, 12, 2, 6)]);
    }

    #[test]
    fn rejects_negative_cost() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[venues]]
name = "Broken"
cost = -1.0
capacity = 10
tables = 1
seats_per_table = 10
"#
        )
        .unwrap();
        let err = load_event_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn negative_zero_cost_loads_as_zero() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[venues]]
name = "Big"
cost = -0.0
capacity = 50
tables = 5
seats_per_table = 10

[[venues]]
name = "Small"
cost = 0.0
capacity = 10
tables = 2
seats_per_table = 5
"#
        )
        .unwrap();
        let config = load_event_config(file.path()).unwrap();
        assert!(config.venues[0].cost.is_sign_positive());
        let catalog = config.catalog();
        let chosen = crate::venue::select_venue(&catalog, 0.0, 5).unwrap();
        assert_eq!(chosen.name, "Small");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_event_config("/nonexistent/eventplan.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/eventplan.toml"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[ledger]\nundo_policy = \"sometimes\"\n").unwrap();
        let err = load_event_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
