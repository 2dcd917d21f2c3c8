pub mod catalog;
pub mod config;
pub mod error;
pub mod guest;
pub mod ledger;
pub mod seating;
pub mod session;
pub mod venue;

pub use catalog::{generate_guests, sample_venues};
pub use config::{load_event_config, EventConfig, LedgerSection, SeatingSection};
pub use error::{ConfigError, Result};
pub use guest::{load_guest_list, Guest, GuestList};
pub use ledger::{Task, TaskLedger, UndoPolicy};
pub use seating::{
    generate_seating, CapacityPolicy, SeatingChart, SeatingError, SeatingPlanner, SeatingResult,
};
pub use session::{EventSession, EventSummary, SessionError, SessionResult};
pub use venue::{select_venue, Venue, VenueSelector};
