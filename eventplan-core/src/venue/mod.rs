pub mod models;
pub mod selector;

pub use models::Venue;
pub use selector::{select_venue, VenueSelector};
