pub mod chart;
pub mod error;
pub mod planner;

pub use chart::SeatingChart;
pub use error::{SeatingError, SeatingResult};
pub use planner::{generate_seating, CapacityPolicy, SeatingPlanner};
