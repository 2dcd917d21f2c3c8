use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatingError {
    #[error("not enough seats for all guests: {guests} guests, {seats} seats")]
    Capacity { guests: usize, seats: usize },
}

pub type SeatingResult<T> = std::result::Result<T, SeatingError>;
