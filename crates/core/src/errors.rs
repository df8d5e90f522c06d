use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No table available for {time} on {date}")]
    NoTableAvailable { date: String, time: String },

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),
}

pub type BookingResult<T> = Result<T, BookingError>;
