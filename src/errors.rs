use std::{convert::Infallible, fmt::Display};

/// Classification Errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreaksErr {
    TooFewClassesError,
    EmptySeriesError,
    NonFiniteError,
    ConversionError,
    BacktrackError,
    InfallibleError,
}

impl Display for BreaksErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreaksErr::TooFewClassesError => {
                write!(f, "You can't specify 0 classes. Try a positive number")
            }
            BreaksErr::EmptySeriesError => {
                write!(f, "Can't classify an empty series")
            }
            BreaksErr::NonFiniteError => {
                write!(f, "The series contains NaN or infinite values")
            }
            BreaksErr::ConversionError => {
                write!(f, "An error occurred during numeric conversion")
            }
            BreaksErr::BacktrackError => {
                write!(f, "Couldn't recover a class boundary from the lower class limits")
            }
            BreaksErr::InfallibleError => {
                write!(f, "An infallible numeric conversion failed")
            }
        }
    }
}

impl From<Infallible> for BreaksErr {
    fn from(_: Infallible) -> Self {
        BreaksErr::InfallibleError
    }
}

impl std::error::Error for BreaksErr {}
