use crate::{batch::SampleShape, device::Device, network::ConsError};
use std::{error, fmt};

/// Everything that can go wrong while building a [Gan](crate::gan::Gan) or evaluating its losses.
#[derive(Debug, Clone, PartialEq)]
pub enum GanError {
    /// The samples in a batch don't have the shape the model works with.
    ShapeMismatch {
        expected: SampleShape,
        received: SampleShape,
    },
    /// A batch's data doesn't hold the number of floats its shape calls for.
    InvalidBatch { expected: usize, received: usize },
    /// Losses are means over the batch, which an empty batch doesn't have.
    EmptyBatch,
    DeviceUnavailable(Device),
    UnknownDevice(String),
    /// One of the networks doesn't fit the role it's given.
    Incompatible {
        what: &'static str,
        expected: usize,
        received: usize,
    },
    Construction(ConsError),
}

impl error::Error for GanError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            GanError::Construction(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for GanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GanError::ShapeMismatch { expected, received } => write!(
                f,
                "Sample shape mismatch. Expected {} but received {}.",
                expected, received
            ),
            GanError::InvalidBatch { expected, received } => write!(
                f,
                "Batch data should contain {} values but {} were provided.",
                expected, received
            ),
            GanError::EmptyBatch => f.write_str("Cannot compute losses over an empty batch."),
            GanError::DeviceUnavailable(device) => {
                write!(f, "Device '{}' is not available.", device)
            }
            GanError::UnknownDevice(name) => write!(f, "Unknown device '{}'.", name),
            GanError::Incompatible {
                what,
                expected,
                received,
            } => write!(
                f,
                "The {} is incompatible with the model:\n\tExpected a size of {} but received {}.",
                what, expected, received
            ),
            GanError::Construction(e) => write!(f, "Failed to construct a network: {}", e),
        }
    }
}

impl From<ConsError> for GanError {
    fn from(e: ConsError) -> Self {
        GanError::Construction(e)
    }
}
