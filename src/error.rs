use std::error::Error;
use std::fmt::{Display, Formatter};

/// Possible errors that arise due to issues with the input label image or its
/// seeded per-label statistics.
#[derive(Debug, Clone)]
pub enum MergeError {
    EmptyImage,
    DataSizeMismatch(String),
    UnknownLabel(String),
    WrongDimension(String),
}

impl Error for MergeError {}

impl Display for MergeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            MergeError::EmptyImage => String::from("The label image provided is empty"),
            MergeError::DataSizeMismatch(msg) => {
                format!("Input buffers have mismatched sizes: {msg}")
            }
            MergeError::UnknownLabel(msg) => {
                format!("Label has no seeded statistics: {msg}")
            }
            MergeError::WrongDimension(msg) => {
                format!("Feature vectors have mismatched dimensions: {msg}")
            }
        };
        write!(f, "{message}")
    }
}
