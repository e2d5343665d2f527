//! Region generation errors.

use crate::pos::RegionPos;

/// Why a region could not be generated.
///
/// Attached to the region's handle and cloned to every waiter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The generator panicked while producing the region.
    #[error("generation of region {region} panicked: {message}")]
    Panicked { region: RegionPos, message: String },

    /// The generator reported a failure.
    #[error("generation of region {region} failed: {message}")]
    Generator { region: RegionPos, message: String },

    /// No worker thread is left to run the task.
    #[error("no worker available to generate region {region}")]
    WorkersGone { region: RegionPos },
}

impl GenerationError {
    /// Region the failure belongs to.
    pub fn region(&self) -> RegionPos {
        match self {
            GenerationError::Panicked { region, .. }
            | GenerationError::Generator { region, .. }
            | GenerationError::WorkersGone { region } => *region,
        }
    }
}
