use thiserror::Error;

use crate::id::IslandId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PackError {
    #[error("There were no islands to pack")]
    NoIslands,

    #[error("Target height must be finite and greater than zero, but was {0}")]
    InvalidTargetHeight(f64),

    #[error("Padding must be finite and not negative, but was {0}")]
    InvalidPadding(f64),

    #[error("Island {id} has an invalid size ({}, {})", .size.0, .size.1)]
    InvalidSize { id: IslandId, size: (f64, f64) },

    #[error("Island {id} is {width} wide, which cannot fit on the sheet with its padding")]
    TooWide { id: IslandId, width: f64 },

    #[error("Packed islands need a height of {used_height}, but the target height is {target_height}")]
    ExceedsTarget { used_height: f64, target_height: f64 },

    #[error("Island {id} was rejected by the empty shelf opened for it. This is a bug in shelfpack.")]
    ShelfRejected { id: IslandId },
}

impl PackError {
    /// Tells whether the inputs were malformed and packing was not attempted.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            PackError::NoIslands
            | PackError::InvalidTargetHeight(_)
            | PackError::InvalidPadding(_)
            | PackError::InvalidSize { .. } => true,
            _ => false,
        }
    }

    /// Tells whether the inputs were fine, but could not be laid out within the
    /// given constraints. Callers can retry these with a larger target height
    /// or fewer islands.
    pub fn is_infeasible(&self) -> bool {
        match self {
            PackError::TooWide { .. } | PackError::ExceedsTarget { .. } => true,
            _ => false,
        }
    }
}
