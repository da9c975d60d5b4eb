//! Shot outcomes and the error taxonomy shared by boards, placement and
//! shot resolution.

use crate::bitboard::BitBoardError;
use crate::ship::ShipClass;

/// Result of one accepted shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// The shot landed on open water.
    Miss,
    /// The shot hit a ship that still has unhit segments.
    Hit,
    /// The shot hit the last intact segment of a ship of this class.
    HitAndSunk(ShipClass),
}

impl ShotOutcome {
    /// True for `Hit` and `HitAndSunk`; the shooter fires again.
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Ship footprint would leave the grid.
    PlacementOutOfBounds,
    /// Ship footprint covers a cell that is not empty.
    PlacementCollision,
    /// Cell was already fired upon.
    AlreadyTargeted { row: usize, col: usize },
    /// Segment index outside the ship.
    InvalidOffset { offset: usize, length: usize },
    /// Fleet slot index is out of range.
    InvalidIndex,
    /// Fleet slot already holds a ship.
    ShipAlreadyPlaced,
    /// Fleet slot holds no ship.
    ShipNotPlaced,
    /// The board has been fired upon; placements are final.
    PlacementLocked,
    /// Autonomous placement ran out of attempts.
    UnableToPlaceShip,
    /// Occupied cell with no owning ship.
    OrphanedCell { row: usize, col: usize },
    /// Every cell has already been fired upon.
    NoTargetsLeft,
    /// A board snapshot whose cells and ships disagree.
    InvalidState,
}

impl BoardError {
    /// Whether a caller may retry with different input. Anything else is a
    /// contract or consistency failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BoardError::PlacementOutOfBounds
                | BoardError::PlacementCollision
                | BoardError::AlreadyTargeted { .. }
                | BoardError::ShipAlreadyPlaced
                | BoardError::ShipNotPlaced
        )
    }
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::IndexOutOfBounds { row, col } => BoardError::OutOfBounds { row, col },
        }
    }
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the board", row, col)
            }
            BoardError::PlacementOutOfBounds => write!(f, "ship placement is out of bounds"),
            BoardError::PlacementCollision => {
                write!(f, "ship placement overlaps with another ship")
            }
            BoardError::AlreadyTargeted { row, col } => {
                write!(f, "cell ({}, {}) was already targeted", row, col)
            }
            BoardError::InvalidOffset { offset, length } => {
                write!(f, "segment {} is outside a ship of length {}", offset, length)
            }
            BoardError::InvalidIndex => write!(f, "fleet index is out of range"),
            BoardError::ShipAlreadyPlaced => write!(f, "ship is already placed on the board"),
            BoardError::ShipNotPlaced => write!(f, "ship is not placed on the board"),
            BoardError::PlacementLocked => {
                write!(f, "board has been fired upon; ships can no longer move")
            }
            BoardError::UnableToPlaceShip => write!(f, "unable to place ship"),
            BoardError::OrphanedCell { row, col } => {
                write!(f, "occupied cell ({}, {}) belongs to no ship", row, col)
            }
            BoardError::NoTargetsLeft => write!(f, "every cell has already been targeted"),
            BoardError::InvalidState => write!(f, "board snapshot is inconsistent"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

#[cfg(feature = "std")]
impl std::error::Error for BitBoardError {}
