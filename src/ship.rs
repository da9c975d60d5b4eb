//! Ship classes, orientation and per-segment damage tracking.

use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::BoardError;
use crate::config::BOARD_SIZE;

/// Cell mask sized for the game board.
pub type Mask = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Longest ship in the fleet.
pub const MAX_SHIP_LENGTH: usize = 4;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends towards increasing columns.
    Horizontal,
    /// Extends towards increasing rows.
    Vertical,
}

impl Orientation {
    /// Cell `offset` steps from `anchor` along this orientation. May fall
    /// outside the board; callers bounds-check.
    #[inline]
    pub fn step(self, anchor: (usize, usize), offset: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (anchor.0, anchor.1 + offset),
            Orientation::Vertical => (anchor.0 + offset, anchor.1),
        }
    }
}

/// Ship class. The discriminant is the ship's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipClass {
    Frigate = 1,
    Destroyer = 2,
    Submarine = 3,
    Carrier = 4,
}

impl ShipClass {
    pub const fn length(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipClass::Frigate => "Frigate",
            ShipClass::Destroyer => "Destroyer",
            ShipClass::Submarine => "Submarine",
            ShipClass::Carrier => "Carrier",
        }
    }
}

impl fmt::Display for ShipClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serializable snapshot of a placed ship. The footprint mask is rebuilt on
/// restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipState {
    pub class: ShipClass,
    pub orientation: Orientation,
    pub anchor: (usize, usize),
    pub hits: [bool; MAX_SHIP_LENGTH],
}

/// A ship placed on the board.
///
/// The footprint is `length` contiguous cells starting at `anchor` and
/// extending along `orientation`; it always lies inside the grid. Segment
/// `i` of `hits` is the footprint cell `i` steps from the anchor.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    class: ShipClass,
    orientation: Orientation,
    anchor: (usize, usize),
    mask: Mask,
    hits: [bool; MAX_SHIP_LENGTH],
}

impl Ship {
    /// Build a ship of `class` anchored at (`row`, `col`).
    pub fn new(
        class: ShipClass,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<Self, BoardError> {
        let mask = Self::footprint_mask(class, orientation, (row, col))?;
        Ok(Ship {
            class,
            orientation,
            anchor: (row, col),
            mask,
            hits: [false; MAX_SHIP_LENGTH],
        })
    }

    fn footprint_mask(
        class: ShipClass,
        orientation: Orientation,
        anchor: (usize, usize),
    ) -> Result<Mask, BoardError> {
        let n = BOARD_SIZE as usize;
        if anchor.0 >= n || anchor.1 >= n {
            return Err(BoardError::PlacementOutOfBounds);
        }
        let (end_r, end_c) = orientation.step(anchor, class.length() - 1);
        if end_r >= n || end_c >= n {
            return Err(BoardError::PlacementOutOfBounds);
        }
        let cells = (0..class.length()).map(|i| orientation.step(anchor, i));
        Ok(Mask::from_cells(cells)?)
    }

    /// Snapshot of the ship's placement and damage.
    pub fn state(&self) -> ShipState {
        ShipState {
            class: self.class,
            orientation: self.orientation,
            anchor: self.anchor,
            hits: self.hits,
        }
    }

    /// Rebuild a ship from a snapshot. Fails if the footprint leaves the grid
    /// or damage is recorded past the ship's last segment.
    pub fn from_state(state: ShipState) -> Result<Self, BoardError> {
        let (row, col) = state.anchor;
        let mut ship = Ship::new(state.class, state.orientation, row, col)?;
        for (offset, hit) in state.hits.iter().enumerate() {
            if *hit {
                ship.mark_hit(offset)?;
            }
        }
        Ok(ship)
    }

    /// Move the ship to a new anchor and orientation, clearing any damage.
    /// The ship is unchanged if the new footprint leaves the grid.
    pub(crate) fn relocate(
        &mut self,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<(), BoardError> {
        *self = Ship::new(self.class, orientation, row, col)?;
        Ok(())
    }

    /// Footprint cells in segment order, anchor first.
    pub fn footprint(&self) -> impl Iterator<Item = (usize, usize)> {
        let anchor = self.anchor;
        let orientation = self.orientation;
        (0..self.length()).map(move |i| orientation.step(anchor, i))
    }

    /// Segment index of (`row`, `col`), if the ship covers that cell.
    pub fn offset_of(&self, row: usize, col: usize) -> Option<usize> {
        if !self.contains(row, col) {
            return None;
        }
        let offset = match self.orientation {
            Orientation::Horizontal => col - self.anchor.1,
            Orientation::Vertical => row - self.anchor.0,
        };
        Some(offset)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.mask.contains(row, col)
    }

    /// Record damage on segment `offset`. Marking an already damaged segment
    /// again is a no-op.
    pub fn mark_hit(&mut self, offset: usize) -> Result<(), BoardError> {
        let length = self.length();
        if offset >= length {
            return Err(BoardError::InvalidOffset { offset, length });
        }
        self.hits[offset] = true;
        Ok(())
    }

    pub fn is_hit(&self, offset: usize) -> bool {
        offset < self.length() && self.hits[offset]
    }

    pub fn hit_count(&self) -> usize {
        self.hits[..self.length()].iter().filter(|h| **h).count()
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits[..self.length()].iter().all(|h| *h)
    }

    pub fn class(&self) -> ShipClass {
        self.class
    }

    pub fn name(&self) -> &'static str {
        self.class.name()
    }

    pub fn length(&self) -> usize {
        self.class.length()
    }

    /// Lowest-index cell of the footprint.
    pub fn anchor(&self) -> (usize, usize) {
        self.anchor
    }

    /// Last cell of the footprint.
    pub fn end(&self) -> (usize, usize) {
        self.orientation.step(self.anchor, self.length() - 1)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> Mask {
        self.mask
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ class: {}, anchor: {:?}, orientation: {:?}, hits: {}/{} }}",
            self.class,
            self.anchor,
            self.orientation,
            self.hit_count(),
            self.length(),
        )
    }
}
