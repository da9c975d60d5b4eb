//! Game board: the cell-state grid and the fleet slots that own its ships.
//!
//! Placement lives in [`crate::placement`] and shot resolution in
//! [`crate::shot`]; both extend [`Board`] with further `impl` blocks.

use core::fmt;

use crate::common::BoardError;
use crate::config::{BOARD_SIZE, FLEET, NUM_SHIPS};
use crate::ship::{Mask, Ship, ShipState};

const GRID: usize = BOARD_SIZE as usize;

/// State of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    /// Covered by an intact ship segment.
    Occupied,
    /// Ship segment that was fired upon; the ship is still afloat.
    Hit,
    /// Open water that was fired upon.
    Miss,
    /// Segment of a sunk ship.
    SunkMarker,
}

impl CellState {
    /// True once the cell has been fired upon.
    pub fn is_targeted(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss | CellState::SunkMarker)
    }
}

/// Serializable snapshot of a board, for saving or handing a game over.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    pub cells: [[CellState; GRID]; GRID],
    pub slots: [Option<ShipState>; NUM_SHIPS],
    pub locked: bool,
}

/// One side's ocean: a 10×10 grid and up to ten ships, one per fleet slot.
///
/// Every `Occupied`, `Hit` or `SunkMarker` cell belongs to exactly one placed
/// ship, and ship footprints never overlap.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) cells: [[CellState; GRID]; GRID],
    pub(crate) slots: [Option<Ship>; NUM_SHIPS],
    pub(crate) locked: bool,
}

impl Board {
    /// Create an empty board (no ships placed).
    pub fn new() -> Self {
        Board {
            cells: [[CellState::Empty; GRID]; GRID],
            slots: [None; NUM_SHIPS],
            locked: false,
        }
    }

    pub fn is_within_bounds(row: usize, col: usize) -> bool {
        row < GRID && col < GRID
    }

    #[inline]
    pub(crate) fn check_bounds(row: usize, col: usize) -> Result<(), BoardError> {
        if Self::is_within_bounds(row, col) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds { row, col })
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<CellState, BoardError> {
        Self::check_bounds(row, col)?;
        Ok(self.cells[row][col])
    }

    /// Write a cell without any consistency checks beyond bounds. Placement
    /// and shot resolution keep the grid and the ships in agreement; direct
    /// writes are for callers that have already validated.
    pub fn set_cell(&mut self, row: usize, col: usize, state: CellState) -> Result<(), BoardError> {
        Self::check_bounds(row, col)?;
        self.cells[row][col] = state;
        Ok(())
    }

    /// Clear every cell and remove all ships. Starts a new session.
    pub fn reset(&mut self) {
        *self = Board::new();
    }

    /// Placed ships in fleet-slot order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.slots.iter().flatten()
    }

    /// Ship in fleet slot `index`, if placed.
    pub fn ship(&self, index: usize) -> Option<&Ship> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn placed_count(&self) -> usize {
        self.ships().count()
    }

    /// True when every fleet slot holds a ship.
    pub fn is_fleet_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// True once a shot has been resolved against this board.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Slot index of the ship covering (`row`, `col`). Linear scan; footprints
    /// are disjoint so at most one slot matches.
    pub fn owner_of(&self, row: usize, col: usize) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().map_or(false, |ship| ship.contains(row, col)))
    }

    /// Union of all ship footprints.
    pub fn occupancy(&self) -> Mask {
        self.ships().fold(Mask::new(), |acc, ship| acc | ship.mask())
    }

    /// Cells already fired upon.
    pub fn targeted(&self) -> Mask {
        let mut mask = Mask::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, state) in row.iter().enumerate() {
                if state.is_targeted() {
                    // r and c come from the grid itself
                    let _ = mask.set(r, c);
                }
            }
        }
        mask
    }

    /// Cells not yet fired upon.
    pub fn untargeted(&self) -> Mask {
        !self.targeted()
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().flatten().filter(|s| **s == state).count()
    }

    /// Snapshot of the grid, the ships and the placement lock.
    pub fn state(&self) -> BoardState {
        BoardState {
            cells: self.cells,
            slots: self.slots.map(|slot| slot.map(|ship| ship.state())),
            locked: self.locked,
        }
    }

    /// Rebuild a board from a snapshot.
    ///
    /// Each slot must hold its fleet class, footprints must be disjoint, and
    /// every cell must agree with the ship damage: intact segments
    /// `Occupied`, damaged ones `Hit`, all segments of a sunk ship
    /// `SunkMarker`, and cells outside the fleet `Empty` or `Miss`. Anything
    /// else fails with `InvalidState`. A snapshot with fired-upon cells comes
    /// back locked.
    pub fn from_state(state: BoardState) -> Result<Self, BoardError> {
        let mut slots = [None; NUM_SHIPS];
        let mut occupied = Mask::new();
        for (index, slot) in state.slots.iter().enumerate() {
            if let Some(ship_state) = slot {
                if ship_state.class != FLEET[index] {
                    return Err(BoardError::InvalidState);
                }
                let ship = Ship::from_state(*ship_state).map_err(|_| BoardError::InvalidState)?;
                if !(occupied & ship.mask()).is_empty() {
                    return Err(BoardError::InvalidState);
                }
                occupied = occupied | ship.mask();
                slots[index] = Some(ship);
            }
        }

        let cells = state.cells;
        for ship in slots.iter().flatten() {
            for (offset, (r, c)) in ship.footprint().enumerate() {
                let expected = if ship.is_sunk() {
                    CellState::SunkMarker
                } else if ship.is_hit(offset) {
                    CellState::Hit
                } else {
                    CellState::Occupied
                };
                if cells[r][c] != expected {
                    return Err(BoardError::InvalidState);
                }
            }
        }
        for (r, c) in (!occupied).iter_set_bits() {
            if !matches!(cells[r][c], CellState::Empty | CellState::Miss) {
                return Err(BoardError::InvalidState);
            }
        }

        let mut board = Board {
            cells,
            slots,
            locked: state.locked,
        };
        board.locked |= !board.targeted().is_empty();
        Ok(board)
    }

    /// Text rendering of the grid. With `reveal` unset, intact ship segments
    /// are drawn as open water.
    pub fn view(&self, reveal: bool) -> BoardView<'_> {
        BoardView {
            board: self,
            reveal,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ locked: {}, ships: [", self.locked)?;
        for ship in self.ships() {
            writeln!(f, "  {:?},", ship)?;
        }
        writeln!(f, "] }}")?;
        write!(f, "{}", self.view(true))
    }
}

/// Display adapter returned by [`Board::view`].
pub struct BoardView<'a> {
    board: &'a Board,
    reveal: bool,
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..GRID {
            write!(f, " {}", (b'A' + c as u8) as char)?;
        }
        writeln!(f)?;
        for (r, row) in self.board.cells.iter().enumerate() {
            write!(f, "{:2} ", r + 1)?;
            for state in row {
                let ch = match state {
                    CellState::Occupied if self.reveal => 'S',
                    CellState::Empty | CellState::Occupied => '.',
                    CellState::Hit => 'X',
                    CellState::Miss => 'o',
                    CellState::SunkMarker => '#',
                };
                write!(f, " {}", ch)?;
            }
            if r + 1 < GRID {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
