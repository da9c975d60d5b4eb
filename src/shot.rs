//! Shot resolution against a single board.

use log::{debug, info};

use crate::board::{Board, CellState};
use crate::common::{BoardError, ShotOutcome};

impl Board {
    /// Fire at (`row`, `col`) and report what happened.
    ///
    /// A cell can be fired upon once; further attempts fail with
    /// `AlreadyTargeted` and leave the board untouched. The first accepted
    /// shot locks the board against placement changes.
    pub fn resolve_shot(&mut self, row: usize, col: usize) -> Result<ShotOutcome, BoardError> {
        let state = self.cell(row, col)?;
        if state.is_targeted() {
            return Err(BoardError::AlreadyTargeted { row, col });
        }

        if state == CellState::Empty {
            self.locked = true;
            self.cells[row][col] = CellState::Miss;
            debug!("shot at ({}, {}): miss", row, col);
            return Ok(ShotOutcome::Miss);
        }

        let index = self
            .owner_of(row, col)
            .ok_or(BoardError::OrphanedCell { row, col })?;
        let ship = self.slots[index]
            .as_mut()
            .ok_or(BoardError::OrphanedCell { row, col })?;
        let offset = ship
            .offset_of(row, col)
            .ok_or(BoardError::OrphanedCell { row, col })?;
        ship.mark_hit(offset)?;
        let ship = *ship;
        self.locked = true;

        if !ship.is_sunk() {
            self.cells[row][col] = CellState::Hit;
            debug!("shot at ({}, {}): hit {}", row, col, ship.class());
            return Ok(ShotOutcome::Hit);
        }

        for (r, c) in ship.mask().iter_set_bits() {
            self.cells[r][c] = CellState::SunkMarker;
        }
        info!(
            "{} sunk ({:?}..{:?})",
            ship.class(),
            ship.anchor(),
            ship.end()
        );
        Ok(ShotOutcome::HitAndSunk(ship.class()))
    }

    /// True when every ship on the board is sunk. Derived from the ships on
    /// each call; a board without ships counts as defeated.
    pub fn all_ships_sunk(&self) -> bool {
        self.ships().all(|ship| ship.is_sunk())
    }

    /// Number of sunk ships on this board.
    pub fn sunk_count(&self) -> usize {
        self.ships().filter(|ship| ship.is_sunk()).count()
    }

    /// True while at least one cell has not been fired upon.
    pub fn has_untargeted_cells(&self) -> bool {
        !self.untargeted().is_empty()
    }
}
