//! Fleet placement: the validation predicate shared by interactive and
//! autonomous placement, slot-based place/relocate/unplace, and the
//! rejection sampler used for the automated side.
//!
//! Every operation either commits completely or leaves the board as it was.

use log::{debug, trace};
use rand::Rng;

use crate::board::{Board, CellState};
use crate::common::BoardError;
use crate::config::{BOARD_SIZE, FLEET, MAX_FLEET_RESTARTS, MAX_PLACEMENT_ATTEMPTS, NUM_SHIPS};
use crate::ship::{Orientation, Ship, ShipClass};

impl Board {
    /// Check whether a ship of `class` fits at (`row`, `col`): the footprint
    /// must stay on the grid and cover only `Empty` cells.
    pub fn can_place(
        &self,
        class: ShipClass,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let ship = Ship::new(class, orientation, row, col)?;
        self.check_footprint(&ship)
    }

    fn check_footprint(&self, ship: &Ship) -> Result<(), BoardError> {
        if ship
            .footprint()
            .any(|(r, c)| self.cells[r][c] != CellState::Empty)
        {
            return Err(BoardError::PlacementCollision);
        }
        Ok(())
    }

    fn write_footprint(&mut self, ship: &Ship, state: CellState) {
        for (r, c) in ship.footprint() {
            self.cells[r][c] = state;
        }
    }

    fn slot_class(index: usize) -> Result<ShipClass, BoardError> {
        FLEET.get(index).copied().ok_or(BoardError::InvalidIndex)
    }

    fn ensure_unlocked(&self) -> Result<(), BoardError> {
        if self.locked {
            Err(BoardError::PlacementLocked)
        } else {
            Ok(())
        }
    }

    /// Place the ship for fleet slot `ship_index` at (`row`, `col`).
    pub fn place(
        &mut self,
        ship_index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let class = Self::slot_class(ship_index)?;
        self.ensure_unlocked()?;
        if self.slots[ship_index].is_some() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        let ship = Ship::new(class, orientation, row, col)?;
        self.check_footprint(&ship)?;
        self.write_footprint(&ship, CellState::Occupied);
        self.slots[ship_index] = Some(ship);
        debug!(
            "placed {} (slot {}) from {:?} to {:?}",
            class,
            ship_index,
            ship.anchor(),
            ship.end()
        );
        Ok(())
    }

    /// Move an already placed ship. Its old cells are released before the new
    /// footprint is checked, so a ship may overlap its own previous position.
    pub fn relocate(
        &mut self,
        ship_index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        Self::slot_class(ship_index)?;
        self.ensure_unlocked()?;
        let previous = self.slots[ship_index].ok_or(BoardError::ShipNotPlaced)?;

        self.write_footprint(&previous, CellState::Empty);
        let mut moved = previous;
        let result = moved
            .relocate(orientation, row, col)
            .and_then(|()| self.check_footprint(&moved));
        match result {
            Ok(()) => {
                self.write_footprint(&moved, CellState::Occupied);
                self.slots[ship_index] = Some(moved);
                debug!(
                    "moved {} (slot {}) to {:?}..{:?}",
                    moved.class(),
                    ship_index,
                    moved.anchor(),
                    moved.end()
                );
                Ok(())
            }
            Err(e) => {
                self.write_footprint(&previous, CellState::Occupied);
                Err(e)
            }
        }
    }

    /// Take the ship out of fleet slot `ship_index`, freeing its cells.
    pub fn unplace(&mut self, ship_index: usize) -> Result<Ship, BoardError> {
        Self::slot_class(ship_index)?;
        self.ensure_unlocked()?;
        let ship = self.slots[ship_index]
            .take()
            .ok_or(BoardError::ShipNotPlaced)?;
        self.write_footprint(&ship, CellState::Empty);
        Ok(ship)
    }

    /// Draw random anchors and orientations until one fits the ship for
    /// `ship_index`. Returns `UnableToPlaceShip` after
    /// `MAX_PLACEMENT_ATTEMPTS` rejected draws.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship_index: usize,
    ) -> Result<(usize, usize, Orientation), BoardError> {
        let class = Self::slot_class(ship_index)?;
        let n = BOARD_SIZE as usize;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let row = rng.random_range(0..n);
            let col = rng.random_range(0..n);
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            match self.can_place(class, row, col, orientation) {
                Ok(()) => return Ok((row, col, orientation)),
                Err(e) if e.is_recoverable() => {
                    trace!("rejected {} at ({}, {}) {:?}: {}", class, row, col, orientation, e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Randomly place every ship whose slot is still empty, largest first.
    ///
    /// If a ship cannot be placed the attempt starts over from the board as it
    /// was on entry, up to `MAX_FLEET_RESTARTS` times. On failure the board is
    /// unchanged.
    pub fn place_remaining_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        self.ensure_unlocked()?;
        for restart in 0..=MAX_FLEET_RESTARTS {
            let mut scratch = self.clone();
            match scratch.fill_empty_slots(rng) {
                Ok(()) => {
                    *self = scratch;
                    return Ok(());
                }
                Err(BoardError::UnableToPlaceShip) => {
                    debug!("fleet placement stuck, restarting ({})", restart + 1);
                }
                Err(e) => return Err(e),
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    fn fill_empty_slots<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        for index in 0..NUM_SHIPS {
            if self.slots[index].is_some() {
                continue;
            }
            let (row, col, orientation) = self.random_placement(rng, index)?;
            self.place(index, row, col, orientation)?;
        }
        Ok(())
    }

    /// Randomly place the whole fleet on an empty board.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        if self.placed_count() > 0 {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        self.place_remaining_randomly(rng)
    }
}
