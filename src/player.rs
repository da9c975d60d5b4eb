use rand::Rng;

use crate::{ai, board::Board, common::ShotOutcome, BoardError};

/// Interface implemented by the sides that can play without a human.
pub trait Player {
    /// Fill every empty fleet slot of `board`. Leaving a slot empty makes
    /// `GameSession::start` fail with `OpponentFleetIncomplete`.
    fn place_ships<R: Rng + ?Sized>(&mut self, rng: &mut R, board: &mut Board) -> Result<(), BoardError>;

    /// Choose the next cell to fire at on `target`. The choice may hit an
    /// already targeted cell; the caller redraws on `AlreadyTargeted`.
    fn select_target<R: Rng + ?Sized>(&mut self, rng: &mut R, target: &Board) -> (usize, usize);

    /// Inform the player of the result of its last accepted shot.
    fn handle_shot_result(&mut self, _coord: (usize, usize), _outcome: ShotOutcome) {}
}

/// Automated opponent: random fleet placement and uniformly random targeting.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for RandomPlayer {
    fn place_ships<R: Rng + ?Sized>(&mut self, rng: &mut R, board: &mut Board) -> Result<(), BoardError> {
        board.place_remaining_randomly(rng)
    }

    fn select_target<R: Rng + ?Sized>(&mut self, rng: &mut R, _target: &Board) -> (usize, usize) {
        ai::random_target(rng)
    }
}
