// Turn-taking for the automated side: uniform random targeting, firing
// again after every hit until a miss or the end of the game.

use alloc::vec::Vec;

use log::{debug, trace};
use rand::Rng;

use crate::{
    board::Board,
    common::{BoardError, ShotOutcome},
    config::BOARD_SIZE,
    player::Player,
};

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// Uniformly random cell over the whole grid.
pub fn random_target<R: Rng + ?Sized>(rng: &mut R) -> (usize, usize) {
    (rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE))
}

/// Every accepted shot of one automated turn, in firing order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnReport {
    pub shots: Vec<((usize, usize), ShotOutcome)>,
    /// Set when the turn sank the last ship on the target board.
    pub game_over: bool,
}

impl TurnReport {
    pub fn hits(&self) -> usize {
        self.shots.iter().filter(|(_, o)| o.is_hit()).count()
    }

    pub fn ships_sunk(&self) -> usize {
        self.shots
            .iter()
            .filter(|(_, o)| matches!(o, ShotOutcome::HitAndSunk(_)))
            .count()
    }
}

/// Fire one accepted shot chosen by `player`, redrawing whenever the chosen
/// cell was already targeted. Redraws do not count as moves.
pub fn fire_once<P, R>(
    player: &mut P,
    rng: &mut R,
    target: &mut Board,
) -> Result<((usize, usize), ShotOutcome), BoardError>
where
    P: Player,
    R: Rng + ?Sized,
{
    if !target.has_untargeted_cells() {
        return Err(BoardError::NoTargetsLeft);
    }
    loop {
        let (row, col) = player.select_target(rng, target);
        match target.resolve_shot(row, col) {
            Ok(outcome) => {
                player.handle_shot_result((row, col), outcome);
                return Ok(((row, col), outcome));
            }
            Err(BoardError::AlreadyTargeted { .. }) => {
                trace!("({}, {}) already targeted, redrawing", row, col);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Play a full automated turn against `target`: keep firing while shots hit,
/// stop on the first miss or as soon as every ship is sunk.
pub fn take_turn<P, R>(player: &mut P, rng: &mut R, target: &mut Board) -> Result<TurnReport, BoardError>
where
    P: Player,
    R: Rng + ?Sized,
{
    let mut report = TurnReport::default();
    loop {
        let (coord, outcome) = fire_once(player, rng, target)?;
        report.shots.push((coord, outcome));
        if target.all_ships_sunk() {
            report.game_over = true;
            break;
        }
        if outcome == ShotOutcome::Miss {
            break;
        }
    }
    debug!(
        "automated turn: {} shots, {} hits, game over: {}",
        report.shots.len(),
        report.hits(),
        report.game_over
    );
    Ok(report)
}
