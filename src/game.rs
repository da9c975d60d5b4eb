//! Game session: one human board, one automated board, and the turn order
//! between them.

use alloc::string::{String, ToString};
use core::fmt;

use log::info;
use rand::Rng;

use crate::{
    ai::{self, TurnReport},
    board::{Board, BoardState},
    common::{BoardError, ShotOutcome},
    config::DEFAULT_NICKNAME,
    player::{Player, RandomPlayer},
};

/// Current status of a game, always derived from the two boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    /// Ships are still being placed.
    Setup,
    InProgress,
    /// Every opponent ship is sunk.
    Won,
    /// Every player ship is sunk.
    Lost,
}

/// Side whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    Player,
    Opponent,
}

/// Values handed to the persistence layer at any point of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRecord {
    pub nickname: String,
    /// Opponent ships the player has sunk.
    pub ships_sunk_by_player: usize,
    /// Player ships the opponent has sunk.
    pub ships_sunk_by_opponent: usize,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self {
            nickname: DEFAULT_NICKNAME.to_string(),
            ships_sunk_by_player: 0,
            ships_sunk_by_opponent: 0,
        }
    }
}

/// Errors returned by session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    Board(BoardError),
    /// The session has not been started.
    NotStarted,
    /// The session is already running; placement is over.
    AlreadyStarted,
    /// The player's fleet is not fully placed.
    FleetIncomplete,
    /// The opponent left fleet slots empty.
    OpponentFleetIncomplete,
    /// The other side is due to shoot.
    NotYourTurn,
    /// The game has already been decided.
    GameOver,
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Board(e) => write!(f, "{}", e),
            GameError::NotStarted => write!(f, "the game has not started"),
            GameError::AlreadyStarted => write!(f, "the game has already started"),
            GameError::FleetIncomplete => write!(f, "not every ship has been placed"),
            GameError::OpponentFleetIncomplete => {
                write!(f, "the opponent did not place its whole fleet")
            }
            GameError::NotYourTurn => write!(f, "it is not this side's turn"),
            GameError::GameOver => write!(f, "the game is over"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Board(e) => Some(e),
            _ => None,
        }
    }
}

/// Serializable snapshot of a whole session. The opponent's strategy is not
/// part of it and is supplied again on restore.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub player_board: BoardState,
    pub opponent_board: BoardState,
    pub nickname: String,
    pub started: bool,
    pub turn: Turn,
}

/// A single game between a human and the automated opponent.
///
/// The player places ships on [`GameSession::player_board_mut`] during setup.
/// [`GameSession::start`] places the opponent fleet and hands the first turn
/// to the player. Each side keeps shooting while it hits.
#[derive(Debug)]
pub struct GameSession<P: Player = RandomPlayer> {
    player_board: Board,
    opponent_board: Board,
    opponent: P,
    nickname: String,
    started: bool,
    turn: Turn,
}

impl GameSession<RandomPlayer> {
    /// Create a session against the uniform-random opponent.
    pub fn new(nickname: &str) -> Self {
        Self::with_opponent(nickname, RandomPlayer::new())
    }

    /// Restore a session against the uniform-random opponent.
    pub fn from_state(state: SessionState) -> Result<Self, GameError> {
        Self::from_state_with_opponent(state, RandomPlayer::new())
    }
}

impl<P: Player> GameSession<P> {
    pub fn with_opponent(nickname: &str, opponent: P) -> Self {
        let nickname = if nickname.trim().is_empty() {
            DEFAULT_NICKNAME.to_string()
        } else {
            nickname.trim().to_string()
        };
        Self {
            player_board: Board::new(),
            opponent_board: Board::new(),
            opponent,
            nickname,
            started: false,
            turn: Turn::Player,
        }
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    /// Mutable access to the player's board for placement. Fails once the
    /// game is running.
    pub fn player_board_mut(&mut self) -> Result<&mut Board, GameError> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        Ok(&mut self.player_board)
    }

    pub fn opponent_board(&self) -> &Board {
        &self.opponent_board
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Place the opponent fleet and begin play with the player's turn.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        if !self.player_board.is_fleet_complete() {
            return Err(GameError::FleetIncomplete);
        }
        let mut opponent_board = Board::new();
        self.opponent.place_ships(rng, &mut opponent_board)?;
        if !opponent_board.is_fleet_complete() {
            return Err(GameError::OpponentFleetIncomplete);
        }
        self.opponent_board = opponent_board;
        self.player_board.locked = true;
        self.opponent_board.locked = true;
        self.started = true;
        self.turn = Turn::Player;
        info!("game started for {}", self.nickname);
        Ok(())
    }

    /// Status derived from both boards.
    pub fn status(&self) -> GameStatus {
        if !self.started {
            GameStatus::Setup
        } else if self.opponent_board.all_ships_sunk() {
            GameStatus::Won
        } else if self.player_board.all_ships_sunk() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    fn ensure_playing(&self, side: Turn) -> Result<(), GameError> {
        match self.status() {
            GameStatus::Setup => return Err(GameError::NotStarted),
            GameStatus::Won | GameStatus::Lost => return Err(GameError::GameOver),
            GameStatus::InProgress => {}
        }
        if self.turn != side {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    /// Apply a human shot to the opponent board. A miss passes the turn.
    pub fn fire(&mut self, row: usize, col: usize) -> Result<ShotOutcome, GameError> {
        self.ensure_playing(Turn::Player)?;
        let outcome = self.opponent_board.resolve_shot(row, col)?;
        if outcome == ShotOutcome::Miss {
            self.turn = Turn::Opponent;
        }
        if self.status() == GameStatus::Won {
            info!("{} sank the whole opposing fleet", self.nickname);
        }
        Ok(outcome)
    }

    /// Run a complete automated turn against the player board, then hand the
    /// turn back unless the game ended.
    pub fn opponent_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TurnReport, GameError> {
        self.ensure_playing(Turn::Opponent)?;
        let report = ai::take_turn(&mut self.opponent, rng, &mut self.player_board)?;
        if report.game_over {
            info!("the opponent sank the whole fleet of {}", self.nickname);
        } else {
            self.turn = Turn::Player;
        }
        Ok(report)
    }

    /// Current counters for the persistence layer.
    pub fn record(&self) -> PlayerRecord {
        PlayerRecord {
            nickname: self.nickname.clone(),
            ships_sunk_by_player: self.opponent_board.sunk_count(),
            ships_sunk_by_opponent: self.player_board.sunk_count(),
        }
    }

    /// Snapshot of both boards, the nickname and the turn order.
    pub fn state(&self) -> SessionState {
        SessionState {
            player_board: self.player_board.state(),
            opponent_board: self.opponent_board.state(),
            nickname: self.nickname.clone(),
            started: self.started,
            turn: self.turn,
        }
    }

    /// Restore a session from a snapshot, playing against `opponent`. A
    /// started session must hold two complete fleets.
    pub fn from_state_with_opponent(state: SessionState, opponent: P) -> Result<Self, GameError> {
        let mut session = Self::with_opponent(&state.nickname, opponent);
        let mut player_board = Board::from_state(state.player_board)?;
        let mut opponent_board = Board::from_state(state.opponent_board)?;
        if state.started {
            if !player_board.is_fleet_complete() {
                return Err(GameError::FleetIncomplete);
            }
            if !opponent_board.is_fleet_complete() {
                return Err(GameError::OpponentFleetIncomplete);
            }
            player_board.locked = true;
            opponent_board.locked = true;
        }
        session.player_board = player_board;
        session.opponent_board = opponent_board;
        session.started = state.started;
        session.turn = state.turn;
        Ok(session)
    }

    /// Clear both boards and return to setup.
    pub fn reset(&mut self) {
        self.player_board.reset();
        self.opponent_board.reset();
        self.started = false;
        self.turn = Turn::Player;
    }
}
