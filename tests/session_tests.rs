use naval_combat::{
    Board, BoardError, GameError, GameSession, GameStatus, Orientation, Player, RandomPlayer,
    ShotOutcome, Turn, DEFAULT_NICKNAME, NUM_SHIPS, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn started_session(seed: u64) -> (GameSession, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut session = GameSession::new("Ada");
    RandomPlayer::new()
        .place_ships(&mut rng, session.player_board_mut().unwrap())
        .unwrap();
    session.start(&mut rng).unwrap();
    (session, rng)
}

fn first_cell<P: Player>(session: &GameSession<P>, want_ship: bool) -> (usize, usize) {
    let occupied = session.opponent_board().occupancy();
    (0..10)
        .flat_map(|r| (0..10).map(move |c| (r, c)))
        .find(|&(r, c)| occupied.contains(r, c) == want_ship && !session.opponent_board().targeted().contains(r, c))
        .unwrap()
}

#[test]
fn test_setup_phase() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut session = GameSession::new("  ");
    assert_eq!(session.nickname(), DEFAULT_NICKNAME);
    assert_eq!(session.status(), GameStatus::Setup);
    assert_eq!(session.fire(0, 0).unwrap_err(), GameError::NotStarted);
    assert_eq!(session.opponent_turn(&mut rng).unwrap_err(), GameError::NotStarted);

    session
        .player_board_mut()
        .unwrap()
        .place(0, 0, 0, Orientation::Horizontal)
        .unwrap();
    assert_eq!(session.start(&mut rng).unwrap_err(), GameError::FleetIncomplete);
    assert_eq!(session.status(), GameStatus::Setup);
}

#[test]
fn test_start_places_opponent_and_locks() {
    let (mut session, mut rng) = started_session(3);
    assert_eq!(session.status(), GameStatus::InProgress);
    assert_eq!(session.turn(), Turn::Player);
    assert!(session.opponent_board().is_fleet_complete());
    assert!(session.player_board().is_locked());
    assert!(session.opponent_board().is_locked());
    assert_eq!(session.player_board_mut().unwrap_err(), GameError::AlreadyStarted);
    assert_eq!(session.start(&mut rng).unwrap_err(), GameError::AlreadyStarted);
}

#[test]
fn test_player_keeps_turn_on_hit_and_passes_on_miss() {
    let (mut session, mut rng) = started_session(5);
    assert_eq!(session.opponent_turn(&mut rng).unwrap_err(), GameError::NotYourTurn);

    let (r, c) = first_cell(&session, true);
    assert!(session.fire(r, c).unwrap().is_hit());
    assert_eq!(session.turn(), Turn::Player);
    assert_eq!(
        session.fire(r, c).unwrap_err(),
        GameError::Board(BoardError::AlreadyTargeted { row: r, col: c })
    );
    assert_eq!(session.turn(), Turn::Player);

    let (r, c) = first_cell(&session, false);
    assert_eq!(session.fire(r, c).unwrap(), ShotOutcome::Miss);
    assert_eq!(session.turn(), Turn::Opponent);
    assert_eq!(session.fire(0, 0).unwrap_err(), GameError::NotYourTurn);

    let report = session.opponent_turn(&mut rng).unwrap();
    assert!(!report.shots.is_empty());
    if !report.game_over {
        assert_eq!(session.turn(), Turn::Player);
    }
}

#[test]
fn test_player_wins_by_sinking_everything() {
    let (mut session, _rng) = started_session(9);
    let cells: Vec<_> = session.opponent_board().occupancy().iter_set_bits().collect();
    for (i, (r, c)) in cells.iter().copied().enumerate() {
        assert_eq!(session.status(), GameStatus::InProgress);
        let outcome = session.fire(r, c).unwrap();
        assert!(outcome.is_hit());
        assert_eq!(session.record().ships_sunk_by_player, session.opponent_board().sunk_count());
        if i + 1 < cells.len() {
            assert_ne!(session.status(), GameStatus::Won);
        }
    }
    assert_eq!(session.status(), GameStatus::Won);
    assert_eq!(session.fire(0, 0).unwrap_err(), GameError::GameOver);

    let record = session.record();
    assert_eq!(record.nickname, "Ada");
    assert_eq!(record.ships_sunk_by_player, NUM_SHIPS);
    assert_eq!(record.ships_sunk_by_opponent, session.player_board().sunk_count());
}

/// Fires at the first untargeted ship segment it can see.
struct Sharpshooter;

impl Player for Sharpshooter {
    fn place_ships<R: Rng + ?Sized>(&mut self, rng: &mut R, board: &mut Board) -> Result<(), BoardError> {
        board.place_remaining_randomly(rng)
    }

    fn select_target<R: Rng + ?Sized>(&mut self, _rng: &mut R, target: &Board) -> (usize, usize) {
        let open = target.occupancy() & !target.targeted();
        open.iter_set_bits().next().unwrap_or((0, 0))
    }
}

#[test]
fn test_opponent_wins_in_one_turn_when_it_never_misses() {
    let mut rng = SmallRng::seed_from_u64(13);
    let mut session = GameSession::with_opponent("Ada", Sharpshooter);
    session
        .player_board_mut()
        .unwrap()
        .place_fleet_randomly(&mut rng)
        .unwrap();
    session.start(&mut rng).unwrap();

    let (r, c) = first_cell(&session, false);
    assert_eq!(session.fire(r, c).unwrap(), ShotOutcome::Miss);
    let report = session.opponent_turn(&mut rng).unwrap();

    assert!(report.game_over);
    assert_eq!(report.shots.len(), TOTAL_SHIP_CELLS);
    assert_eq!(report.ships_sunk(), NUM_SHIPS);
    assert_eq!(session.status(), GameStatus::Lost);
    assert_eq!(session.turn(), Turn::Opponent);
    assert_eq!(session.opponent_turn(&mut rng).unwrap_err(), GameError::GameOver);
    assert_eq!(session.record().ships_sunk_by_opponent, NUM_SHIPS);
    assert_eq!(session.record().ships_sunk_by_player, 0);
}

#[test]
fn test_reset_returns_to_setup() {
    let (mut session, mut rng) = started_session(21);
    let (r, c) = first_cell(&session, false);
    session.fire(r, c).unwrap();
    session.reset();

    assert_eq!(session.status(), GameStatus::Setup);
    assert_eq!(session.turn(), Turn::Player);
    assert_eq!(session.player_board().placed_count(), 0);
    assert_eq!(session.opponent_board().placed_count(), 0);

    session
        .player_board_mut()
        .unwrap()
        .place_fleet_randomly(&mut rng)
        .unwrap();
    session.start(&mut rng).unwrap();
    assert_eq!(session.status(), GameStatus::InProgress);
}

/// Accepts the placement call but leaves the board empty.
struct EmptyHanded;

impl Player for EmptyHanded {
    fn place_ships<R: Rng + ?Sized>(&mut self, _rng: &mut R, _board: &mut Board) -> Result<(), BoardError> {
        Ok(())
    }

    fn select_target<R: Rng + ?Sized>(&mut self, rng: &mut R, _target: &Board) -> (usize, usize) {
        (rng.random_range(0..10), rng.random_range(0..10))
    }
}

#[test]
fn test_start_requires_a_complete_opponent_fleet() {
    let mut rng = SmallRng::seed_from_u64(21);
    let mut session = GameSession::with_opponent("Ada", EmptyHanded);
    session
        .player_board_mut()
        .unwrap()
        .place_fleet_randomly(&mut rng)
        .unwrap();

    assert_eq!(session.start(&mut rng).unwrap_err(), GameError::OpponentFleetIncomplete);
    assert_eq!(session.status(), GameStatus::Setup);
    assert_eq!(session.opponent_board().placed_count(), 0);
    assert!(!session.player_board().is_locked());
    assert_eq!(session.fire(0, 0).unwrap_err(), GameError::NotStarted);
}

#[test]
fn test_restored_session_continues_the_game() {
    let (mut session, mut rng) = started_session(17);
    let (r, c) = first_cell(&session, true);
    session.fire(r, c).unwrap();

    let mut restored = GameSession::from_state(session.state()).unwrap();
    assert_eq!(restored.state(), session.state());
    assert_eq!(restored.status(), GameStatus::InProgress);
    assert_eq!(restored.turn(), Turn::Player);
    assert_eq!(restored.nickname(), "Ada");
    assert_eq!(
        restored.fire(r, c).unwrap_err(),
        GameError::Board(BoardError::AlreadyTargeted { row: r, col: c })
    );
    assert_eq!(restored.player_board_mut().unwrap_err(), GameError::AlreadyStarted);

    let (r, c) = first_cell(&restored, false);
    assert_eq!(restored.fire(r, c).unwrap(), ShotOutcome::Miss);
    assert!(restored.opponent_turn(&mut rng).is_ok());
}

#[test]
fn test_restore_rejects_started_session_without_fleets() {
    let (session, _rng) = started_session(19);
    let mut state = session.state();
    state.opponent_board = Board::new().state();
    assert_eq!(
        GameSession::from_state(state).unwrap_err(),
        GameError::OpponentFleetIncomplete
    );

    let mut state = session.state();
    state.player_board.slots[9] = None;
    assert!(matches!(
        GameSession::from_state(state).unwrap_err(),
        GameError::Board(BoardError::InvalidState)
    ));
}

#[test]
fn test_restore_during_setup() {
    let mut session = GameSession::new("Ada");
    session
        .player_board_mut()
        .unwrap()
        .place(0, 0, 0, Orientation::Vertical)
        .unwrap();
    let mut restored = GameSession::from_state(session.state()).unwrap();
    assert_eq!(restored.status(), GameStatus::Setup);
    assert_eq!(restored.player_board().placed_count(), 1);
    restored
        .player_board_mut()
        .unwrap()
        .unplace(0)
        .unwrap();
    assert_eq!(restored.player_board().placed_count(), 0);
}
