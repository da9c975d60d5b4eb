mod cli;

use std::io::{self, BufRead, Write};

use anyhow::bail;
use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cli::{coord_to_string, describe_outcome, parse_coord, print_boards};
use naval_combat::{
    init_logging, BoardError, GameError, GameSession, GameStatus, Player, RandomPlayer, Turn,
    DEFAULT_NICKNAME,
};

#[derive(Parser)]
#[command(author, version, about = "Naval combat on a 10x10 grid against an automated opponent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full game where a random stand-in fires for the human side.
    Sim {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value = DEFAULT_NICKNAME)]
        nickname: String,
    },
    /// Play against the automated opponent from the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value = DEFAULT_NICKNAME)]
        nickname: String,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!("using seed {}", seed);
    SmallRng::seed_from_u64(seed)
}

fn new_session(rng: &mut SmallRng, nickname: &str) -> anyhow::Result<GameSession> {
    let mut session = GameSession::new(nickname);
    RandomPlayer::new().place_ships(rng, session.player_board_mut()?)?;
    session.start(rng)?;
    Ok(session)
}

fn run_sim(seed: Option<u64>, nickname: &str) -> anyhow::Result<()> {
    let mut rng = make_rng(seed);
    let mut session = new_session(&mut rng, nickname)?;
    let mut stand_in = RandomPlayer::new();
    let mut player_shots = 0usize;
    let mut opponent_shots = 0usize;

    while session.status() == GameStatus::InProgress {
        match session.turn() {
            Turn::Player => {
                let (row, col) = stand_in.select_target(&mut rng, session.opponent_board());
                match session.fire(row, col) {
                    Ok(_) => player_shots += 1,
                    Err(GameError::Board(BoardError::AlreadyTargeted { .. })) => continue,
                    Err(e) => return Err(e.into()),
                }
            }
            Turn::Opponent => {
                let report = session.opponent_turn(&mut rng)?;
                opponent_shots += report.shots.len();
            }
        }
    }

    let record = session.record();
    let winner = match session.status() {
        GameStatus::Won => record.nickname.as_str(),
        GameStatus::Lost => "opponent",
        other => bail!("simulation stopped in state {:?}", other),
    };
    println!("winner: {}", winner);
    println!("{} shots: {}", record.nickname, player_shots);
    println!("opponent shots: {}", opponent_shots);
    println!(
        "ships sunk: {} by {}, {} by opponent",
        record.ships_sunk_by_player, record.nickname, record.ships_sunk_by_opponent
    );
    Ok(())
}

fn run_play(seed: Option<u64>, nickname: &str) -> anyhow::Result<()> {
    let mut rng = make_rng(seed);
    let mut session = new_session(&mut rng, nickname)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Fire with coordinates like B7. Type 'board' to redraw, 'quit' to leave.");
    print_boards(session.player_board(), session.opponent_board());

    while session.status() == GameStatus::InProgress {
        if session.turn() == Turn::Opponent {
            let report = session.opponent_turn(&mut rng)?;
            for ((row, col), outcome) in &report.shots {
                println!("Opponent fires at {}: {}", coord_to_string(*row, *col), describe_outcome(*outcome));
            }
            print_boards(session.player_board(), session.opponent_board());
            continue;
        }

        print!("{}> ", session.nickname());
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };
        let input = line.trim();
        match input.to_ascii_lowercase().as_str() {
            "quit" | "exit" => return Ok(()),
            "board" => {
                print_boards(session.player_board(), session.opponent_board());
                continue;
            }
            _ => {}
        }
        let (row, col) = match parse_coord(input) {
            Some(coord) => coord,
            None => {
                println!("Invalid coordinate '{}'. Use a letter A-J and a number 1-10.", input);
                continue;
            }
        };
        match session.fire(row, col) {
            Ok(outcome) => println!("{}: {}", coord_to_string(row, col), describe_outcome(outcome)),
            Err(GameError::Board(e)) if e.is_recoverable() => println!("{}", e),
            Err(e) => return Err(e.into()),
        }
    }

    let record = session.record();
    match session.status() {
        GameStatus::Won => println!("You won, {}!", record.nickname),
        _ => println!("You lost, {}.", record.nickname),
    }
    println!(
        "Ships sunk: {} by you, {} by the opponent",
        record.ships_sunk_by_player, record.ships_sunk_by_opponent
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sim { seed, nickname } => run_sim(seed, &nickname),
        Commands::Play { seed, nickname } => run_play(seed, &nickname),
    }
}
