//! Terminal helpers for the command line front end: `A1`-style coordinates
//! and board printing.

use naval_combat::{Board, ShotOutcome, BOARD_SIZE};

/// Format (`row`, `col`) as column letter plus 1-based row, e.g. `C5`.
pub fn coord_to_string(row: usize, col: usize) -> String {
    let letter = (b'A' + col as u8) as char;
    format!("{}{}", letter, row + 1)
}

/// Parse `C5` / `c5` into (`row`, `col`). Returns `None` for anything that is
/// not a cell of the board.
pub fn parse_coord(input: &str) -> Option<(usize, usize)> {
    let input = input.trim();
    let mut chars = input.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() {
        return None;
    }
    let col = (letter as u8 - b'A') as usize;
    let row: usize = chars.as_str().trim().parse().ok()?;
    if row == 0 {
        return None;
    }
    let row = row - 1;
    if Board::is_within_bounds(row, col) {
        Some((row, col))
    } else {
        None
    }
}

pub fn describe_outcome(outcome: ShotOutcome) -> String {
    match outcome {
        ShotOutcome::Miss => "miss".into(),
        ShotOutcome::Hit => "hit".into(),
        ShotOutcome::HitAndSunk(class) => format!("hit, {} sunk", class),
    }
}

/// Print the player's own board (ships revealed) next to the opponent's
/// board as seen by the player.
pub fn print_boards(own: &Board, opponent: &Board) {
    let own = format!("{}", own.view(true));
    let theirs = format!("{}", opponent.view(false));
    let width = 4 + 2 * BOARD_SIZE as usize;
    println!("{:<width$}    {}", "Your fleet", "Enemy waters", width = width);
    for (left, right) in own.lines().zip(theirs.lines()) {
        println!("{:<width$}    {}", left, right, width = width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_letters_and_numbers() {
        assert_eq!(parse_coord("A1"), Some((0, 0)));
        assert_eq!(parse_coord("j10"), Some((9, 9)));
        assert_eq!(parse_coord(" c5 "), Some((4, 2)));
    }

    #[test]
    fn rejects_cells_off_the_board() {
        assert_eq!(parse_coord("K1"), None);
        assert_eq!(parse_coord("A0"), None);
        assert_eq!(parse_coord("A11"), None);
        assert_eq!(parse_coord("5C"), None);
        assert_eq!(parse_coord(""), None);
    }

    #[test]
    fn formats_back_to_the_same_text() {
        assert_eq!(coord_to_string(4, 2), "C5");
        assert_eq!(parse_coord(&coord_to_string(9, 0)), Some((9, 0)));
    }
}
