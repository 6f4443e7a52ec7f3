/// Movement and collision resolution: applies one keystroke's direction to
/// one player, one grid-cell step at a time.
///
/// A single call only ever moves a player by one cell. Continuous movement
/// (uppercase keys) is a loop the coordinator drives itself, calling this
/// once per step and broadcasting in between — keeping "loop until blocked"
/// a coordinator-level concern rather than something this module decides on
/// its own, since only the coordinator knows whether another message is
/// waiting to interleave (it never is, but that's an invariant this module
/// shouldn't have to assume).

use crate::domain::grid::Grid;
use crate::domain::player::Player;
use crate::domain::position::Position;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    Blocked,
    Moved { swapped_with: Option<usize>, gold_collected: i32 },
}

/// `(dx, dy)` for one of the eight movement keys, lowercase form. Returns
/// `None` for any other character.
pub fn direction_delta(key: char) -> Option<(f64, f64)> {
    match key.to_ascii_lowercase() {
        'h' => Some((-1.0, 0.0)),
        'l' => Some((1.0, 0.0)),
        'j' => Some((0.0, 1.0)),
        'k' => Some((0.0, -1.0)),
        'y' => Some((-1.0, -1.0)),
        'u' => Some((1.0, -1.0)),
        'b' => Some((-1.0, 1.0)),
        'n' => Some((1.0, 1.0)),
        _ => None,
    }
}

/// Uppercase movement letters mean "repeat until blocked".
pub fn is_continuous(key: char) -> bool {
    key.is_ascii_uppercase() && direction_delta(key).is_some()
}

/// Move `players[mover_index]` one cell in `delta`, resolving a swap if
/// another live player occupies the target cell and crediting gold if the
/// destination carries a pile. `original` supplies the terrain to restore
/// at the vacated cell.
pub fn step(
    grid: &mut Grid,
    original: &Grid,
    players: &mut [Player],
    mover_index: usize,
    delta: (f64, f64),
) -> StepOutcome {
    let current = players[mover_index].position;
    let target = Position::new(current.x + delta.0, current.y + delta.1);

    if !grid.valid_for_movement(target) {
        return StepOutcome::Blocked;
    }

    let occupant = players
        .iter()
        .enumerate()
        .find(|(i, p)| *i != mover_index && p.position.truncated() == target.truncated())
        .map(|(i, _)| i);

    if let Some(other_index) = occupant {
        let mover_letter = players[mover_index].letter;
        let other_letter = players[other_index].letter;
        players[mover_index].position = target;
        players[other_index].position = current;
        grid.set_symbol(target, mover_letter);
        grid.set_symbol(current, other_letter);
        return StepOutcome::Moved { swapped_with: Some(other_index), gold_collected: 0 };
    }

    grid.set_symbol(current, original.get_symbol(current));
    players[mover_index].position = target;
    grid.set_symbol(target, players[mover_index].letter);

    let gold_here = grid.get_gold(target);
    if gold_here > 0 {
        players[mover_index].score += gold_here;
        grid.remove_gold(target);
    }

    StepOutcome::Moved { swapped_with: None, gold_collected: gold_here }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    fn addr(port: u16) -> SocketAddr {
        format!("127.0.0.1:{port}").parse().unwrap()
    }

    fn open_room(w: usize, h: usize) -> Grid {
        let mut grid = Grid::blank(w, h);
        for y in 0..h {
            for x in 0..w {
                grid.set_symbol(Position::new(x as f64, y as f64), '.');
            }
        }
        grid
    }

    #[test]
    fn direction_delta_covers_eight_keys() {
        assert_eq!(direction_delta('h'), Some((-1.0, 0.0)));
        assert_eq!(direction_delta('l'), Some((1.0, 0.0)));
        assert_eq!(direction_delta('j'), Some((0.0, 1.0)));
        assert_eq!(direction_delta('k'), Some((0.0, -1.0)));
        assert_eq!(direction_delta('z'), None);
    }

    #[test]
    fn uppercase_key_is_continuous() {
        assert!(is_continuous('L'));
        assert!(!is_continuous('l'));
        assert!(!is_continuous('Q'));
    }

    #[test]
    fn step_blocked_by_wall_leaves_position_unchanged() {
        let mut grid = open_room(5, 5);
        grid.set_symbol(Position::new(3.0, 2.0), '-');
        let original = grid.clone();
        let mut players = vec![Player::new("a".to_string(), 'A', addr(1))];
        players[0].position = Position::new(2.0, 2.0);
        grid.set_symbol(players[0].position, 'A');

        let outcome = step(&mut grid, &original, &mut players, 0, (1.0, 0.0));
        assert_eq!(outcome, StepOutcome::Blocked);
        assert_eq!(players[0].position, Position::new(2.0, 2.0));
    }

    #[test]
    fn step_onto_open_floor_moves_and_restores_origin() {
        let mut grid = open_room(5, 5);
        let original = grid.clone();
        let mut players = vec![Player::new("a".to_string(), 'A', addr(1))];
        players[0].position = Position::new(2.0, 2.0);
        grid.set_symbol(players[0].position, 'A');

        let outcome = step(&mut grid, &original, &mut players, 0, (1.0, 0.0));
        assert_eq!(outcome, StepOutcome::Moved { swapped_with: None, gold_collected: 0 });
        assert_eq!(players[0].position, Position::new(3.0, 2.0));
        assert_eq!(grid.get_symbol(Position::new(2.0, 2.0)), '.');
        assert_eq!(grid.get_symbol(Position::new(3.0, 2.0)), 'A');
    }

    #[test]
    fn step_onto_gold_pile_credits_score_and_clears_pile() {
        let mut grid = open_room(5, 5);
        grid.set_gold(Position::new(3.0, 2.0), 7);
        grid.set_symbol(Position::new(3.0, 2.0), '*');
        let original = grid.clone();
        let mut players = vec![Player::new("a".to_string(), 'A', addr(1))];
        players[0].position = Position::new(2.0, 2.0);
        grid.set_symbol(players[0].position, 'A');

        let outcome = step(&mut grid, &original, &mut players, 0, (1.0, 0.0));
        assert_eq!(outcome, StepOutcome::Moved { swapped_with: None, gold_collected: 7 });
        assert_eq!(players[0].score, 7);
        assert_eq!(grid.get_gold(Position::new(3.0, 2.0)), 0);
    }

    #[test]
    fn step_onto_another_player_swaps_positions() {
        let mut grid = open_room(5, 5);
        let original = grid.clone();
        let mut players = vec![
            Player::new("a".to_string(), 'A', addr(1)),
            Player::new("b".to_string(), 'B', addr(2)),
        ];
        players[0].position = Position::new(2.0, 2.0);
        players[1].position = Position::new(3.0, 2.0);
        grid.set_symbol(players[0].position, 'A');
        grid.set_symbol(players[1].position, 'B');

        let outcome = step(&mut grid, &original, &mut players, 0, (1.0, 0.0));
        assert_eq!(outcome, StepOutcome::Moved { swapped_with: Some(1), gold_collected: 0 });
        assert_eq!(players[0].position, Position::new(3.0, 2.0));
        assert_eq!(players[1].position, Position::new(2.0, 2.0));
        assert_eq!(grid.get_symbol(Position::new(3.0, 2.0)), 'A');
        assert_eq!(grid.get_symbol(Position::new(2.0, 2.0)), 'B');
    }
}
