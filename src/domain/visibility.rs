/// Visibility engine: line-of-sight over the grid's continuous coordinate
/// system, plus per-player fog-of-war rendering.
///
/// `check_visible` walks the line between two integer-coordinate cells,
/// sampling every integer row/column crossing in between and requiring each
/// sample to land in a room. Passage cells (`#`) are additionally opaque on
/// purely diagonal lines of sight — you cannot see around a passage corner.
///
/// Testing only the candidate endpoint's terrain would make the rule
/// depend on which cell is passed first rather than on the geometry of
/// the two cells, breaking `check_visible(A, B) == check_visible(B, A)`.
/// Testing *both* endpoints' terrain is the symmetric form that still
/// blocks exactly the corner case the rule exists for.

use crate::domain::grid::Grid;
use crate::domain::player::Player;
use crate::domain::position::{Line, Position};

fn is_integral(v: f64) -> bool {
    v.fract() == 0.0
}

/// Is `pos` (whose `y` may be fractional) inside a room, treating a
/// fractional `y` as "in room if either vertically adjacent integer cell is
/// in room"?
fn in_room_vertical_sample(grid: &Grid, x: f64, y: f64) -> bool {
    if is_integral(y) {
        return grid.in_room(Position::new(x, y));
    }
    let up = Position::new(x, y.ceil());
    let down = Position::new(x, y.floor());
    grid.in_room(up) || grid.in_room(down)
}

/// Symmetric counterpart for a fractional `x` at integer `y`.
fn in_room_horizontal_sample(grid: &Grid, x: f64, y: f64) -> bool {
    if is_integral(x) {
        return grid.in_room(Position::new(x, y));
    }
    let right = Position::new(x.ceil(), y);
    let left = Position::new(x.floor(), y);
    grid.in_room(right) || grid.in_room(left)
}

/// Is the straight line between `a` and `b` unobstructed? Assumes both
/// positions are integer-coordinate and inside the grid.
pub fn check_visible(grid: &Grid, a: Position, b: Position) -> bool {
    let line = Line::through(a, b);
    let is_diagonal = match line {
        Line::Sloped { m, .. } => m != 0.0,
        Line::Vertical { .. } => false,
    };

    if is_diagonal && (grid.get_symbol(a) == '#' || grid.get_symbol(b) == '#') {
        return false;
    }

    if a.x != b.x {
        let (left, right) = if a.x < b.x { (a, b) } else { (b, a) };
        let mut x = left.x + 1.0;
        while x < right.x {
            let y = line.y_at(x).expect("non-vertical line has a y_at every x");
            if !in_room_vertical_sample(grid, x, y) {
                return false;
            }
            x += 1.0;
        }
    }

    if a.y != b.y {
        let (up, down) = if a.y < b.y { (a, b) } else { (b, a) };
        let mut y = up.y + 1.0;
        while y < down.y {
            let x = line.x_at(y);
            if !in_room_horizontal_sample(grid, x, y) {
                return false;
            }
            y += 1.0;
        }
    }

    true
}

/// Render a player's perspective frame: a blank grid of the same dimensions
/// as `grid`, with the player's own cell marked `@`, every cell within
/// range and in line of sight (or previously seen) showing current
/// authoritative terrain, and everything else blank.
///
/// Updates `player`'s `viewed_set` in place on a fresh line-of-sight hit.
pub fn render_perspective(grid: &Grid, player: &mut Player, radius: i32) -> Grid {
    let mut frame = Grid::blank(grid.width(), grid.height());
    let player_pos = player.position;
    let radius_sq = (radius * radius) as f64;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = Position::new(x as f64, y as f64);

            if cell.truncated() == player_pos.truncated() {
                frame.set_symbol(cell, '@');
                continue;
            }

            if player_pos.distance_squared(cell) > radius_sq {
                continue;
            }

            let key = cell.key();
            if player.has_seen(key) {
                frame.set_symbol(cell, grid.get_symbol(cell));
            } else if check_visible(grid, cell, player_pos) {
                player.mark_seen(key);
                frame.set_symbol(cell, grid.get_symbol(cell));
            }
        }
    }

    frame
}
