/// Grid: the in-memory representation of the game's map.
///
/// Two parallel layers, indexed `[row][col]`:
///   - `terrain` — characters drawn from the map alphabet, plus runtime
///     additions (player letters, gold piles).
///   - `gold`    — nugget count per cell, nonzero only where `terrain == '*'`.
///
/// `width()`/`height()` are the true dimensions. The legacy `+1` row/column
/// inflation some older clients expect is applied nowhere inside this
/// module — only at the wire-protocol boundary that documents it (see
/// `protocol::format_grid_message`).

use crate::domain::position::Position;
use crate::error::ServerError;
use std::path::Path;

pub const NULL_CHAR: char = '\0';

const WALL_CHARS: [char; 4] = ['-', '+', ' ', '|'];

/// Legal characters in a map *file*. `*` and uppercase letters are
/// introduced at runtime and never appear in a source map.
const MAP_ALPHABET: [char; 6] = [' ', '.', '-', '|', '+', '#'];

#[derive(Clone, Debug)]
pub struct Grid {
    terrain: Vec<Vec<char>>,
    gold: Vec<Vec<i32>>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Load a grid from a map file: LF-terminated lines, all equal width.
    pub fn load(map_path: &Path) -> Result<Self, ServerError> {
        let text = std::fs::read_to_string(map_path).map_err(|e| ServerError::MapLoadFailed {
            path: map_path.display().to_string(),
            reason: e.to_string(),
        })?;

        let lines: Vec<&str> = text.lines().collect();
        if lines.is_empty() {
            return Err(ServerError::MapLoadFailed {
                path: map_path.display().to_string(),
                reason: "map file is empty".to_string(),
            });
        }

        let width = lines[0].len();
        let height = lines.len();
        if width == 0 {
            return Err(ServerError::MapLoadFailed {
                path: map_path.display().to_string(),
                reason: "map file has zero-width rows".to_string(),
            });
        }

        let mut terrain = Vec::with_capacity(height);
        for (i, line) in lines.iter().enumerate() {
            if line.len() != width {
                return Err(ServerError::MapLoadFailed {
                    path: map_path.display().to_string(),
                    reason: format!("row {i} has width {} but row 0 has width {width}", line.len()),
                });
            }
            for ch in line.chars() {
                if !MAP_ALPHABET.contains(&ch) {
                    return Err(ServerError::MapLoadFailed {
                        path: map_path.display().to_string(),
                        reason: format!("row {i} contains illegal map character '{ch}'"),
                    });
                }
            }
            terrain.push(line.chars().collect::<Vec<char>>());
        }

        let gold = vec![vec![0; width]; height];

        Ok(Grid { terrain, gold, width, height })
    }

    /// A blank (all-space) scratch canvas, used as the base for a per-player
    /// perspective frame.
    pub fn blank(width: usize, height: usize) -> Self {
        Grid {
            terrain: vec![vec![' '; width]; height],
            gold: vec![vec![0; width]; height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_inside(&self, pos: Position) -> bool {
        let (x, y) = pos.truncated();
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get_symbol(&self, pos: Position) -> char {
        if !self.is_inside(pos) {
            return NULL_CHAR;
        }
        let (x, y) = pos.truncated();
        self.terrain[y as usize][x as usize]
    }

    pub fn set_symbol(&mut self, pos: Position, ch: char) {
        if !self.is_inside(pos) {
            return;
        }
        let (x, y) = pos.truncated();
        self.terrain[y as usize][x as usize] = ch;
    }

    pub fn get_gold(&self, pos: Position) -> i32 {
        if !self.is_inside(pos) {
            return 0;
        }
        let (x, y) = pos.truncated();
        self.gold[y as usize][x as usize]
    }

    pub fn set_gold(&mut self, pos: Position, n: i32) {
        if n < 0 || !self.is_inside(pos) {
            return;
        }
        let (x, y) = pos.truncated();
        self.gold[y as usize][x as usize] = n;
    }

    pub fn remove_gold(&mut self, pos: Position) {
        self.set_gold(pos, 0);
    }

    /// True iff inside the grid and terrain is not in the wall/void set.
    pub fn valid_for_movement(&self, pos: Position) -> bool {
        if !self.is_inside(pos) {
            return false;
        }
        !WALL_CHARS.contains(&self.get_symbol(pos))
    }

    /// True iff terrain is floor, a gold pile, or a player avatar.
    pub fn in_room(&self, pos: Position) -> bool {
        if !self.is_inside(pos) {
            return false;
        }
        let c = self.get_symbol(pos);
        c == '.' || c == '*' || c.is_ascii_uppercase()
    }

    /// Every row rendered for the `DISPLAY` wire message, in row order.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.terrain.iter().map(|row| row.iter().collect())
    }

    pub fn sum_gold(&self) -> i32 {
        self.gold.iter().flat_map(|row| row.iter()).sum()
    }
}
