/// Gold distribution at game initialization.
///
/// Two independent random choices: how many piles, and how the total is
/// split across them. Pile count and per-pile split are chosen first, with
/// no knowledge of the grid; placement is a rejection sample against the
/// grid afterward, so a pathologically small map just retries rather than
/// needing a separate "does this map have enough floor" check.

use crate::config::ServerConfig;
use crate::domain::grid::Grid;
use crate::domain::position::Position;
use rand::Rng;

/// Choose a pile count and split `config.gold_total` nuggets across that
/// many piles, placing each on a random `.` cell with no existing gold.
/// Returns the per-pile nugget counts actually placed, for logging.
pub fn distribute<R: Rng>(grid: &mut Grid, config: &ServerConfig, rng: &mut R) -> Vec<i32> {
    let num_piles = rng.gen_range(config.gold_min_piles..=config.gold_max_piles) as usize;
    let mut piles = vec![0i32; num_piles];

    for _ in 0..config.gold_total {
        let i = rng.gen_range(0..num_piles);
        piles[i] += 1;
    }

    for &nuggets in piles.iter() {
        if nuggets == 0 {
            continue;
        }
        let pos = random_empty_floor_cell(grid, rng);
        grid.set_gold(pos, nuggets);
        grid.set_symbol(pos, '*');
    }

    piles
}

/// Resample a uniformly random cell until one lands on bare floor (`.`)
/// with no gold already placed there.
fn random_empty_floor_cell<R: Rng>(grid: &Grid, rng: &mut R) -> Position {
    loop {
        let x = rng.gen_range(0..grid.width());
        let y = rng.gen_range(0..grid.height());
        let pos = Position::new(x as f64, y as f64);
        if grid.get_symbol(pos) == '.' && grid.get_gold(pos) == 0 {
            return pos;
        }
    }
}
