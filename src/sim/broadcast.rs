/// View broadcaster: renders and sends a fresh `DISPLAY` frame to every
/// connected client after a state change.
///
/// Recipients are visited in stable player-table (join) order, then the
/// spectator, matching the ordering guarantee every broadcast must provide.

use crate::domain::grid::Grid;
use crate::domain::player::Player;
use crate::domain::visibility::render_perspective;
use crate::net::transport::Transport;
use crate::sim::protocol::format_display;

/// Render and send one `DISPLAY` frame per live player, then one to the
/// spectator (if present) using the unfiltered authoritative grid.
pub fn broadcast_display(
    transport: &mut dyn Transport,
    grid: &Grid,
    players: &mut [Player],
    spectator: Option<std::net::SocketAddr>,
    radius: i32,
) {
    for player in players.iter_mut() {
        let frame = render_perspective(grid, player, radius);
        transport.send(player.address, &format_display(&frame));
    }

    if let Some(addr) = spectator {
        transport.send(addr, &format_display(grid));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position::Position;
    use crate::net::transport::fake::FakeTransport;
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
    fn sends_one_frame_per_player_plus_spectator() {
        let grid = open_room(5, 5);
        let mut players = vec![
            Player::new("a".to_string(), 'A', addr(1)),
            Player::new("b".to_string(), 'B', addr(2)),
        ];
        players[0].position = Position::new(1.0, 1.0);
        players[1].position = Position::new(2.0, 2.0);
        let mut transport = FakeTransport::new();

        broadcast_display(&mut transport, &grid, &mut players, Some(addr(3)), 5);

        assert_eq!(transport.sent_to(addr(1)).len(), 1);
        assert_eq!(transport.sent_to(addr(2)).len(), 1);
        assert_eq!(transport.sent_to(addr(3)).len(), 1);
    }

    #[test]
    fn spectator_frame_is_unfiltered_authoritative_grid() {
        let mut grid = open_room(5, 5);
        grid.set_symbol(Position::new(4.0, 4.0), '*');
        let mut players = vec![];
        let mut transport = FakeTransport::new();

        broadcast_display(&mut transport, &grid, &mut players, Some(addr(9)), 5);

        let sent = transport.sent_to(addr(9));
        assert!(sent[0].contains('*'));
    }

    #[test]
    fn no_spectator_sends_nothing_extra() {
        let grid = open_room(3, 3);
        let mut players = vec![];
        let mut transport = FakeTransport::new();

        broadcast_display(&mut transport, &grid, &mut players, None, 5);

        assert!(transport.all_sent().is_empty());
    }
}
