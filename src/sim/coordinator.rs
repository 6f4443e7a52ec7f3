/// The game coordinator: a single-threaded, message-driven state machine.
///
/// Every piece of mutable game state — the authoritative grid, the original
/// map terrain, the player table, the spectator slot, and the gold running
/// total — is a field on this one value, not a module-scope global. Because
/// exactly one thread ever drives it (through `handle_datagram`), nothing
/// here needs a lock.

use crate::config::ServerConfig;
use crate::domain::grid::Grid;
use crate::domain::player::Player;
use crate::domain::position::Position;
use crate::domain::visibility;
use crate::net::transport::Transport;
use crate::sim::broadcast;
use crate::sim::gold;
use crate::sim::movement;
use crate::sim::protocol::{self, ClientMessage};
use rand::Rng;
use std::net::SocketAddr;

pub struct Coordinator<R: Rng> {
    grid: Grid,
    original_grid: Grid,
    players: Vec<Player>,
    spectator: Option<SocketAddr>,
    gold_remaining: i32,
    config: ServerConfig,
    rng: R,
    game_over: bool,
}

impl<R: Rng> Coordinator<R> {
    /// Build a coordinator from a freshly loaded map, distributing gold
    /// over it before any player has joined.
    pub fn new(map_grid: Grid, config: ServerConfig, mut rng: R) -> Self {
        let original_grid = map_grid.clone();
        let mut grid = map_grid;
        gold::distribute(&mut grid, &config, &mut rng);
        let gold_remaining = config.gold_total;

        Coordinator {
            grid,
            original_grid,
            players: Vec::new(),
            spectator: None,
            gold_remaining,
            config,
            rng,
            game_over: false,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Dispatch one inbound datagram. Unrecognized verbs are dropped
    /// silently, per the error-handling policy for malformed messages.
    pub fn handle_datagram(&mut self, transport: &mut dyn Transport, from: SocketAddr, raw: &str) {
        match protocol::parse_client_message(raw) {
            Some(ClientMessage::Play(name)) => self.handle_play(transport, from, name),
            Some(ClientMessage::Spectate) => self.handle_spectate(transport, from),
            Some(ClientMessage::Key(key)) => self.handle_key(transport, from, key),
            None => log::debug!("dropping malformed message from {from}: {raw:?}"),
        }
    }

    fn handle_play(&mut self, transport: &mut dyn Transport, from: SocketAddr, name: String) {
        if let Some(idx) = self.players.iter().position(|p| p.address == from) {
            log::debug!("duplicate PLAY from {from}, resending welcome sequence");
            self.send_welcome(transport, idx);
            return;
        }

        if self.players.len() >= self.config.max_players.min(26) {
            transport.send(from, &protocol::format_quit("Game is full: no more players can join."));
            log::warn!("rejected join from {from}: game full");
            return;
        }

        let sanitized = match protocol::sanitize_name(&name, self.config.max_name_length) {
            Some(n) => n,
            None => {
                transport.send(from, &protocol::format_quit("Sorry - you must provide a valid player's name."));
                return;
            }
        };

        let letter = self.next_available_letter();
        let mut player = Player::new(sanitized.clone(), letter, from);
        player.position = self.random_join_position();
        self.grid.set_symbol(player.position, letter);
        self.players.push(player);
        log::info!("{sanitized} joined as {letter}");

        let idx = self.players.len() - 1;
        self.send_welcome(transport, idx);
        broadcast::broadcast_display(
            transport,
            &self.grid,
            &mut self.players,
            self.spectator,
            self.config.visibility_radius,
        );
    }

    fn send_welcome(&mut self, transport: &mut dyn Transport, idx: usize) {
        let addr = self.players[idx].address;
        let letter = self.players[idx].letter;
        transport.send(addr, &protocol::format_ok(letter));
        transport.send(addr, &protocol::format_grid(&self.grid));
        transport.send(addr, &protocol::format_gold(0, 0, self.gold_remaining));
        let frame = visibility::render_perspective(&self.grid, &mut self.players[idx], self.config.visibility_radius);
        transport.send(addr, &protocol::format_display(&frame));
    }

    fn handle_spectate(&mut self, transport: &mut dyn Transport, from: SocketAddr) {
        if let Some(prev) = self.spectator {
            if prev != from {
                transport.send(prev, &protocol::format_quit("You have been replaced by a new spectator."));
            }
        }
        self.spectator = Some(from);
        transport.send(from, &protocol::format_grid(&self.grid));
        transport.send(from, &protocol::format_gold(0, 0, self.gold_remaining));
        transport.send(from, &protocol::format_display(&self.grid));
        log::info!("{from} is now spectating");
    }

    fn handle_key(&mut self, transport: &mut dyn Transport, from: SocketAddr, key: char) {
        if key == 'Q' || key == 'q' {
            self.handle_quit(transport, from);
            return;
        }

        let mover_index = match self.players.iter().position(|p| p.address == from) {
            Some(i) => i,
            None => {
                log::debug!("KEY from unregistered client {from} ignored");
                return;
            }
        };

        let delta = match movement::direction_delta(key) {
            Some(d) => d,
            None => {
                transport.send(from, &protocol::format_error("usage: unknown keystroke"));
                return;
            }
        };

        let continuous = movement::is_continuous(key);

        loop {
            let outcome = movement::step(&mut self.grid, &self.original_grid, &mut self.players, mover_index, delta);

            match outcome {
                movement::StepOutcome::Blocked => break,
                movement::StepOutcome::Moved { gold_collected, .. } => {
                    if gold_collected > 0 {
                        self.gold_remaining -= gold_collected;
                        self.broadcast_gold(transport, mover_index, gold_collected);
                    }
                    broadcast::broadcast_display(
                        transport,
                        &self.grid,
                        &mut self.players,
                        self.spectator,
                        self.config.visibility_radius,
                    );
                    if self.gold_remaining <= 0 {
                        self.end_game(transport);
                        return;
                    }
                }
            }

            if !continuous {
                break;
            }
        }
    }

    fn broadcast_gold(&mut self, transport: &mut dyn Transport, mover_index: usize, collected: i32) {
        let remaining = self.gold_remaining;
        for (i, player) in self.players.iter().enumerate() {
            let just_collected = if i == mover_index { collected } else { 0 };
            transport.send(player.address, &protocol::format_gold(just_collected, player.score, remaining));
        }
        if let Some(addr) = self.spectator {
            transport.send(addr, &protocol::format_gold(0, 0, remaining));
        }
    }

    fn handle_quit(&mut self, transport: &mut dyn Transport, from: SocketAddr) {
        if Some(from) == self.spectator {
            self.spectator = None;
            transport.send(from, &protocol::format_quit("Thanks for watching!"));
            log::info!("{from} stopped spectating");
            return;
        }

        if let Some(idx) = self.players.iter().position(|p| p.address == from) {
            let pos = self.players[idx].position;
            let restored = self.original_grid.get_symbol(pos);
            self.grid.set_symbol(pos, restored);
            let player = self.players.remove(idx);
            transport.send(from, &protocol::format_quit("Thanks for playing!"));
            log::info!("{} quit", player.name);
            broadcast::broadcast_display(
                transport,
                &self.grid,
                &mut self.players,
                self.spectator,
                self.config.visibility_radius,
            );
        }
    }

    fn end_game(&mut self, transport: &mut dyn Transport) {
        self.game_over = true;

        let mut ranking: Vec<&Player> = self.players.iter().collect();
        ranking.sort_by(|a, b| b.score.cmp(&a.score));

        let mut reason = String::from("GAME OVER:");
        for p in &ranking {
            reason.push('\n');
            reason.push_str(&format!("{} {} {}", p.letter, p.score, p.name));
        }
        let message = protocol::format_quit(&reason);

        for p in &self.players {
            transport.send(p.address, &message);
        }
        if let Some(addr) = self.spectator {
            transport.send(addr, &message);
        }

        log::info!("game over: {} players, gold exhausted", self.players.len());
        self.players.clear();
        self.spectator = None;
    }

    fn next_available_letter(&self) -> char {
        for c in b'A'..=b'Z' {
            let ch = c as char;
            if !self.players.iter().any(|p| p.letter == ch) {
                return ch;
            }
        }
        unreachable!("the GameFull check runs before every call site of this function")
    }

    fn random_join_position(&mut self) -> Position {
        loop {
            let x = self.rng.gen_range(0..self.grid.width());
            let y = self.rng.gen_range(0..self.grid.height());
            let pos = Position::new(x as f64, y as f64);
            if self.grid.get_symbol(pos) == '.' {
                return pos;
            }
        }
    }
}
