/// Player record and the client-address type shared by players and the
/// spectator slot.
///
/// `viewed_set` stores only the integer-key of every cell this player has
/// ever seen; positions are recomputed from the key on demand. This avoids
/// the ownership ambiguity of storing a duplicated position per set entry.

use crate::domain::position::Position;
use std::collections::HashSet;
use std::net::SocketAddr;

/// Address of a connected client. A thin alias over the transport's address
/// type keeps the domain layer from depending on networking details beyond
/// "clients are distinguishable and comparable".
pub type Addr = SocketAddr;

#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub letter: char,
    pub address: Addr,
    pub position: Position,
    pub score: i32,
    viewed: HashSet<(i32, i32)>,
}

impl Player {
    pub fn new(name: String, letter: char, address: Addr) -> Self {
        Player {
            name,
            letter,
            address,
            position: Position::new(-1.0, -1.0),
            score: 0,
            viewed: HashSet::new(),
        }
    }

    pub fn has_seen(&self, key: (i32, i32)) -> bool {
        self.viewed.contains(&key)
    }

    /// Record a freshly-seen cell. Returns false if it was already known,
    /// so callers can assert monotonicity in tests without recomputing set
    /// size before and after.
    pub fn mark_seen(&mut self, key: (i32, i32)) -> bool {
        self.viewed.insert(key)
    }

    pub fn viewed_count(&self) -> usize {
        self.viewed.len()
    }
}
