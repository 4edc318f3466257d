use std::fmt;

/// Opaque identifier for the owner of a piece.
///
/// The engine only compares players for equality; names and colors belong to
/// whatever front end is presenting the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Player(u8);

impl Player {
    pub const fn new(id: u8) -> Self {
        Player(id)
    }

    /// Get the raw identifier
    pub fn id(self) -> u8 {
        self.0
    }
}

impl From<u8> for Player {
    fn from(id: u8) -> Self {
        Player(id)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}
