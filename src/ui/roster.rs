use ratatui::style::Color;

use crate::config::PlayerConfig;
use crate::game::Player;

/// How a player is shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStyle {
    pub id: Player,
    pub name: String,
    pub color: Color,
}

/// Display attributes for both players, looked up by engine id.
#[derive(Debug, Clone)]
pub struct Roster {
    players: Vec<PlayerStyle>,
}

impl Roster {
    pub fn new(players: Vec<PlayerStyle>) -> Self {
        Roster { players }
    }

    pub fn from_config(players: &[PlayerConfig]) -> Self {
        Roster::new(
            players
                .iter()
                .map(|p| PlayerStyle {
                    id: p.id,
                    name: p.name.clone(),
                    color: p.color().unwrap_or(Color::White),
                })
                .collect(),
        )
    }

    /// Name for `player`, falling back to the engine's own label
    pub fn name(&self, player: Player) -> String {
        self.find(player)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| player.to_string())
    }

    pub fn color(&self, player: Player) -> Color {
        self.find(player).map_or(Color::White, |p| p.color)
    }

    fn find(&self, player: Player) -> Option<&PlayerStyle> {
        self.players.iter().find(|p| p.id == player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_roster_from_default_config() {
        let roster = Roster::from_config(&AppConfig::default().players);
        assert_eq!(roster.name(Player::new(1)), "Player 1");
        assert_eq!(roster.color(Player::new(1)), Color::Red);
        assert_eq!(roster.color(Player::new(2)), Color::Yellow);
    }

    #[test]
    fn test_unknown_player_falls_back() {
        let roster = Roster::new(Vec::new());
        assert_eq!(roster.name(Player::new(4)), "Player 4");
        assert_eq!(roster.color(Player::new(4)), Color::White);
    }
}
