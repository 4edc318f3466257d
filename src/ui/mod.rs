//! Terminal UI: renders a game and turns key presses into engine calls.

mod app;
mod game_view;
mod roster;

pub use app::App;
pub use roster::{PlayerStyle, Roster};
