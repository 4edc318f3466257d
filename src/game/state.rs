use super::{Board, Player, Position, Run};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Won(Player),
    Tie,
}

/// What happened after an accepted drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementResult {
    /// No win and the board has room; `next_player` is now to move.
    InProgress {
        position: Position,
        player: Player,
        next_player: Player,
    },
    /// The piece completed `run`. The game is over.
    Won {
        position: Position,
        winner: Player,
        run: Run,
    },
    /// The piece filled the last empty cell without a win. The game is over.
    Tie { position: Position, player: Player },
}

impl PlacementResult {
    /// Where the piece landed
    pub fn position(&self) -> Position {
        match *self {
            PlacementResult::InProgress { position, .. }
            | PlacementResult::Won { position, .. }
            | PlacementResult::Tie { position, .. } => position,
        }
    }

    /// Who dropped the piece
    pub fn player(&self) -> Player {
        match *self {
            PlacementResult::InProgress { player, .. } | PlacementResult::Tie { player, .. } => {
                player
            }
            PlacementResult::Won { winner, .. } => winner,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PlacementResult::InProgress { .. })
    }
}

/// A single game: the board, the two players, whose turn it is, and
/// whether the game has finished.
///
/// Every operation either completes and mutates the state or fails with a
/// [`GameError`] leaving it untouched. Callers sharing a game across threads
/// must serialize access themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    players: [Player; 2],
    current: usize,
    status: GameStatus,
    winning_run: Option<Run>,
    last_placed: Option<Position>,
}

impl GameState {
    /// Start a game on an empty `width` x `height` board. `players` must be
    /// exactly two distinct identifiers; the first one moves first.
    pub fn new(width: usize, height: usize, players: &[Player]) -> Result<Self, GameError> {
        let board = Board::new(width, height)?;
        let players = match *players {
            [first, second] if first != second => [first, second],
            _ => return Err(GameError::InvalidPlayers),
        };

        tracing::debug!(width, height, first = %players[0], second = %players[1], "new game");

        Ok(GameState {
            board,
            players,
            current: 0,
            status: GameStatus::Ongoing,
            winning_run: None,
            last_placed: None,
        })
    }

    /// Fresh game with the same dimensions and players, first player to move.
    pub fn reset(&self) -> GameState {
        tracing::info!(
            width = self.board.width(),
            height = self.board.height(),
            "game reset"
        );
        GameState {
            board: self.board.cleared(),
            players: self.players,
            current: 0,
            status: GameStatus::Ongoing,
            winning_run: None,
            last_placed: None,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn players(&self) -> [Player; 2] {
        self.players
    }

    /// Player whose turn it is. Once the game is over this stays on the
    /// player who made the final move.
    pub fn current_player(&self) -> Player {
        self.players[self.current]
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::Ongoing
    }

    /// The run that ended the game, if it was won
    pub fn winning_run(&self) -> Option<Run> {
        self.winning_run
    }

    /// Position of the most recent accepted drop
    pub fn last_placed(&self) -> Option<Position> {
        self.last_placed
    }

    /// Columns that still accept a piece (empty once the game is over)
    pub fn open_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..self.board.width())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Row a piece dropped into `column` would land in, `None` if it is full.
    pub fn find_drop_row(&self, column: usize) -> Result<Option<usize>, GameError> {
        self.board.find_drop_row(column)
    }

    /// Drop the current player's piece into `column`.
    pub fn drop_piece(&mut self, column: usize) -> Result<PlacementResult, GameError> {
        let result = self.try_drop(column);
        if let Err(err) = &result {
            tracing::debug!(column, error = %err, "drop rejected");
        }
        result
    }

    fn try_drop(&mut self, column: usize) -> Result<PlacementResult, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameAlreadyOver);
        }

        let row = self
            .board
            .find_drop_row(column)?
            .ok_or(GameError::ColumnFull { column })?;

        // All checks passed; from here on the call succeeds
        let position = Position::new(row, column);
        let player = self.current_player();
        self.board.place(position, player);
        self.last_placed = Some(position);
        tracing::debug!(%player, row, column, "piece dropped");

        // Win takes priority over a full board
        if let Some(run) = self.board.run_through(position) {
            tracing::info!(winner = %player, direction = run.direction.name(), "game won");
            self.status = GameStatus::Won(player);
            self.winning_run = Some(run);
            return Ok(PlacementResult::Won {
                position,
                winner: player,
                run,
            });
        }

        if self.board.is_full() {
            tracing::info!(last_player = %player, "game tied");
            self.status = GameStatus::Tie;
            return Ok(PlacementResult::Tie { position, player });
        }

        self.current = 1 - self.current;
        Ok(PlacementResult::InProgress {
            position,
            player,
            next_player: self.current_player(),
        })
    }

    /// Scan the whole board for a winning run.
    pub fn check_win(&self) -> Option<Run> {
        self.board.find_run()
    }

    /// Board is full and nobody has four in a row
    pub fn check_tie(&self) -> bool {
        self.board.is_full() && self.check_win().is_none()
    }
}
