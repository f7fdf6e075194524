use log::{debug, info};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::board::{BOARD_SIZE, Board, ConfigError, CoordinateError, GameConfig, Square};
use crate::piece::{Archetype, Piece, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    WonBy(Side),
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::WonBy(_))
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::WonBy(side) => Some(*side),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => f.write_str("UNFINISHED"),
            GameStatus::WonBy(side) => write!(f, "{}_WON", side),
        }
    }
}

/// Why a move attempt was rejected. Variants are listed in the order the
/// checks run.
///
/// `Display` names squares with the default column letters; use
/// [`Game::describe_error`] for a game's own labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),
    #[error("Game already over")]
    GameOver,
    #[error("No piece on {0}")]
    EmptySquare(Square),
    #[error("Not your turn")]
    NotYourTurn,
    #[error("{archetype} cannot move from {from} to {to}")]
    IllegalShape {
        archetype: Archetype,
        from: Square,
        to: Square,
    },
    #[error("Cannot capture own piece on {0}")]
    FriendlyFire(Square),
    #[error("Path blocked on {0}")]
    PathBlocked(Square),
}

/// Result of an applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    config: Arc<GameConfig>,
    board: Board,
    turn: Side,
    status: GameStatus,
    move_count: usize,
}

impl Game {
    /// Create a new game with the standard layout
    pub fn new() -> Self {
        let mut game = Self::bare(Arc::new(GameConfig::default()));
        game.setup();
        game
    }

    /// Create a new game from a shared configuration
    pub fn with_config(config: Arc<GameConfig>) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Self::bare(config);
        game.setup();
        Ok(game)
    }

    /// A game with no pieces on the board, for building positions by hand.
    pub fn empty() -> Self {
        Self::bare(Arc::new(GameConfig::default()))
    }

    fn bare(config: Arc<GameConfig>) -> Self {
        Game {
            config,
            board: Board::empty(),
            turn: Side::Tangerine,
            status: GameStatus::InProgress,
            move_count: 0,
        }
    }

    /// Both sides get the configured back rank, left to right, on their home row.
    fn setup(&mut self) {
        let back_rank = self.config.back_rank;
        for (col, archetype) in back_rank.into_iter().enumerate() {
            for side in [Side::Tangerine, Side::Amethyst] {
                let square = Square::new_unchecked(col, side.home_row());
                self.board.set(square, Some(Piece::new(archetype, side)));
            }
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    /// Put `piece` on `square`, returning whatever was there.
    pub fn place_piece(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.board.set(square, Some(piece))
    }

    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        self.board.set(square, None)
    }

    pub fn set_turn(&mut self, side: Side) {
        self.turn = side;
    }

    /// Boolean form of [`Game::try_move`].
    pub fn attempt_move(&mut self, start: &str, end: &str) -> bool {
        self.try_move(start, end).is_ok()
    }

    /// Parse both coordinates with the game's column labels, then make the move.
    pub fn try_move(&mut self, start: &str, end: &str) -> Result<MoveOutcome, MoveError> {
        let from = self.config.parse_square(start).inspect_err(|e| {
            debug!("rejected {} -> {}: {}", start, end, e);
        })?;
        let to = self.config.parse_square(end).inspect_err(|e| {
            debug!("rejected {} -> {}: {}", start, end, e);
        })?;
        self.make_move(from, to)
    }

    /// Like the error's `Display`, but names squares with this game's column labels.
    pub fn describe_error(&self, error: &MoveError) -> String {
        let name = |square: &Square| self.config.format_square(*square);
        match error {
            MoveError::EmptySquare(square) => format!("No piece on {}", name(square)),
            MoveError::IllegalShape {
                archetype,
                from,
                to,
            } => format!("{} cannot move from {} to {}", archetype, name(from), name(to)),
            MoveError::FriendlyFire(square) => {
                format!("Cannot capture own piece on {}", name(square))
            }
            MoveError::PathBlocked(square) => format!("Path blocked on {}", name(square)),
            other => other.to_string(),
        }
    }

    /// Validate and apply a move. A rejected move leaves the game untouched.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        let turn = self.turn;
        let outcome = self.validate_move(from, to).inspect_err(|e| {
            debug!(
                "{} rejected {} -> {}: {}",
                turn,
                self.config.format_square(from),
                self.config.format_square(to),
                e
            );
        })?;

        let MoveOutcome { piece, captured, .. } = outcome;

        if let Some(target) = captured.filter(|target| target.archetype.is_royal()) {
            self.status = GameStatus::WonBy(turn);
            info!(
                "{} captured {} on {}: {}",
                turn,
                target,
                self.config.format_square(to),
                self.status
            );
        }

        self.board.set(to, Some(piece));
        self.board.set(from, None);

        self.turn = turn.opponent();
        self.move_count += 1;

        debug!(
            "move {}: {} {} -> {}",
            self.move_count,
            piece,
            self.config.format_square(from),
            self.config.format_square(to)
        );

        Ok(MoveOutcome {
            status: self.status,
            ..outcome
        })
    }

    /// Every read-only check, in order. The returned outcome carries the
    /// pre-move status.
    fn validate_move(&self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }

        let piece = self.board.get(from).ok_or(MoveError::EmptySquare(from))?;

        if piece.side != self.turn {
            return Err(MoveError::NotYourTurn);
        }

        if !piece.is_legal_shape(from, to) {
            return Err(MoveError::IllegalShape {
                archetype: piece.archetype,
                from,
                to,
            });
        }

        let captured = self.board.get(to);
        if captured.is_some_and(|target| target.side == piece.side) {
            return Err(MoveError::FriendlyFire(to));
        }

        // Jumping archetypes ignore anything in between.
        if piece.archetype.slides() {
            if let Some(blocker) = self.first_blocker(from, to) {
                return Err(MoveError::PathBlocked(blocker));
            }
        }

        Ok(MoveOutcome {
            piece,
            from,
            to,
            captured,
            status: self.status,
        })
    }

    fn first_blocker(&self, from: Square, to: Square) -> Option<Square> {
        from.between(to)
            .into_iter()
            .find(|&square| self.board.is_occupied(square))
    }

    /// Get a string representation of the board
    pub fn render(&self) -> String {
        let mut result = String::new();

        for row in (0..BOARD_SIZE).rev() {
            result.push_str(&(row + 1).to_string());
            for col in 0..BOARD_SIZE {
                let square = Square::new_unchecked(col, row);
                result.push(' ');
                result.push(self.board.get(square).map_or('.', |piece| piece.symbol()));
            }
            result.push('\n');
        }

        result.push(' ');
        for c in self.config.columns {
            result.push(' ');
            result.push(c);
        }
        result.push('\n');

        result
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
