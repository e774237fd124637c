//! Move-submission wire protocol.
//!
//! One request per round trip: the client sends the pre-move board, where the
//! player wants to place (or that the AI should open) and the player's symbol.
//! The oracle answers with the whole board after the player's move and the
//! AI's reply, plus game-over information.

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::games::tictactoe::{Board, Position, Symbol};
use crate::oracle::OracleError;

/// Wire sentinel asking the AI to open the game.
pub const AI_FIRST_SENTINEL: i64 = -1;

/// What the player asks the oracle to do with the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Placement {
    /// No player placement; the AI makes the first move.
    AiFirst,
    /// Place the player's symbol here, then let the AI reply.
    At(Position),
}

impl Placement {
    /// The player's position, if this placement has one.
    pub fn position(self) -> Option<Position> {
        match self {
            Placement::AiFirst => None,
            Placement::At(pos) => Some(pos),
        }
    }
}

impl From<Placement> for i64 {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::AiFirst => AI_FIRST_SENTINEL,
            Placement::At(pos) => pos.to_index() as i64,
        }
    }
}

impl TryFrom<i64> for Placement {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value == AI_FIRST_SENTINEL {
            return Ok(Placement::AiFirst);
        }
        usize::try_from(value)
            .ok()
            .and_then(Position::from_index)
            .map(Placement::At)
            .ok_or_else(|| format!("invalid position: {}", value))
    }
}

/// Body of `POST /api/move`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MoveRequest {
    /// Board before the player's placement.
    pub board: Board,
    /// Requested placement.
    #[serde(rename = "position")]
    pub placement: Placement,
    /// The player's symbol; the AI plays the opponent.
    pub player: Symbol,
}

/// Winner as reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    /// X completed a line.
    X,
    /// O completed a line.
    O,
    /// Board filled without a line.
    #[serde(rename = "draw")]
    Draw,
}

impl Winner {
    /// The winning symbol, or `None` for a draw.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Winner::X => Some(Symbol::X),
            Winner::O => Some(Symbol::O),
            Winner::Draw => None,
        }
    }
}

impl From<Symbol> for Winner {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Winner::X,
            Symbol::O => Winner::O,
        }
    }
}

/// A successful oracle answer, structurally decoded but not yet reconciled
/// against the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MoveReply {
    /// Board after the player's move and the AI's reply.
    pub board: Board,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Winner when the game is over.
    pub winner: Option<Winner>,
    /// Board indices of the winning line, for wins.
    pub winning_line: Option<[usize; 3]>,
}

impl MoveReply {
    /// Reply for a game that goes on.
    pub fn ongoing(board: Board) -> Self {
        Self::new(board, false, None, None)
    }
}

/// Raw `/api/move` response: either a reply or `{error}`.
///
/// Unknown fields such as `ai_move` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MoveReplyBody {
    #[serde(default)]
    board: Option<Board>,
    #[serde(default)]
    game_over: bool,
    #[serde(default)]
    winner: Option<Winner>,
    #[serde(default)]
    winning_line: Option<[usize; 3]>,
    #[serde(default)]
    error: Option<String>,
}

impl MoveReplyBody {
    /// Error message carried by the body, if any.
    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Converts the raw body into a reply, surfacing oracle rejections.
    pub(crate) fn into_reply(self) -> Result<MoveReply, OracleError> {
        if let Some(message) = self.error {
            return Err(OracleError::Rejected { message });
        }
        let board = self
            .board
            .ok_or_else(|| OracleError::malformed("reply has no board"))?;
        Ok(MoveReply::new(
            board,
            self.game_over,
            self.winner,
            self.winning_line,
        ))
    }
}

/// Raw `/api/reset` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ResetReplyBody {
    #[serde(default)]
    board: Option<Board>,
    #[serde(default)]
    error: Option<String>,
}

impl ResetReplyBody {
    /// Error message carried by the body, if any.
    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Extracts the fresh board.
    pub(crate) fn into_board(self) -> Result<Board, OracleError> {
        if let Some(message) = self.error {
            return Err(OracleError::Rejected { message });
        }
        self.board
            .ok_or_else(|| OracleError::malformed("reset reply has no board"))
    }
}
