//! Client-side game session state machine.
//!
//! `GameSession` performs no I/O. Commands either hand back a [`MoveRequest`]
//! for the caller to dispatch or reject the command without touching any
//! state; [`GameSession::resolve`] feeds the oracle's answer back in. While a
//! request is outstanding the session sits in [`Phase::AiTurn`] and refuses
//! every other command, so at most one request is ever in flight.

use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::{Board, Position, Symbol, WinningLine};
use crate::oracle::OracleError;
use crate::protocol::{MoveReply, MoveRequest, Placement};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Phase {
    /// Waiting for the player to pick X or O.
    #[display("symbol choice")]
    AwaitingSymbolChoice,
    /// The player may submit a move.
    #[display("player turn")]
    PlayerTurn,
    /// A request is outstanding; the oracle is playing.
    #[display("AI turn")]
    AiTurn,
    /// The game has an outcome.
    #[display("game over")]
    GameOver,
}

/// Outcome of a finished game from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Outcome {
    /// The player completed a line.
    #[display("You Win!")]
    PlayerWin,
    /// The AI completed a line.
    #[display("AI Wins!")]
    AiWin,
    /// The board filled up.
    #[display("It's a Draw!")]
    Draw,
}

/// A finished game's outcome with its winning line, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct GameResult {
    /// Who won.
    outcome: Outcome,
    /// Winning line, present only for wins and only when the oracle sent one.
    winning_line: Option<WinningLine>,
}

/// A command the session refused. The session is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// A request is already outstanding.
    #[display("A move request is already outstanding")]
    Busy,
    /// The command does not apply to the current phase.
    #[display("Cannot {} during {}", action, phase)]
    WrongPhase {
        /// The refused command.
        action: &'static str,
        /// Phase the session was in.
        phase: Phase,
    },
    /// The chosen square already holds a symbol.
    #[display("{} is already occupied", position)]
    Occupied {
        /// The occupied square.
        position: Position,
    },
    /// `resolve` was called with nothing outstanding.
    #[display("No move request is outstanding")]
    NothingPending,
}

/// What a resolved request did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The game goes on; it is the player's turn.
    Continued,
    /// The session just entered `GameOver`. Reported once per game.
    Finished(GameResult),
    /// The request failed and was rolled back.
    Failed(OracleError),
}

/// Declarative render instruction for a board view.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RenderFrame {
    /// Board to draw, including the optimistic mark while a move is pending.
    board: Board,
    /// Current phase.
    phase: Phase,
    /// The player's symbol once chosen.
    player: Option<Symbol>,
    /// Square holding the not-yet-confirmed player mark.
    provisional: Option<Position>,
    /// Result once the game is over.
    result: Option<GameResult>,
    /// Transient error for the player.
    notice: Option<String>,
}

impl RenderFrame {
    /// One-line status for the player.
    pub fn status(&self) -> String {
        match self.phase {
            Phase::AwaitingSymbolChoice => {
                "Choose your symbol: X (you go first) or O (AI goes first)".to_string()
            }
            Phase::PlayerTurn => "Your turn!".to_string(),
            Phase::AiTurn if self.provisional.is_none() => {
                "AI is making first move...".to_string()
            }
            Phase::AiTurn => "AI is thinking...".to_string(),
            Phase::GameOver => match &self.result {
                Some(result) => result.outcome().to_string(),
                None => "Game Over".to_string(),
            },
        }
    }

    /// Whether `pos` is part of the winning line.
    pub fn is_winning_square(&self, pos: Position) -> bool {
        self.result
            .and_then(|r| r.winning_line)
            .is_some_and(|line| line.contains(pos))
    }
}

#[derive(Debug, Clone)]
struct Pending {
    request: MoveRequest,
    /// Phase to return to if the request fails.
    resume: Phase,
}

#[derive(Debug, Clone)]
enum State {
    AwaitingSymbolChoice,
    PlayerTurn,
    AiTurn(Pending),
    GameOver(GameResult),
}

/// One game from symbol choice to outcome.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Last board confirmed by the oracle.
    board: Board,
    player: Option<Symbol>,
    state: State,
    notice: Option<String>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session waiting for the player's symbol choice.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            player: None,
            state: State::AwaitingSymbolChoice,
            notice: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match self.state {
            State::AwaitingSymbolChoice => Phase::AwaitingSymbolChoice,
            State::PlayerTurn => Phase::PlayerTurn,
            State::AiTurn(_) => Phase::AiTurn,
            State::GameOver(_) => Phase::GameOver,
        }
    }

    /// Board as last confirmed by the oracle. Never includes the optimistic mark.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player's symbol, once chosen.
    pub fn player(&self) -> Option<Symbol> {
        self.player
    }

    /// The AI's symbol, once the player has chosen.
    pub fn ai(&self) -> Option<Symbol> {
        self.player.map(Symbol::opponent)
    }

    /// Result of the finished game.
    pub fn result(&self) -> Option<GameResult> {
        match &self.state {
            State::GameOver(result) => Some(*result),
            _ => None,
        }
    }

    /// True while a request is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, State::AiTurn(_))
    }

    /// Request currently outstanding, if any.
    pub fn pending_request(&self) -> Option<&MoveRequest> {
        match &self.state {
            State::AiTurn(pending) => Some(&pending.request),
            _ => None,
        }
    }

    /// Current transient error message.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Replaces the transient message shown with the next frame.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Drops the transient message. Game state is untouched.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Render instruction for the current state. Has no side effects.
    pub fn frame(&self) -> RenderFrame {
        let provisional = self
            .pending_request()
            .and_then(|request| request.placement.position());
        let mut board = self.board;
        if let (Some(pos), Some(player)) = (provisional, self.player) {
            board.place(pos, player);
        }

        RenderFrame {
            board,
            phase: self.phase(),
            player: self.player,
            provisional,
            result: self.result(),
            notice: self.notice.clone(),
        }
    }

    fn require_phase(&self, action: &'static str, expected: Phase) -> Result<(), SessionError> {
        let phase = self.phase();
        if phase == Phase::AiTurn {
            return Err(SessionError::Busy);
        }
        if phase != expected {
            return Err(SessionError::WrongPhase { action, phase });
        }
        Ok(())
    }

    /// Picks the player's symbol and starts the game.
    ///
    /// Returns the AI-opens request to dispatch when the player chose the
    /// symbol that moves second.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn choose_symbol(&mut self, symbol: Symbol) -> Result<Option<MoveRequest>, SessionError> {
        self.require_phase("choose a symbol", Phase::AwaitingSymbolChoice)?;

        self.board = Board::new();
        self.player = Some(symbol);
        self.notice = None;

        if symbol.moves_first() {
            info!(player = %symbol, "Player moves first");
            self.state = State::PlayerTurn;
            return Ok(None);
        }

        info!(player = %symbol, "AI moves first");
        let request = MoveRequest::new(self.board, Placement::AiFirst, symbol);
        self.state = State::AiTurn(Pending {
            request: request.clone(),
            resume: Phase::AwaitingSymbolChoice,
        });
        Ok(Some(request))
    }

    /// Places the player's symbol on `position` and returns the request to
    /// dispatch. The mark stays provisional until the oracle answers.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn submit_move(&mut self, position: Position) -> Result<MoveRequest, SessionError> {
        self.require_phase("submit a move", Phase::PlayerTurn)?;
        let Some(player) = self.player else {
            return Err(SessionError::WrongPhase {
                action: "submit a move",
                phase: self.phase(),
            });
        };
        if !self.board.is_empty(position) {
            debug!(%position, "Square occupied, move ignored");
            return Err(SessionError::Occupied { position });
        }

        let request = MoveRequest::new(self.board, Placement::At(position), player);
        self.notice = None;
        self.state = State::AiTurn(Pending {
            request: request.clone(),
            resume: Phase::PlayerTurn,
        });
        debug!(%position, "Move dispatched");
        Ok(request)
    }

    /// Applies the oracle's answer to the outstanding request.
    ///
    /// On success the oracle's board replaces the local one wholesale and the
    /// optimistic mark is discarded. On failure the session returns to the
    /// phase it was in before the request, with its board untouched.
    #[instrument(skip(self, reply), fields(phase = %self.phase(), ok = reply.is_ok()))]
    pub fn resolve(
        &mut self,
        reply: Result<MoveReply, OracleError>,
    ) -> Result<Resolution, SessionError> {
        let pending = match std::mem::replace(&mut self.state, State::AwaitingSymbolChoice) {
            State::AiTurn(pending) => pending,
            other => {
                self.state = other;
                return Err(SessionError::NothingPending);
            }
        };

        match reply.and_then(|reply| self.reconcile(&pending.request, reply)) {
            Ok((board, None)) => {
                self.board = board;
                self.notice = None;
                self.state = State::PlayerTurn;
                info!(marks = board.mark_count(), "Oracle replied, player's turn");
                Ok(Resolution::Continued)
            }
            Ok((board, Some(result))) => {
                self.board = board;
                self.notice = None;
                self.state = State::GameOver(result);
                info!(outcome = %result.outcome(), "Game over");
                Ok(Resolution::Finished(result))
            }
            Err(err) => {
                warn!(error = %err, "Request failed, rolling back");
                self.roll_back(&pending, &err);
                Ok(Resolution::Failed(err))
            }
        }
    }

    fn roll_back(&mut self, pending: &Pending, err: &OracleError) {
        match pending.resume {
            Phase::AwaitingSymbolChoice => {
                self.board = Board::new();
                self.player = None;
                self.state = State::AwaitingSymbolChoice;
                let message = match err {
                    OracleError::Rejected { message } => message.clone(),
                    _ => "Failed to get AI move".to_string(),
                };
                self.notice = Some(message);
            }
            _ => {
                self.state = State::PlayerTurn;
                self.notice = Some(err.user_message());
            }
        }
    }

    /// Checks an oracle reply against the confirmed board and the request.
    fn reconcile(
        &self,
        request: &MoveRequest,
        reply: MoveReply,
    ) -> Result<(Board, Option<GameResult>), OracleError> {
        let board = reply.board;
        if !board.is_successor_of(&self.board) {
            return Err(OracleError::malformed(
                "reply board overwrites an occupied square",
            ));
        }
        if !reply.game_over {
            return Ok((board, None));
        }

        let winner = reply
            .winner
            .ok_or_else(|| OracleError::malformed("game over without a winner"))?;
        let result = match winner.symbol() {
            None => GameResult {
                outcome: Outcome::Draw,
                winning_line: None,
            },
            Some(symbol) => {
                let outcome = if symbol == request.player {
                    Outcome::PlayerWin
                } else {
                    Outcome::AiWin
                };
                let winning_line = match reply.winning_line {
                    Some(indices) => Some(
                        WinningLine::verify(indices, &board, symbol).ok_or_else(|| {
                            OracleError::malformed(format!("{:?} is not a winning line", indices))
                        })?,
                    ),
                    None => None,
                };
                GameResult {
                    outcome,
                    winning_line,
                }
            }
        };
        Ok((board, Some(result)))
    }

    /// Starts a new game after the previous one ended.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn play_again(&mut self) -> Result<(), SessionError> {
        self.require_phase("play again", Phase::GameOver)?;
        self.clear();
        info!("New game, awaiting symbol choice");
        Ok(())
    }

    /// Abandons the current game without recording a result.
    ///
    /// Allowed in every phase except while a request is outstanding.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        self.clear();
        info!("Session restarted");
        Ok(())
    }

    fn clear(&mut self) {
        self.board = Board::new();
        self.player = None;
        self.notice = None;
        self.state = State::AwaitingSymbolChoice;
    }
}
