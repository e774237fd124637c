//! Async driver that connects a [`GameSession`] to an oracle and a view.

use std::time::{Duration, Instant};

use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::{Position, Symbol};
use crate::oracle::{MoveOracle, OracleError};
use crate::prefs::{Scoreboard, SharedPreferences, Theme};
use crate::protocol::MoveRequest;
use crate::session::{GameSession, RenderFrame, Resolution, SessionError};

/// Failure to draw a frame.
#[derive(Debug, Clone, Display, Error)]
#[display("View error: {} at {}:{}", message, file, line)]
pub struct ViewError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ViewError {
    /// Creates a new view error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Draws whatever the session says to draw.
///
/// A view is a pure collaborator: it never mutates game state, and its
/// failures never reach the session.
pub trait BoardView {
    /// Draws one frame.
    fn render(&mut self, frame: &RenderFrame) -> Result<(), ViewError>;

    /// Shows the current scores and theme.
    fn show_preferences(&mut self, scores: Scoreboard, theme: Theme) -> Result<(), ViewError> {
        let _ = (scores, theme);
        Ok(())
    }
}

/// Message shown when the reset endpoint does not give back a fresh board.
pub const RESET_FAILED: &str = "Failed to reset game";

/// How long a notice stays on screen before [`GameClient::expire_notice`]
/// clears it.
pub const NOTICE_LIFETIME: Duration = Duration::from_secs(3);

/// Owns one session and drives it against a [`MoveOracle`].
///
/// Every command renders before it dispatches (so the optimistic mark and
/// "AI is thinking..." are visible while waiting), bounds the oracle call
/// with the request timeout, resolves, renders again, and records the score
/// when the game has just ended.
#[derive(Debug)]
pub struct GameClient<O, V> {
    session: GameSession,
    oracle: O,
    view: V,
    preferences: SharedPreferences,
    request_timeout: Duration,
    notice_lifetime: Duration,
    notice_since: Option<Instant>,
}

impl<O, V> GameClient<O, V>
where
    O: MoveOracle,
    V: BoardView,
{
    /// Creates a client with a fresh session.
    pub fn new(
        oracle: O,
        view: V,
        preferences: SharedPreferences,
        request_timeout: Duration,
    ) -> Self {
        Self {
            session: GameSession::new(),
            oracle,
            view,
            preferences,
            request_timeout,
            notice_lifetime: NOTICE_LIFETIME,
            notice_since: None,
        }
    }

    /// Overrides how long notices stay on screen.
    pub fn with_notice_lifetime(mut self, lifetime: Duration) -> Self {
        self.notice_lifetime = lifetime;
        self
    }

    /// The session being driven.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view (cursor movement and the like).
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The shared preferences handle.
    pub fn preferences(&self) -> &SharedPreferences {
        &self.preferences
    }

    /// Redraws the current frame and preferences.
    pub fn refresh(&mut self) {
        self.show_preferences();
        self.render();
    }

    /// Clears the notice once it has been shown for the notice lifetime.
    ///
    /// Returns true if a notice was cleared and the frame redrawn.
    pub fn expire_notice(&mut self) -> bool {
        let Some(since) = self.notice_since else {
            return false;
        };
        if since.elapsed() < self.notice_lifetime {
            return false;
        }
        debug!("Notice expired");
        self.session.clear_notice();
        self.render();
        true
    }

    fn render(&mut self) {
        let frame = self.session.frame();
        // Commands clear the notice before dispatching, so a repeated
        // failure shows up here as None followed by a fresh notice.
        match (frame.notice(), self.notice_since) {
            (Some(_), None) => self.notice_since = Some(Instant::now()),
            (None, Some(_)) => self.notice_since = None,
            _ => {}
        }
        if let Err(e) = self.view.render(&frame) {
            warn!(error = %e, "Render failed, ignoring");
        }
    }

    fn show_preferences(&mut self) {
        let (scores, theme) = {
            let prefs = self.preferences.lock();
            (prefs.scores(), prefs.theme())
        };
        if let Err(e) = self.view.show_preferences(scores, theme) {
            warn!(error = %e, "Preference display failed, ignoring");
        }
    }

    /// Picks the player's symbol. When the AI opens, waits for its move.
    ///
    /// Returns the resolution of the AI's opening move, if one was requested.
    #[instrument(skip(self))]
    pub async fn choose_symbol(
        &mut self,
        symbol: Symbol,
    ) -> Result<Option<Resolution>, SessionError> {
        let request = self.session.choose_symbol(symbol)?;
        self.render();
        match request {
            Some(request) => self.dispatch(request).await.map(Some),
            None => Ok(None),
        }
    }

    /// Plays `position` and waits for the oracle's answer.
    #[instrument(skip(self))]
    pub async fn submit_move(&mut self, position: Position) -> Result<Resolution, SessionError> {
        let request = self.session.submit_move(position)?;
        self.render();
        self.dispatch(request).await
    }

    async fn dispatch(&mut self, request: MoveRequest) -> Result<Resolution, SessionError> {
        debug!(placement = ?request.placement, "Awaiting oracle");
        let reply = match tokio::time::timeout(self.request_timeout, self.oracle.submit(&request))
            .await
        {
            Ok(reply) => reply,
            Err(_) => {
                warn!(timeout = ?self.request_timeout, "Oracle timed out");
                Err(OracleError::Timeout {
                    after: self.request_timeout,
                })
            }
        };

        let resolution = self.session.resolve(reply)?;
        if let Resolution::Finished(result) = &resolution {
            let outcome = *result.outcome();
            match self.preferences.record_outcome(outcome) {
                Ok(scores) => info!(%outcome, total = scores.total(), "Score recorded"),
                Err(e) => warn!(error = %e, "Failed to persist scores"),
            }
            self.show_preferences();
        }
        self.render();
        Ok(resolution)
    }

    /// Starts the next game after a finished one.
    #[instrument(skip(self))]
    pub fn play_again(&mut self) -> Result<(), SessionError> {
        self.session.play_again()?;
        self.render();
        Ok(())
    }

    /// Abandons the current game and asks the oracle for a fresh board.
    ///
    /// The local session is reset even when the oracle cannot be reached;
    /// the failure is shown as a notice.
    #[instrument(skip(self))]
    pub async fn restart(&mut self) -> Result<(), SessionError> {
        self.session.restart()?;
        self.render();

        match tokio::time::timeout(self.request_timeout, self.oracle.reset()).await {
            Ok(Ok(board)) if board.is_blank() => debug!("Oracle board reset"),
            Ok(Ok(board)) => {
                warn!(marks = board.mark_count(), "Reset returned a non-empty board");
                self.session.set_notice(RESET_FAILED);
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Reset failed");
                self.session.set_notice(RESET_FAILED);
            }
            Err(_) => {
                warn!(timeout = ?self.request_timeout, "Reset timed out");
                self.session.set_notice(RESET_FAILED);
            }
        }
        self.render();
        Ok(())
    }

    /// Switches the theme and redraws.
    #[instrument(skip(self))]
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = match self.preferences.toggle_theme() {
            Ok(theme) => theme,
            Err(e) => {
                warn!(error = %e, "Failed to persist theme");
                self.preferences.theme()
            }
        };
        self.refresh();
        theme
    }
}
