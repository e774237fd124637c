//! Win/loss/draw counters kept across games.

use serde::{Deserialize, Serialize};

use crate::session::Outcome;

/// Running totals of finished games.
///
/// Stored as `{"player": n, "ai": n, "draws": n}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    #[serde(rename = "player", default)]
    player_wins: u32,
    #[serde(rename = "ai", default)]
    ai_wins: u32,
    #[serde(default)]
    draws: u32,
}

impl Scoreboard {
    /// Builds a scoreboard with the given counts.
    pub fn new(player_wins: u32, ai_wins: u32, draws: u32) -> Self {
        Self {
            player_wins,
            ai_wins,
            draws,
        }
    }

    /// Games the player won.
    pub fn player_wins(&self) -> u32 {
        self.player_wins
    }

    /// Games the AI won.
    pub fn ai_wins(&self) -> u32 {
        self.ai_wins
    }

    /// Drawn games.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// All finished games.
    pub fn total(&self) -> u64 {
        u64::from(self.player_wins) + u64::from(self.ai_wins) + u64::from(self.draws)
    }

    /// Counts one finished game.
    pub fn record(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::PlayerWin => &mut self.player_wins,
            Outcome::AiWin => &mut self.ai_wins,
            Outcome::Draw => &mut self.draws,
        };
        *counter = counter.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_bumps_one_counter() {
        let mut scores = Scoreboard::default();
        scores.record(Outcome::Draw);
        assert_eq!(scores, Scoreboard::new(0, 0, 1));
        scores.record(Outcome::AiWin);
        scores.record(Outcome::PlayerWin);
        scores.record(Outcome::PlayerWin);
        assert_eq!(scores, Scoreboard::new(2, 1, 1));
        assert_eq!(scores.total(), 4);
    }

    #[test]
    fn test_total_at_counter_limit() {
        let mut scores = Scoreboard::new(u32::MAX, 1, 0);
        assert_eq!(scores.total(), u64::from(u32::MAX) + 1);

        scores.record(Outcome::PlayerWin);
        assert_eq!(scores.player_wins(), u32::MAX);

        let full = Scoreboard::new(u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(full.total(), 3 * u64::from(u32::MAX));
    }

    #[test]
    fn test_stored_shape() {
        let scores = Scoreboard::new(3, 1, 2);
        assert_eq!(
            serde_json::to_value(scores).unwrap(),
            serde_json::json!({"player": 3, "ai": 1, "draws": 2})
        );
    }
}
