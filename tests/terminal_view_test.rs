//! Tests for the terminal board view using ratatui's test backend.

use nextoe::{BoardView, GameSession, Position, Scoreboard, Symbol, TerminalView, Theme};
use ratatui::{Terminal, backend::TestBackend};

fn screen_text(view: &TerminalView<TestBackend>) -> String {
    view.terminal()
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn view() -> TerminalView<TestBackend> {
    TerminalView::new(Terminal::new(TestBackend::new(70, 24)).unwrap())
}

#[test]
fn test_symbol_choice_prompt() {
    let mut view = view();
    view.render(&GameSession::new().frame()).unwrap();
    assert!(screen_text(&view).contains("Choose your symbol"));
}

#[test]
fn test_player_turn_with_pending_mark() {
    let mut session = GameSession::new();
    session.choose_symbol(Symbol::X).unwrap();

    let mut view = view();
    view.render(&session.frame()).unwrap();
    assert!(screen_text(&view).contains("Your turn!"));

    session.submit_move(Position::Center).unwrap();
    view.render(&session.frame()).unwrap();
    let text = screen_text(&view);
    assert!(text.contains("AI is thinking..."));
    assert!(text.contains(" X "));
}

#[test]
fn test_scores_shown() {
    let mut view = view();
    view.show_preferences(Scoreboard::new(3, 1, 2), Theme::Light)
        .unwrap();
    view.render(&GameSession::new().frame()).unwrap();

    let text = screen_text(&view);
    assert!(text.contains("You 3"));
    assert!(text.contains("AI 1"));
    assert!(text.contains("Draws 2"));
    assert_eq!(view.theme(), Theme::Light);
}

#[test]
fn test_cursor_moves_without_frame() {
    let mut view = view();
    view.move_cursor(crossterm::event::KeyCode::Up).unwrap();
    assert_eq!(view.cursor(), Position::TopCenter);
}
