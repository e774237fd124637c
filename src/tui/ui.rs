//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::games::tictactoe::{Position, Square, Symbol};
use crate::prefs::{Scoreboard, Theme};
use crate::session::{Phase, RenderFrame};

/// Colors for one theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    fg: Color,
    bg: Color,
    dim: Color,
    title: Color,
    x: Color,
    o: Color,
    win: Color,
    notice: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                dim: Color::DarkGray,
                title: Color::Cyan,
                x: Color::LightBlue,
                o: Color::LightRed,
                win: Color::Green,
                notice: Color::Yellow,
            },
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                dim: Color::Gray,
                title: Color::Blue,
                x: Color::Blue,
                o: Color::Red,
                win: Color::LightGreen,
                notice: Color::Magenta,
            },
        }
    }
}

/// Everything the screen shows.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    /// Latest render instruction.
    pub frame: &'a RenderFrame,
    /// Highlighted square.
    pub cursor: Position,
    /// Running scores.
    pub scores: Scoreboard,
    /// Active theme.
    pub theme: Theme,
}

/// Renders the whole screen.
pub fn draw(f: &mut Frame, screen: &Screen<'_>) {
    let palette = Palette::for_theme(screen.theme);
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(1), // Scores
            Constraint::Min(11),   // Board
            Constraint::Length(4), // Status + notice
            Constraint::Length(1), // Key help
        ])
        .split(area);

    let title = Paragraph::new("NexToe - Tic Tac Toe")
        .style(
            Style::default()
                .fg(palette.title)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    f.render_widget(scores_line(&screen.scores, palette), chunks[1]);
    draw_board(f, chunks[2], screen, palette);
    draw_status(f, chunks[3], screen.frame, palette);

    let help = Paragraph::new(help_text(*screen.frame.phase()))
        .style(Style::default().fg(palette.dim))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[4]);
}

fn scores_line(scores: &Scoreboard, palette: Palette) -> Paragraph<'static> {
    let line = Line::from(vec![
        Span::styled(
            format!("You {}", scores.player_wins()),
            Style::default().fg(palette.x),
        ),
        Span::raw("   "),
        Span::styled(
            format!("AI {}", scores.ai_wins()),
            Style::default().fg(palette.o),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Draws {}", scores.draws()),
            Style::default().fg(palette.dim),
        ),
    ]);
    Paragraph::new(line).alignment(Alignment::Center)
}

fn help_text(phase: Phase) -> &'static str {
    match phase {
        Phase::AwaitingSymbolChoice => "x/o choose symbol | t theme | q quit",
        Phase::PlayerTurn => "1-9 or arrows+Enter move | r restart | t theme | q quit",
        Phase::AiTurn => "waiting for the AI...",
        Phase::GameOver => "p play again | r restart | t theme | q quit",
    }
}

fn draw_status(f: &mut Frame, area: Rect, frame: &RenderFrame, palette: Palette) {
    let mut lines = vec![Line::from(Span::styled(
        frame.status(),
        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
    ))];
    if let Some(notice) = frame.notice() {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(palette.notice),
        )));
    }

    let status = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn draw_board(f: &mut Frame, area: Rect, screen: &Screen<'_>, palette: Palette) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, cells) in Position::ALL.chunks(3).enumerate() {
        draw_row(f, rows[row * 2], screen, palette, cells);
        if row < 2 {
            let sep = Paragraph::new("─".repeat(board_area.width as usize))
                .style(Style::default().fg(palette.dim));
            f.render_widget(sep, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(
    f: &mut Frame,
    area: Rect,
    screen: &Screen<'_>,
    palette: Palette,
    positions: &[Position],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for (i, pos) in positions.iter().enumerate() {
        draw_cell(f, cols[i * 2], screen, palette, *pos);
        if i < 2 {
            let sep = Paragraph::new("│").style(Style::default().fg(palette.dim));
            f.render_widget(sep, cols[i * 2 + 1]);
        }
    }
}

fn draw_cell(f: &mut Frame, area: Rect, screen: &Screen<'_>, palette: Palette, pos: Position) {
    let frame = screen.frame;
    let (text, mut style) = match frame.board().get(pos) {
        Square::Empty => (
            format!(" {} ", pos.to_index() + 1),
            Style::default().fg(palette.dim),
        ),
        Square::Occupied(Symbol::X) => (
            " X ".to_string(),
            Style::default().fg(palette.x).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Symbol::O) => (
            " O ".to_string(),
            Style::default().fg(palette.o).add_modifier(Modifier::BOLD),
        ),
    };

    if *frame.provisional() == Some(pos) {
        style = style.add_modifier(Modifier::DIM | Modifier::ITALIC);
    }
    if frame.is_winning_square(pos) {
        style = style.bg(palette.win).fg(palette.bg);
    }
    if pos == screen.cursor && *frame.phase() == Phase::PlayerTurn {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let paragraph =
        Paragraph::new(Line::from(Span::styled(text, style))).alignment(Alignment::Center);
    let line = if area.height >= 3 {
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        }
    } else {
        area
    };
    f.render_widget(paragraph, line);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
