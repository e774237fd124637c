//! Tests for tic-tac-toe positions and boards.

use nextoe::{Board, LINES, Position, Symbol, WinningLine};

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(8), Some(Position::BottomRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_place_never_overwrites() {
    let mut board = Board::new();
    assert!(board.place(Position::TopLeft, Symbol::X));
    assert!(board.place(Position::Center, Symbol::O));
    assert!(!board.place(Position::Center, Symbol::X));

    assert_eq!(board.mark_count(), 2);
    assert!(!board.is_empty(Position::Center));
    assert!(board.is_empty(Position::BottomRight));
}

#[test]
fn test_every_line_verifies_when_held() {
    for line in LINES {
        let mut board = Board::new();
        for pos in line {
            board.place(pos, Symbol::O);
        }
        let indices = line.map(Position::to_index);
        let verified = WinningLine::verify(indices, &board, Symbol::O).expect("real line");
        assert_eq!(verified.positions(), &line);
        assert!(WinningLine::verify(indices, &board, Symbol::X).is_none());
    }
}
