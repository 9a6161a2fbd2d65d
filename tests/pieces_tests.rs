//! Pieces tests - shapes, quarter turns, and horizontal kicks

use blockfall::core::{try_rotate, Board, Piece, Shape};
use blockfall::types::{PieceKind, RotateDir};

fn cells(shape: &Shape) -> Vec<(i8, i8)> {
    shape.cells().collect()
}

#[test]
fn test_spawn_matrices() {
    assert_eq!(cells(&Shape::spawn(PieceKind::I)), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(cells(&Shape::spawn(PieceKind::O)), [(0, 0), (1, 0), (0, 1), (1, 1)]);
    assert_eq!(cells(&Shape::spawn(PieceKind::T)), [(1, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(cells(&Shape::spawn(PieceKind::S)), [(1, 0), (2, 0), (0, 1), (1, 1)]);
    assert_eq!(cells(&Shape::spawn(PieceKind::Z)), [(0, 0), (1, 0), (1, 1), (2, 1)]);
    assert_eq!(cells(&Shape::spawn(PieceKind::J)), [(0, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(cells(&Shape::spawn(PieceKind::L)), [(2, 0), (0, 1), (1, 1), (2, 1)]);
}

#[test]
fn test_o_rotation_is_identity() {
    let o = Shape::spawn(PieceKind::O);
    assert_eq!(o.rotated(RotateDir::Cw), o);
    assert_eq!(o.rotated(RotateDir::Ccw), o);
}

#[test]
fn test_cw_then_ccw_is_identity() {
    for kind in PieceKind::ALL {
        let shape = Shape::spawn(kind);
        assert_eq!(shape.rotated(RotateDir::Cw).rotated(RotateDir::Ccw), shape);
        assert_eq!(shape.rotated(RotateDir::Ccw).rotated(RotateDir::Cw), shape);
    }
}

#[test]
fn test_four_turns_is_identity() {
    for kind in PieceKind::ALL {
        let shape = Shape::spawn(kind);
        let mut turned = shape;
        for _ in 0..4 {
            turned = turned.rotated(RotateDir::Ccw);
        }
        assert_eq!(turned, shape, "{:?}", kind);
    }
}

#[test]
fn test_spawn_positions() {
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        let expected_x = (10 - piece.shape.size() as i8) / 2;
        assert_eq!(piece.x, expected_x);
        assert_eq!(piece.y, -1);
    }
}

#[test]
fn test_spawn_never_collides_on_empty_board() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        assert!(!board.collides(&Piece::spawn(kind)));
    }
}

#[test]
fn test_rotate_against_left_wall_kicks_right() {
    let board = Board::new();
    // Vertical I hugging the left wall: bar in matrix column 2, x = -2.
    let mut piece = Piece::spawn(PieceKind::I);
    piece.shape = piece.shape.rotated(RotateDir::Cw);
    piece.x = -2;
    piece.y = 5;
    assert!(!board.collides(&piece));

    let rotated = try_rotate(&piece, RotateDir::Cw, |p| board.collides(p)).unwrap();
    // Horizontal at x = -2, -1 and -3 pokes through the wall; x = 0 is clear.
    assert_eq!(rotated.x, 0);
    assert!(!board.collides(&rotated));
}

#[test]
fn test_rotate_rejected_in_narrow_shaft() {
    let mut board = Board::new();
    for y in 0..20 {
        board.fill_row_except(y, PieceKind::Z, &[4]);
    }
    let mut piece = Piece::spawn(PieceKind::I);
    piece.shape = piece.shape.rotated(RotateDir::Cw);
    piece.x = 2;
    piece.y = 10;
    assert!(!board.collides(&piece));

    assert_eq!(try_rotate(&piece, RotateDir::Cw, |p| board.collides(p)), None);
    assert_eq!(try_rotate(&piece, RotateDir::Ccw, |p| board.collides(p)), None);
}
