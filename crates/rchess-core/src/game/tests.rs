//! 対局エンジンのテスト

use super::*;
use crate::error::{BoardError, ChessError, InvalidMoveReason, InvalidStateReason, Result};
use crate::movegen;
use crate::types::{ChessSquare, Color, Piece, PieceType};

fn sq(s: &str) -> ChessSquare {
    s.parse().unwrap()
}

fn play(game: &mut ChessMatch, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        game.perform_move(sq(from), sq(to))
            .unwrap_or_else(|e| panic!("{from}{to} failed: {e}"));
    }
}

fn put(game: &mut ChessMatch, s: &str, piece_type: PieceType, color: Color) {
    game.place(sq(s), Piece::new(piece_type, color)).unwrap();
}

fn put_id(game: &mut ChessMatch, s: &str, piece_type: PieceType, color: Color) -> PieceId {
    game.place(sq(s), Piece::new(piece_type, color)).unwrap()
}

fn empty() -> ChessMatch {
    ChessMatch::empty(MatchOptions::default()).unwrap()
}

/// 盤面グリッド・駒記録・盤上リストの整合性
fn assert_consistent(game: &ChessMatch) {
    let grid: Vec<_> = game.board.occupied().collect();
    assert_eq!(grid.len(), game.on_board.len());
    for (square, id) in grid {
        assert_eq!(game.record(id).square, Some(square));
        assert!(game.on_board.contains(&id));
    }
    for &id in &game.captured {
        assert_eq!(game.record(id).square, None);
    }
}

/// 盤上の全ての駒の全ての擬似合法手を試し、完全に元に戻ることを確認する
fn assert_all_moves_undo(game: &mut ChessMatch) {
    let before = game.clone();
    let ids = game.on_board.clone();
    for id in ids {
        let from = game.record(id).square.unwrap();
        for to in movegen::pseudo_legal_targets(game, id) {
            let undo = game.do_move(from, to).unwrap();
            assert_consistent(game);
            game.undo_move(undo).unwrap();
            assert_eq!(*game, before, "{from} -> {to} was not undone");
        }
    }
}

#[test]
fn test_initial_setup() {
    let game = ChessMatch::new();
    assert_eq!(game.turn(), 1);
    assert_eq!(game.current_player(), Color::White);
    assert!(!game.check());
    assert!(!game.checkmate());
    assert_eq!(game.pieces_on_board(), 32);
    assert!(game.captured_pieces().is_empty());
    assert_consistent(&game);

    let pieces = game.pieces();
    assert_eq!(pieces[7][4], Some(Piece::new(PieceType::King, Color::White)));
    assert_eq!(pieces[0][3], Some(Piece::new(PieceType::Queen, Color::Black)));
    assert_eq!(pieces[6][0], Some(Piece::new(PieceType::Pawn, Color::White)));
    assert!(pieces[4].iter().all(Option::is_none));
}

#[test]
fn test_undo_restores_everything() {
    let mut game = ChessMatch::new();
    assert_all_moves_undo(&mut game);

    // アンパッサンが可能な局面
    play(&mut game, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);
    assert_all_moves_undo(&mut game);
}

#[test]
fn test_undo_castling_and_capture() {
    let mut game = empty();
    put(&mut game, "e1", PieceType::King, Color::White);
    put(&mut game, "a1", PieceType::Rook, Color::White);
    put(&mut game, "h1", PieceType::Rook, Color::White);
    put(&mut game, "e8", PieceType::King, Color::Black);
    put(&mut game, "h8", PieceType::Rook, Color::Black);
    put(&mut game, "c3", PieceType::Knight, Color::Black);
    put(&mut game, "b2", PieceType::Pawn, Color::White);
    assert_all_moves_undo(&mut game);
}

#[test]
fn test_validation_errors() {
    fn invalid<T>(reason: InvalidMoveReason) -> Result<T> {
        Err(ChessError::InvalidMove(reason))
    }

    let mut game = ChessMatch::new();

    assert_eq!(game.possible_moves(sq("e4")), invalid(InvalidMoveReason::NoPiece));
    assert_eq!(game.possible_moves(sq("e7")), invalid(InvalidMoveReason::NotYourPiece));
    assert_eq!(game.possible_moves(sq("a1")), invalid(InvalidMoveReason::NoPossibleMoves));
    assert_eq!(
        game.perform_move(sq("e2"), sq("e5")),
        invalid(InvalidMoveReason::IllegalTarget)
    );
    assert_eq!(game, ChessMatch::new());

    let err = game.perform_move(sq("e7"), sq("e5")).unwrap_err();
    assert_eq!(err.to_string(), "Invalid move: The chosen piece is not yours");
}

#[test]
fn test_turn_and_capture() {
    let mut game = ChessMatch::new();
    play(&mut game, &[("e2", "e4"), ("d7", "d5")]);
    let captured = game.perform_move(sq("e4"), sq("d5")).unwrap();
    assert_eq!(captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
    assert_eq!(game.turn(), 4);
    assert_eq!(game.current_player(), Color::Black);
    assert_eq!(game.pieces_on_board(), 31);
    assert_eq!(game.captured_pieces(), vec![Piece::new(PieceType::Pawn, Color::Black)]);
    assert_eq!(game.move_count_at(sq("d5")), Some(2));
    assert_consistent(&game);
}

#[test]
fn test_self_check_is_rejected() {
    let mut game = empty();
    put(&mut game, "e1", PieceType::King, Color::White);
    put(&mut game, "e2", PieceType::Rook, Color::White);
    put(&mut game, "e8", PieceType::Rook, Color::Black);
    put(&mut game, "a8", PieceType::King, Color::Black);
    let before = game.clone();

    assert!(game.possible_moves(sq("e2")).unwrap().contains(sq("d2").to_square()));
    assert_eq!(game.perform_move(sq("e2"), sq("d2")), Err(ChessError::SelfCheck));
    assert_eq!(game, before);

    // 縦に動く手は合法
    let legal = game.legal_targets(sq("e2")).unwrap();
    assert_eq!(legal.count(), 6);
    assert!(!legal.contains(sq("d2").to_square()));
    assert_eq!(game, before);

    let captured = game.perform_move(sq("e2"), sq("e8")).unwrap();
    assert_eq!(captured, Some(Piece::new(PieceType::Rook, Color::Black)));
}

#[test]
fn test_check_and_escape() {
    let mut game = empty();
    put(&mut game, "e1", PieceType::King, Color::White);
    put(&mut game, "a2", PieceType::Rook, Color::White);
    put(&mut game, "h8", PieceType::King, Color::Black);
    play(&mut game, &[("a2", "a8")]);
    assert!(game.check());
    assert!(!game.checkmate());
    assert_eq!(game.phase(), Phase::Check);
    assert_eq!(game.current_player(), Color::Black);

    // 王手を放置する手は指せない
    assert_eq!(game.perform_move(sq("h8"), sq("g8")), Err(ChessError::SelfCheck));
    play(&mut game, &[("h8", "h7")]);
    assert!(!game.check());
}

#[test]
fn test_checkmate_ends_game() {
    let mut game = ChessMatch::new();
    play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")]);
    assert!(game.check());
    assert!(game.checkmate());
    assert_eq!(game.phase(), Phase::Checkmate);
    assert_eq!(game.turn(), 4);
    assert_eq!(game.current_player(), Color::Black);

    let before = game.clone();
    assert!(game.is_checkmate(Color::White).unwrap());
    assert_eq!(game, before);

    assert_eq!(
        game.perform_move(sq("a2"), sq("a3")),
        Err(ChessError::InvalidState(InvalidStateReason::GameOver))
    );
}

#[test]
fn test_castling_kingside_and_queenside() {
    let mut game = empty();
    put(&mut game, "e1", PieceType::King, Color::White);
    put(&mut game, "h1", PieceType::Rook, Color::White);
    put(&mut game, "e8", PieceType::King, Color::Black);
    put(&mut game, "a8", PieceType::Rook, Color::Black);

    play(&mut game, &[("e1", "g1")]);
    assert_eq!(game.piece_at(sq("f1")), Some(Piece::new(PieceType::Rook, Color::White)));
    assert_eq!(game.piece_at(sq("h1")), None);
    assert_eq!(game.move_count_at(sq("f1")), Some(1));
    assert_eq!(game.move_count_at(sq("g1")), Some(1));

    play(&mut game, &[("e8", "c8")]);
    assert_eq!(game.piece_at(sq("c8")), Some(Piece::new(PieceType::King, Color::Black)));
    assert_eq!(game.piece_at(sq("d8")), Some(Piece::new(PieceType::Rook, Color::Black)));
    assert_eq!(game.piece_at(sq("a8")), None);
    assert_consistent(&game);
}

#[test]
fn test_castling_follows_move_counters() {
    let mut game = empty();
    put(&mut game, "e1", PieceType::King, Color::White);
    put(&mut game, "h1", PieceType::Rook, Color::White);
    put(&mut game, "e8", PieceType::King, Color::Black);
    put(&mut game, "f7", PieceType::Rook, Color::Black);

    // f1 は黒ルークの利きにあるので自殺手、巻き戻し後もキャスリング可能
    assert_eq!(game.perform_move(sq("e1"), sq("f1")), Err(ChessError::SelfCheck));
    assert_eq!(game.move_count_at(sq("e1")), Some(0));
    assert!(game.possible_moves(sq("e1")).unwrap().contains(sq("g1").to_square()));

    // キングが往復したらキャスリングできない
    play(&mut game, &[("e1", "d1"), ("e8", "d8"), ("d1", "e1"), ("d8", "e8")]);
    assert!(!game.possible_moves(sq("e1")).unwrap().contains(sq("g1").to_square()));
}

#[test]
fn test_castling_rule_strict() {
    let setup = |castling| {
        let mut game = ChessMatch::empty(MatchOptions {
            castling,
            ..Default::default()
        })
        .unwrap();
        put(&mut game, "e1", PieceType::King, Color::White);
        put(&mut game, "a1", PieceType::Rook, Color::White);
        put(&mut game, "h1", PieceType::Rook, Color::White);
        put(&mut game, "b8", PieceType::King, Color::Black);
        put(&mut game, "e5", PieceType::Rook, Color::Black);
        game
    };

    // Lenient では王手中でも候補に入り、着地先が安全なら指せる
    let mut lenient = setup(CastlingRule::Lenient);
    let targets = lenient.possible_moves(sq("e1")).unwrap();
    assert!(targets.contains(sq("g1").to_square()));
    assert!(targets.contains(sq("c1").to_square()));
    let mut castled = lenient.clone();
    play(&mut castled, &[("e1", "g1")]);
    assert_eq!(castled.piece_at(sq("f1")), Some(Piece::new(PieceType::Rook, Color::White)));
    assert!(!castled.is_in_check(Color::White).unwrap());

    let mut strict = setup(CastlingRule::Strict);
    let targets = strict.possible_moves(sq("e1")).unwrap();
    assert!(!targets.contains(sq("g1").to_square()));
    assert!(!targets.contains(sq("c1").to_square()));

    // ルークを d 列に移すと c1 への到達マスではなく通過マス d1 が利きになる
    for game in [&mut lenient, &mut strict] {
        game.set_current_player(Color::Black);
        play(game, &[("e5", "d5")]);
    }
    let targets = lenient.possible_moves(sq("e1")).unwrap();
    assert!(targets.contains(sq("c1").to_square()));
    assert!(targets.contains(sq("g1").to_square()));

    let targets = strict.possible_moves(sq("e1")).unwrap();
    assert!(!targets.contains(sq("c1").to_square()));
    assert!(targets.contains(sq("g1").to_square()));
}

#[test]
fn test_en_passant_capture() {
    let mut game = ChessMatch::new();
    play(&mut game, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);
    assert_eq!(game.en_passant_vulnerable(), Some(sq("d5")));

    let captured = game.perform_move(sq("e5"), sq("d6")).unwrap();
    assert_eq!(captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
    assert_eq!(game.piece_at(sq("d5")), None);
    assert_eq!(game.piece_at(sq("d6")), Some(Piece::new(PieceType::Pawn, Color::White)));
    assert_eq!(game.en_passant_vulnerable(), None);
    assert_eq!(game.pieces_on_board(), 31);
    assert_consistent(&game);
}

#[test]
fn test_en_passant_window_is_one_half_move() {
    let mut game = ChessMatch::new();
    play(&mut game, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);
    play(&mut game, &[("h2", "h3"), ("h7", "h6")]);
    assert_eq!(game.en_passant_vulnerable(), None);
    assert_eq!(
        game.perform_move(sq("e5"), sq("d6")),
        Err(ChessError::InvalidMove(InvalidMoveReason::IllegalTarget))
    );
}

#[test]
fn test_en_passant_resolves_check() {
    let mut game = empty();
    put(&mut game, "e4", PieceType::King, Color::White);
    put(&mut game, "e5", PieceType::Pawn, Color::White);
    put(&mut game, "a8", PieceType::King, Color::Black);
    put(&mut game, "d7", PieceType::Pawn, Color::Black);
    game.set_current_player(Color::Black);

    play(&mut game, &[("d7", "d5")]);
    assert!(game.check());
    assert!(!game.checkmate());
    assert!(game.legal_targets(sq("e5")).unwrap().contains(sq("d6").to_square()));

    play(&mut game, &[("e5", "d6")]);
    assert_eq!(game.piece_at(sq("d5")), None);
    assert!(!game.is_in_check(Color::White).unwrap());
}

fn promotion_setup(options: MatchOptions) -> ChessMatch {
    let mut game = ChessMatch::empty(options).unwrap();
    put(&mut game, "e1", PieceType::King, Color::White);
    put(&mut game, "b7", PieceType::Pawn, Color::White);
    put(&mut game, "h8", PieceType::King, Color::Black);
    game
}

#[test]
fn test_promotion_pending_and_resolve() {
    let mut game = promotion_setup(MatchOptions::default());
    assert_eq!(
        game.resolve_promotion(PieceType::Queen),
        Err(ChessError::InvalidState(InvalidStateReason::NoPromotionPending))
    );

    play(&mut game, &[("b7", "b8")]);
    assert_eq!(game.promotion_pending(), Some(sq("b8")));
    assert_eq!(game.turn(), 1);
    assert_eq!(game.current_player(), Color::White);
    assert_eq!(
        game.perform_move(sq("e1"), sq("e2")),
        Err(ChessError::InvalidState(InvalidStateReason::PromotionPending))
    );
    assert_eq!(
        game.resolve_promotion(PieceType::King),
        Err(ChessError::InvalidState(InvalidStateReason::InvalidPromotionKind(PieceType::King)))
    );

    let promoted = game.resolve_promotion(PieceType::Queen).unwrap();
    assert_eq!(promoted, Piece::new(PieceType::Queen, Color::White));
    assert_eq!(game.piece_at(sq("b8")), Some(promoted));
    assert_eq!(game.move_count_at(sq("b8")), Some(1));
    assert_eq!(game.pieces_on_board(), 3);
    assert!(game.captured_pieces().is_empty());
    assert_eq!(game.promotion_pending(), None);

    // b8 のクイーンが 8段目に沿って h8 のキングに王手
    assert!(game.check());
    assert!(!game.checkmate());
    assert_eq!(game.turn(), 2);
    assert_eq!(game.current_player(), Color::Black);
    assert_consistent(&game);
}

#[test]
fn test_auto_promote() {
    let options = MatchOptions {
        auto_promote: Some(PieceType::Knight),
        ..Default::default()
    };
    let mut game = promotion_setup(options);
    play(&mut game, &[("b7", "b8")]);
    assert_eq!(game.piece_at(sq("b8")), Some(Piece::new(PieceType::Knight, Color::White)));
    assert_eq!(game.promotion_pending(), None);
    assert_eq!(game.turn(), 2);
    assert!(!game.check());
}

#[test]
fn test_invalid_auto_promote_option() {
    let options = MatchOptions {
        auto_promote: Some(PieceType::Pawn),
        ..Default::default()
    };
    assert_eq!(
        ChessMatch::with_options(options),
        Err(ChessError::InvalidState(InvalidStateReason::InvalidPromotionKind(PieceType::Pawn)))
    );
}

#[test]
fn test_missing_king_is_fatal() {
    let mut game = empty();
    put(&mut game, "a1", PieceType::Rook, Color::White);
    let before = game.clone();

    let err = game.perform_move(sq("a1"), sq("a2")).unwrap_err();
    assert_eq!(err, ChessError::KingNotFound(Color::White));
    assert!(err.is_fatal());
    assert_eq!(game, before);
}

#[test]
fn test_pending_promotion_clears_en_passant() {
    let mut game = promotion_setup(MatchOptions::default());
    put(&mut game, "e5", PieceType::Pawn, Color::White);
    put(&mut game, "d7", PieceType::Pawn, Color::Black);
    game.set_current_player(Color::Black);

    play(&mut game, &[("d7", "d5"), ("b7", "b8")]);
    assert_eq!(game.promotion_pending(), Some(sq("b8")));
    assert_eq!(game.en_passant_vulnerable(), None);
    assert_eq!(game.snapshot().en_passant, None);

    game.resolve_promotion(PieceType::Queen).unwrap();
    game.set_current_player(Color::White);
    let targets = game.possible_moves(sq("e5")).unwrap();
    assert!(!targets.contains(sq("d6").to_square()));
}

#[test]
fn test_capture_of_unlisted_piece_is_fatal() {
    let mut game = empty();
    put(&mut game, "e1", PieceType::King, Color::White);
    put(&mut game, "a1", PieceType::Rook, Color::White);
    put(&mut game, "h8", PieceType::King, Color::Black);
    let target = put_id(&mut game, "a8", PieceType::Rook, Color::Black);
    game.on_board.retain(|&id| id != target);

    let err = game.do_move(sq("a1").to_square(), sq("a8").to_square()).unwrap_err();
    assert_eq!(err, ChessError::NotListedOnBoard(sq("a8").to_square()));
    assert!(err.is_fatal());
}

#[test]
fn test_place_on_occupied_square() {
    let mut game = ChessMatch::new();
    let err = game
        .place(sq("e1"), Piece::new(PieceType::Queen, Color::White))
        .unwrap_err();
    assert!(matches!(err, ChessError::Board(BoardError::Occupied(_))));
    assert_eq!(game.pieces_on_board(), 32);
    assert_eq!(game.arena.len(), 32);
}

proptest::proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig { cases: 8, ..Default::default() })]

    /// ランダムな対局の各局面で、全擬似合法手の実行と巻き戻しが元の状態に戻る
    #[test]
    fn prop_random_positions_undo_exactly(choices in proptest::collection::vec(0u32..1000, 1..30)) {
        let mut game = ChessMatch::with_options(MatchOptions {
            auto_promote: Some(PieceType::Queen),
            ..Default::default()
        })
        .unwrap();

        for choice in choices {
            if game.checkmate() {
                break;
            }
            assert_all_moves_undo(&mut game);

            let player = game.current_player();
            let sources: Vec<_> = game
                .on_board
                .iter()
                .filter(|&&id| game.record(id).piece.color == player)
                .filter_map(|&id| game.notation_of(id))
                .collect();
            let mut moves = Vec::new();
            for from in sources {
                for to in game.legal_targets(from).unwrap() {
                    moves.push((from, ChessSquare::from_square(to).unwrap()));
                }
            }
            if moves.is_empty() {
                break;
            }
            let (from, to) = moves[choice as usize % moves.len()];
            game.perform_move(from, to).unwrap();
            assert_consistent(&game);
        }
    }
}
