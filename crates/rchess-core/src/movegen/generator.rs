//! 駒種ごとの移動先生成

use crate::game::{CastlingRule, ChessMatch, PieceId, PieceRecord};
use crate::types::{Bitboard, Color, PieceType, Square};

/// 飛び駒の方向
const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// 跳び駒・キングの相対位置
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 盤内のずらした座標
#[inline]
fn step(game: &ChessMatch, sq: Square, dr: i8, dc: i8) -> Option<Square> {
    sq.offset(dr, dc).filter(|&to| game.board().contains(to))
}

/// 味方の駒がいなければ移動先に加える（相手の駒なら取り）
#[inline]
fn add_unless_friendly(game: &ChessMatch, bb: &mut Bitboard, to: Square, us: Color) {
    match game.record_at(to) {
        Some(rec) if rec.piece.color == us => {}
        _ => bb.set(to),
    }
}

/// 飛び駒: 空マスを進み、最初の駒で止まる（相手の駒ならそこも含む）
fn slider_targets(game: &ChessMatch, from: Square, us: Color, dirs: &[(i8, i8)]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(to) = step(game, cur, dr, dc) {
            add_unless_friendly(game, &mut bb, to, us);
            if game.board().get(to).is_some() {
                break;
            }
            cur = to;
        }
    }
    bb
}

/// 相対位置で決まる駒（ナイト・キング）
fn leaper_targets(game: &ChessMatch, from: Square, us: Color, offsets: &[(i8, i8)]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &(dr, dc) in offsets {
        if let Some(to) = step(game, from, dr, dc) {
            add_unless_friendly(game, &mut bb, to, us);
        }
    }
    bb
}

/// ポーンの利き（前方斜め2マス、駒の有無によらない）
fn pawn_attacks(game: &ChessMatch, from: Square, us: Color) -> Bitboard {
    let fwd = us.forward();
    [-1, 1]
        .into_iter()
        .filter_map(|dc| step(game, from, fwd, dc))
        .collect()
}

/// ポーンの移動先（前進・2マス前進・斜め取り・アンパッサン）
fn pawn_targets(game: &ChessMatch, from: Square, rec: &PieceRecord) -> Bitboard {
    let us = rec.piece.color;
    let fwd = us.forward();
    let board = game.board();
    let mut bb = Bitboard::EMPTY;

    if let Some(one) = step(game, from, fwd, 0) {
        if board.get(one).is_none() {
            bb.set(one);
            if rec.move_count == 0 && from.row() == us.pawn_row() {
                if let Some(two) = step(game, one, fwd, 0) {
                    if board.get(two).is_none() {
                        bb.set(two);
                    }
                }
            }
        }
    }

    let en_passant = game.state().en_passant;
    for dc in [-1, 1] {
        let Some(diag) = step(game, from, fwd, dc) else {
            continue;
        };
        match game.record_at(diag) {
            Some(target) => {
                if target.piece.color != us {
                    bb.set(diag);
                }
            }
            None => {
                // 横に並んだ相手のポーンが直前に2マス進んでいればアンパッサン
                let Some(side) = step(game, from, 0, dc) else {
                    continue;
                };
                let Some(side_id) = board.get(side) else {
                    continue;
                };
                if Some(side_id) != en_passant {
                    continue;
                }
                let side_piece = game.record(side_id).piece;
                if side_piece.piece_type == PieceType::Pawn && side_piece.color != us {
                    bb.set(diag);
                }
            }
        }
    }
    bb
}

/// キャスリングの移動先（キングの2マス横移動）
fn castling_targets(game: &ChessMatch, from: Square, rec: &PieceRecord) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    if rec.move_count != 0 {
        return bb;
    }
    let us = rec.piece.color;
    let strict = game.options().castling == CastlingRule::Strict;
    if strict && game.is_square_attacked(from, us.opponent()) {
        return bb;
    }

    // (ルークへの列差, 進む向き)
    for (rook_dc, dir) in [(3i8, 1i8), (-4, -1)] {
        let Some(rook_sq) = step(game, from, 0, rook_dc) else {
            continue;
        };
        let Some(rook) = game.record_at(rook_sq) else {
            continue;
        };
        if rook.piece.piece_type != PieceType::Rook
            || rook.piece.color != us
            || rook.move_count != 0
        {
            continue;
        }

        let path_clear = (1..rook_dc.abs()).all(|k| {
            from.offset(0, k * dir)
                .is_some_and(|sq| game.board().get(sq).is_none())
        });
        if !path_clear {
            continue;
        }

        let (Some(pass), Some(land)) = (from.offset(0, dir), from.offset(0, 2 * dir)) else {
            continue;
        };
        if strict
            && (game.is_square_attacked(pass, us.opponent())
                || game.is_square_attacked(land, us.opponent()))
        {
            continue;
        }
        bb.set(land);
    }
    bb
}

/// 自玉への王手を考慮しない移動先
///
/// 盤外の駒（取られた駒・成りで置き換えられたポーン）は空集合。
pub fn pseudo_legal_targets(game: &ChessMatch, id: PieceId) -> Bitboard {
    let rec = game.record(id);
    let Some(from) = rec.square else {
        return Bitboard::EMPTY;
    };
    let us = rec.piece.color;

    match rec.piece.piece_type {
        PieceType::Rook => slider_targets(game, from, us, &ROOK_DIRS),
        PieceType::Bishop => slider_targets(game, from, us, &BISHOP_DIRS),
        PieceType::Queen => {
            slider_targets(game, from, us, &ROOK_DIRS) | slider_targets(game, from, us, &BISHOP_DIRS)
        }
        PieceType::Knight => leaper_targets(game, from, us, &KNIGHT_OFFSETS),
        PieceType::King => {
            leaper_targets(game, from, us, &KING_OFFSETS) | castling_targets(game, from, rec)
        }
        PieceType::Pawn => pawn_targets(game, from, rec),
    }
}

/// 駒が利いているマス
///
/// ポーンは前方斜めの2マス（駒の有無によらず、前進は含まない）、キングは
/// キャスリングを含まない。それ以外は `pseudo_legal_targets` と同じ。
pub fn attack_targets(game: &ChessMatch, id: PieceId) -> Bitboard {
    let rec = game.record(id);
    let Some(from) = rec.square else {
        return Bitboard::EMPTY;
    };
    let us = rec.piece.color;

    match rec.piece.piece_type {
        PieceType::King => leaper_targets(game, from, us, &KING_OFFSETS),
        PieceType::Pawn => pawn_attacks(game, from, us),
        _ => pseudo_legal_targets(game, id),
    }
}
