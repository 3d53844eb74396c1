//! Move execution and undo functionality
//!
//! `do_move` は盤面（グリッド・駒記録・盤上リスト・取られた駒リスト・手数カウンタ）
//! だけを変更し、手番やアンパッサン対象などの対局状態には触れない。
//! `undo_move` は `UndoInfo` を使ってこれを逆順に完全に巻き戻す。

use log::trace;

use super::ChessMatch;
use super::arena::PieceId;
use crate::error::{ChessError, InvalidMoveReason, Result};
use crate::types::{Color, PieceType, Square};

/// 取られた駒の復元情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CapturedInfo {
    pub id: PieceId,
    /// 取られた駒がいたマス（アンパッサンでは移動先と異なる）
    pub square: Square,
    /// 盤上リスト内の位置
    pub on_board_index: usize,
}

/// キャスリングでのルークの移動
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RookShift {
    pub id: PieceId,
    pub from: Square,
    pub to: Square,
}

/// do_move の巻き戻し情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UndoInfo {
    pub from: Square,
    pub to: Square,
    pub moved: PieceId,
    pub captured: Option<CapturedInfo>,
    pub castling_rook: Option<RookShift>,
}

/// キャスリング時のルークの移動元・移動先
///
/// キングサイドは3つ隣のルークがキングの通過マスへ、
/// クイーンサイドは4つ隣のルークがキングの通過マスへ移る。
fn castling_rook_squares(king_from: Square, king_dc: i8) -> Option<(Square, Square)> {
    let (rook_dc, landing_dc) = if king_dc > 0 { (3, 1) } else { (-4, -1) };
    Some((king_from.offset(0, rook_dc)?, king_from.offset(0, landing_dc)?))
}

impl ChessMatch {
    /// 指し手を盤面に適用する
    ///
    /// 合法性は検証しない。移動元に駒がなければ盤面を変更せずにエラーを返す。
    pub(crate) fn do_move(&mut self, from: Square, to: Square) -> Result<UndoInfo> {
        let Some(moved) = self.remove_piece(from)? else {
            return Err(InvalidMoveReason::NoPiece.into());
        };
        self.arena.get_mut(moved).move_count += 1;

        let mut captured = self.capture_at(to)?;
        self.put_piece(moved, to)?;

        let piece_type = self.record(moved).piece.piece_type;
        let dc = to.col() as i8 - from.col() as i8;

        // キャスリング: キングの2マス横移動ならルークも動かす
        let mut castling_rook = None;
        if piece_type == PieceType::King && dc.abs() == 2 {
            if let Some((rook_from, rook_to)) = castling_rook_squares(from, dc) {
                if let Some(rook) = self.remove_piece(rook_from)? {
                    self.arena.get_mut(rook).move_count += 1;
                    self.put_piece(rook, rook_to)?;
                    castling_rook = Some(RookShift {
                        id: rook,
                        from: rook_from,
                        to: rook_to,
                    });
                }
            }
        }

        // アンパッサン: 斜めに動いたのに移動先に駒がなかったポーン
        if piece_type == PieceType::Pawn && dc != 0 && captured.is_none() {
            let victim = Square::new(from.row(), to.col());
            captured = self.capture_at(victim)?;
        }

        Ok(UndoInfo {
            from,
            to,
            moved,
            captured,
            castling_rook,
        })
    }

    /// do_move を巻き戻す
    pub(crate) fn undo_move(&mut self, undo: UndoInfo) -> Result<()> {
        if let Some(shift) = undo.castling_rook {
            self.remove_piece(shift.to)?;
            self.put_piece(shift.id, shift.from)?;
            self.arena.get_mut(shift.id).move_count -= 1;
        }

        let back = self.remove_piece(undo.to)?;
        debug_assert_eq!(back, Some(undo.moved), "moved piece must be on its target square");
        self.put_piece(undo.moved, undo.from)?;
        self.arena.get_mut(undo.moved).move_count -= 1;

        if let Some(cap) = undo.captured {
            self.put_piece(cap.id, cap.square)?;
            let popped = self.captured.pop();
            debug_assert_eq!(popped, Some(cap.id), "captured list must be restored in order");
            self.on_board.insert(cap.on_board_index, cap.id);
        }
        Ok(())
    }

    /// マス上の駒を取り、盤上リストから取られた駒リストへ移す
    fn capture_at(&mut self, sq: Square) -> Result<Option<CapturedInfo>> {
        let Some(id) = self.remove_piece(sq)? else {
            return Ok(None);
        };
        let Some(on_board_index) = self.on_board.iter().position(|&p| p == id) else {
            return Err(ChessError::NotListedOnBoard(sq));
        };
        self.on_board.remove(on_board_index);
        self.captured.push(id);
        Ok(Some(CapturedInfo {
            id,
            square: sq,
            on_board_index,
        }))
    }

    /// 試し指しして、指定の手番の王手が残るかを調べる（盤面は元に戻る）
    pub(crate) fn leaves_in_check(
        &mut self,
        from: Square,
        to: Square,
        color: Color,
    ) -> Result<bool> {
        let undo = self.do_move(from, to)?;
        let in_check = self.is_in_check(color);
        self.undo_move(undo)?;
        trace!("trial {from} -> {to} for {color}: in_check={in_check:?}");
        in_check
    }
}
