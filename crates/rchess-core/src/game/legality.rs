//! 指し手の検証と王手・詰み判定

use log::trace;

use super::ChessMatch;
use super::arena::PieceId;
use crate::error::{ChessError, InvalidMoveReason, Result};
use crate::movegen;
use crate::types::{Color, PieceType, Square};

impl ChessMatch {
    /// 移動元の検証: 手番側の駒があり、擬似合法手が1つ以上あること
    pub(crate) fn validate_source(&self, from: Square) -> Result<PieceId> {
        let id = self.board.piece_at(from)?.ok_or(InvalidMoveReason::NoPiece)?;
        if self.record(id).piece.color != self.state.current_player {
            return Err(InvalidMoveReason::NotYourPiece.into());
        }
        if movegen::pseudo_legal_targets(self, id).is_empty() {
            return Err(InvalidMoveReason::NoPossibleMoves.into());
        }
        Ok(id)
    }

    /// 移動先の検証: 擬似合法手に含まれること
    pub(crate) fn validate_target(&self, id: PieceId, to: Square) -> Result<()> {
        if !self.board.contains(to) || !movegen::pseudo_legal_targets(self, id).contains(to) {
            return Err(InvalidMoveReason::IllegalTarget.into());
        }
        Ok(())
    }

    /// 指定の手番のキングの位置
    ///
    /// キングがいないのはエンジン内部の不整合なので致命的エラーを返す。
    pub(crate) fn king_square(&self, color: Color) -> Result<Square> {
        self.on_board
            .iter()
            .map(|&id| self.record(id))
            .find(|rec| rec.piece.piece_type == PieceType::King && rec.piece.color == color)
            .and_then(|rec| rec.square)
            .ok_or(ChessError::KingNotFound(color))
    }

    /// `by` 側の駒がそのマスに利いているか
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.on_board
            .iter()
            .filter(|&&id| self.record(id).piece.color == by)
            .any(|&id| movegen::attack_targets(self, id).contains(sq))
    }

    /// 指定の手番のキングが王手されているか
    pub fn is_in_check(&self, color: Color) -> Result<bool> {
        let king = self.king_square(color)?;
        Ok(self.is_square_attacked(king, color.opponent()))
    }

    /// 指定の手番が詰んでいるか
    ///
    /// 王手されていなければ false。王手されていれば、その手番の全ての駒の全ての
    /// 擬似合法手を試し指しし、1つでも王手が解消すれば false。試し指しは毎回
    /// 完全に巻き戻されるので、呼び出し前後で盤面は変わらない。
    pub fn is_checkmate(&mut self, color: Color) -> Result<bool> {
        if !self.is_in_check(color)? {
            return Ok(false);
        }

        let defenders: Vec<PieceId> = self
            .on_board
            .iter()
            .copied()
            .filter(|&id| self.record(id).piece.color == color)
            .collect();

        for id in defenders {
            let Some(from) = self.record(id).square else {
                continue;
            };
            for to in movegen::pseudo_legal_targets(self, id) {
                if !self.leaves_in_check(from, to, color)? {
                    trace!("{color} escapes check with {from} -> {to}");
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}
