//! 対局状態（手数・手番・王手・詰み・アンパッサン・成り待ち）

use super::arena::PieceId;
use crate::types::Color;

/// 対局の局面フェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Normal,
    Check,
    /// 終端状態
    Checkmate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    /// 1 から始まり、詰みで終わらなかった手ごとに 1 増える
    pub turn: u32,
    pub current_player: Color,
    /// 直前に指した側が相手に王手をかけたか
    pub check: bool,
    pub checkmate: bool,
    /// 直前の半手で2マス進んだポーン
    pub en_passant: Option<PieceId>,
    /// 成り先の指定を待っているポーン
    pub promotion: Option<PieceId>,
}

impl MatchState {
    pub fn initial() -> Self {
        MatchState {
            turn: 1,
            current_player: Color::White,
            check: false,
            checkmate: false,
            en_passant: None,
            promotion: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.checkmate {
            Phase::Checkmate
        } else if self.check {
            Phase::Check
        } else {
            Phase::Normal
        }
    }

    /// 半手の完了による遷移
    ///
    /// `en_passant` は呼び出し側が詰み判定の前に更新済みであること。
    pub(crate) fn advance(&mut self, check: bool, checkmate: bool) {
        self.check = check;
        self.checkmate = checkmate;
        self.promotion = None;
        if !checkmate {
            self.turn += 1;
            self.current_player = self.current_player.opponent();
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::initial()
    }
}
