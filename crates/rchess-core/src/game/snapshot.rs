//! 対局状態の JSON 表現

use serde::{Deserialize, Serialize};

use super::ChessMatch;
use crate::types::{ChessSquare, Color, Piece};

/// 盤上の駒1つ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellSnapshot {
    /// "a1" ~ "h8" 形式
    pub square: String,
    pub piece: Piece,
}

/// 対局全体の状態
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchSnapshot {
    pub turn: u32,
    pub current_player: Color,
    pub check: bool,
    pub checkmate: bool,
    /// アンパッサンで取られうるポーンのマス
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en_passant: Option<String>,
    /// 成り待ちのポーンのマス
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_pending: Option<String>,
    /// 盤上の駒（8段目の a から 1段目の h の順）
    pub pieces: Vec<CellSnapshot>,
    /// 取られた駒（取られた順）
    pub captured: Vec<Piece>,
}

impl ChessMatch {
    pub fn snapshot(&self) -> MatchSnapshot {
        let pieces = self
            .board
            .occupied()
            .filter_map(|(sq, id)| {
                let square = ChessSquare::from_square(sq).ok()?;
                Some(CellSnapshot {
                    square: square.to_string(),
                    piece: self.record(id).piece,
                })
            })
            .collect();

        MatchSnapshot {
            turn: self.state.turn,
            current_player: self.state.current_player,
            check: self.state.check,
            checkmate: self.state.checkmate,
            en_passant: self.en_passant_vulnerable().map(|s| s.to_string()),
            promotion_pending: self.promotion_pending().map(|s| s.to_string()),
            pieces,
            captured: self.captured_pieces(),
        }
    }
}
