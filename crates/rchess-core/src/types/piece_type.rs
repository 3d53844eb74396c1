//! 駒種（PieceType）

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChessError, InvalidStateReason};

/// 駒種（6種）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceType {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Pawn = 5,
}

impl PieceType {
    /// 駒種の数
    pub const NUM: usize = 6;

    /// 全駒種
    pub const ALL: [PieceType; 6] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Pawn,
    ];

    /// 成り先として選べる駒種
    pub const PROMOTION_TARGETS: [PieceType; 4] =
        [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight];

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 1文字表記（大文字）
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Knight => 'N',
            PieceType::Pawn => 'P',
        }
    }

    /// 1文字表記から駒種を得る（大文字小文字を区別しない）
    pub fn from_letter(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'K' => Some(PieceType::King),
            'Q' => Some(PieceType::Queen),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'N' => Some(PieceType::Knight),
            'P' => Some(PieceType::Pawn),
            _ => None,
        }
    }

    /// ポーンの成り先として有効か
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(self, PieceType::Queen | PieceType::Rook | PieceType::Bishop | PieceType::Knight)
    }
}

impl FromStr for PieceType {
    type Err = ChessError;

    /// "Q" / "n" のような1文字表記を解析する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => PieceType::from_letter(c).ok_or_else(|| {
                ChessError::InvalidState(InvalidStateReason::UnknownPieceLetter(s.to_string()))
            }),
            _ => Err(ChessError::InvalidState(InvalidStateReason::UnknownPieceLetter(
                s.to_string(),
            ))),
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceType::King => "king",
            PieceType::Queen => "queen",
            PieceType::Rook => "rook",
            PieceType::Bishop => "bishop",
            PieceType::Knight => "knight",
            PieceType::Pawn => "pawn",
        };
        f.write_str(name)
    }
}
