//! チェス表記の座標（ChessSquare）と内部座標の相互変換

use std::fmt;
use std::str::FromStr;

use super::{BOARD_SIZE, Square};
use crate::error::ChessError;

/// チェス表記の座標（ファイル 'a'-'h' + ランク 1-8）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessSquare {
    file: char,
    rank: u8,
}

impl ChessSquare {
    /// a1〜h8 の範囲外は構築エラー
    pub fn new(file: char, rank: u8) -> Result<Self, ChessError> {
        if !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
            return Err(ChessError::InvalidSquare { file, rank });
        }
        Ok(ChessSquare { file, rank })
    }

    #[inline]
    pub const fn file(self) -> char {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// 内部座標へ変換: row = 8 - rank, col = file - 'a'
    #[inline]
    pub fn to_square(self) -> Square {
        Square::new(BOARD_SIZE - self.rank, self.file as u8 - b'a')
    }

    /// 内部座標から変換（8x8 の外はエラー）
    pub fn from_square(sq: Square) -> Result<Self, ChessError> {
        if sq.row() >= BOARD_SIZE || sq.col() >= BOARD_SIZE {
            return Err(ChessError::InvalidSquare {
                file: b'a'.saturating_add(sq.col()) as char,
                rank: BOARD_SIZE.saturating_sub(sq.row()),
            });
        }
        Ok(ChessSquare {
            file: (b'a' + sq.col()) as char,
            rank: BOARD_SIZE - sq.row(),
        })
    }
}

impl From<ChessSquare> for Square {
    fn from(cs: ChessSquare) -> Square {
        cs.to_square()
    }
}

impl fmt::Display for ChessSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl FromStr for ChessSquare {
    type Err = ChessError;

    /// "e4" 形式を解析する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => {
                let rank = r.to_digit(10).map_or(0, |d| d as u8);
                ChessSquare::new(f, rank)
            }
            _ => Err(ChessError::InvalidSquare {
                file: s.chars().next().unwrap_or('?'),
                rank: 0,
            }),
        }
    }
}
