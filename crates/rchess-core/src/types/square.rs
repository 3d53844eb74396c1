//! 盤面内部座標（Square）

use std::fmt;

use super::BOARD_SIZE;

/// 盤面グリッド上の座標（0始まりの row, col）
///
/// **注意**: row 0 は8段目（黒側）、row 7 は1段目（白側）。
/// チェス表記との変換は `ChessSquare` を使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Square { row, col }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// 8x8 盤でのインデックス（0-63）
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// インデックスから座標を得る（8x8 盤）
    #[inline]
    pub const fn from_index(index: usize) -> Square {
        debug_assert!(index < 64);
        Square::new((index / BOARD_SIZE as usize) as u8, (index % BOARD_SIZE as usize) as u8)
    }

    /// (dr, dc) だけずらした座標
    ///
    /// 負方向にはみ出した場合は None。上限の検査は盤面側で行う。
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Square::new(row, col))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.row, self.col)
    }
}
