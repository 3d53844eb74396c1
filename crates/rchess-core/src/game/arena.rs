//! 駒アリーナ
//!
//! 対局に登場する全ての駒を所有する。盤面グリッドは `PieceId` で参照するだけ。
//! 取られた駒や成りで置き換えられたポーンもアリーナには残り、ID は再利用しない。

use crate::types::{Piece, Square};

/// アリーナ内の駒ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u16);

impl PieceId {
    #[inline]
    pub const fn new(index: u16) -> Self {
        PieceId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// 駒1つ分の記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceRecord {
    pub piece: Piece,
    /// 盤上の座標（盤外なら None）。盤面グリッドの内容と常に一致させる
    pub square: Option<Square>,
    /// 指した回数。undo で減算される
    pub move_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceArena {
    records: Vec<PieceRecord>,
}

impl PieceArena {
    /// 新しい駒を登録する（盤外の状態で作られる）
    pub fn spawn(&mut self, piece: Piece, move_count: u32) -> PieceId {
        let id = PieceId(self.records.len() as u16);
        self.records.push(PieceRecord {
            piece,
            square: None,
            move_count,
        });
        id
    }

    #[inline]
    pub fn get(&self, id: PieceId) -> &PieceRecord {
        &self.records[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: PieceId) -> &mut PieceRecord {
        &mut self.records[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
