//! 盤面グリッド
//!
//! 固定サイズの2次元グリッド。各マスは駒アリーナのID（`PieceId`）を持つか空。
//! 駒そのものの所有権は対局（`ChessMatch`）側にあり、ここでは配置参照のみを扱う。

use crate::error::BoardError;
use crate::game::PieceId;
use crate::types::Square;

/// 2次元グリッド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<PieceId>>,
}

impl Board {
    /// 盤面を作成（行数・列数とも 1 以上）
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows < 1 || cols < 1 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Board {
            rows,
            cols,
            cells: vec![None; rows * cols],
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 座標が盤内か
    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        (sq.row() as usize) < self.rows && (sq.col() as usize) < self.cols
    }

    #[inline]
    fn cell_index(&self, sq: Square) -> usize {
        sq.row() as usize * self.cols + sq.col() as usize
    }

    fn check(&self, sq: Square) -> Result<usize, BoardError> {
        if self.contains(sq) {
            Ok(self.cell_index(sq))
        } else {
            Err(BoardError::OutOfBounds(sq))
        }
    }

    /// マスの駒（盤外はエラー）
    pub fn piece_at(&self, sq: Square) -> Result<Option<PieceId>, BoardError> {
        let idx = self.check(sq)?;
        Ok(self.cells[idx])
    }

    /// マスの駒（盤外は None）
    ///
    /// 指し手生成のように盤外を「何もないマス」として扱いたい箇所向け。
    #[inline]
    pub fn get(&self, sq: Square) -> Option<PieceId> {
        if self.contains(sq) { self.cells[self.cell_index(sq)] } else { None }
    }

    /// マスに駒があるか（盤外はエラー）
    pub fn is_occupied(&self, sq: Square) -> Result<bool, BoardError> {
        Ok(self.piece_at(sq)?.is_some())
    }

    /// 駒を配置する。既に駒があるマスへの配置はエラー
    pub fn put(&mut self, id: PieceId, sq: Square) -> Result<(), BoardError> {
        let idx = self.check(sq)?;
        if self.cells[idx].is_some() {
            return Err(BoardError::Occupied(sq));
        }
        self.cells[idx] = Some(id);
        Ok(())
    }

    /// 駒を取り除いて返す（空マスなら None）
    pub fn take(&mut self, sq: Square) -> Result<Option<PieceId>, BoardError> {
        let idx = self.check(sq)?;
        Ok(self.cells[idx].take())
    }

    /// 駒のあるマスを列挙
    pub fn occupied(&self) -> impl Iterator<Item = (Square, PieceId)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|id| (Square::new((idx / self.cols) as u8, (idx % self.cols) as u8), id))
        })
    }
}
