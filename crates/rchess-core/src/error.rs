//! Error types for the chess rules engine
//!
//! 盤面構築・指し手検証・状態遷移のエラーを型で区別する。
//! `KingNotFound` だけはエンジン内部の不整合を示す致命的エラー。

use crate::types::{Color, PieceType, Square};

/// 盤面グリッドのエラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// 行数・列数が 1 未満
    #[error(
        "Error creating board: there must be at least 1 row and 1 column (got {rows}x{cols})"
    )]
    InvalidDimensions { rows: usize, cols: usize },

    /// 盤外の座標
    #[error("Position not on the board: {0}")]
    OutOfBounds(Square),

    /// 既に駒がある座標への配置
    #[error("There is already a piece on position {0}")]
    Occupied(Square),
}

/// 指し手が不正な理由（盤面を変更する前に検出される）
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveReason {
    #[error("There is no piece on source position")]
    NoPiece,

    #[error("The chosen piece is not yours")]
    NotYourPiece,

    #[error("There is no possible moves for the chosen piece")]
    NoPossibleMoves,

    #[error("The chosen piece can't move to target position")]
    IllegalTarget,
}

/// 現在の対局状態では実行できない操作
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidStateReason {
    #[error("There is no piece to be promoted")]
    NoPromotionPending,

    #[error("Invalid type for promotion: {0}")]
    InvalidPromotionKind(PieceType),

    #[error("Unknown piece letter: {0:?}")]
    UnknownPieceLetter(String),

    #[error("A pawn promotion must be resolved first")]
    PromotionPending,

    #[error("The game is over")]
    GameOver,
}

/// Chess engine errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Grid construction / placement error
    #[error(transparent)]
    Board(#[from] BoardError),

    /// Chess notation out of a1..h8
    #[error("Error instantiating ChessPosition {file}{rank}. Valid values are from a1 to h8")]
    InvalidSquare { file: char, rank: u8 },

    #[error("Invalid move: {0}")]
    InvalidMove(#[from] InvalidMoveReason),

    /// The move was applied tentatively and fully reverted
    #[error("You can't put yourself in check")]
    SelfCheck,

    #[error("Invalid state: {0}")]
    InvalidState(#[from] InvalidStateReason),

    /// King not found for a specific color (engine bug)
    #[error("There is no {0} king on the board")]
    KingNotFound(Color),

    /// 盤面グリッドと盤上リストの不整合 (engine bug)
    #[error("The piece on {0} is not listed as on board")]
    NotListedOnBoard(Square),
}

impl ChessError {
    /// 回復不能な内部不整合か
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, ChessError::KingNotFound(_) | ChessError::NotListedOnBoard(_))
    }
}

/// Result type for chess engine operations
pub type Result<T> = std::result::Result<T, ChessError>;
