//! # rchess-core
//!
//! チェスのルールエンジンコアライブラリ。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, PieceType, Piece, Square, ChessSquare, Bitboard）
//! - `board`: 盤面グリッド（駒IDの配置・除去・範囲検査）
//! - `movegen`: 駒種ごとの擬似合法手（自玉の王手放置を考慮しない）生成
//! - `game`: 対局管理（合法性検証、do_move/undo_move、王手・詰み判定、手番進行）
//! - `error`: エラー型
//!
//! ```
//! use rchess_core::{ChessMatch, ChessSquare};
//!
//! let mut game = ChessMatch::new();
//! let e2: ChessSquare = "e2".parse().unwrap();
//! let e4: ChessSquare = "e4".parse().unwrap();
//! assert!(game.possible_moves(e2).unwrap().contains(e4.to_square()));
//! game.perform_move(e2, e4).unwrap();
//! assert_eq!(game.turn(), 2);
//! ```

pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod types;

pub use board::Board;
pub use error::{BoardError, ChessError, InvalidMoveReason, InvalidStateReason, Result};
pub use game::{CastlingRule, ChessMatch, MatchOptions, MatchSnapshot, PieceId};
pub use types::{Bitboard, ChessSquare, Color, Piece, PieceType, Square};
