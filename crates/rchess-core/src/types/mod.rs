//! 基本型モジュール

mod bitboard;
mod chess_square;
mod color;
mod piece;
mod piece_type;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use chess_square::ChessSquare;
pub use color::Color;
pub use piece::Piece;
pub use piece_type::PieceType;
pub use square::Square;

/// チェス盤の一辺のマス数
pub const BOARD_SIZE: u8 = 8;
