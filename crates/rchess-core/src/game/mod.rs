//! 対局管理モジュール
//!
//! 盤面・駒アリーナ・対局状態を所有し、指し手の検証と実行を行う。
//!
//! - `ChessMatch`: 対局本体（盤面グリッド、盤上の駒リスト、取られた駒リスト、状態）
//! - `MatchState`: 手数・手番・王手・詰み・アンパッサン対象・成り待ち
//! - `do_move` / `undo_move`: 手の実行と完全な巻き戻し（キャスリング、アンパッサン含む）
//! - 王手判定と、全数の試し指しによる詰み判定
//!
//! 盤面グリッドと各駒の記録座標は `put_piece` / `remove_piece` を通じてのみ更新し、
//! 常に互いに整合しているように保つ。

mod arena;
mod chess_match;
mod legality;
mod moves;
mod options;
mod snapshot;
mod state;

#[cfg(test)]
mod tests;

pub use arena::{PieceArena, PieceId, PieceRecord};
pub use chess_match::ChessMatch;
pub use options::{CastlingRule, MatchOptions};
pub use snapshot::{CellSnapshot, MatchSnapshot};
pub use state::{MatchState, Phase};
