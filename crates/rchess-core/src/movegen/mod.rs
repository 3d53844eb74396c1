//! 指し手生成モジュール
//!
//! 駒ごとの移動先を `Bitboard` で返す。
//!
//! - `pseudo_legal_targets`: 自玉への王手を考慮しない移動先（キャスリング・アンパッサン含む）
//! - `attack_targets`: その駒が利いているマス（王手判定・キャスリングの通過判定用）

mod generator;

pub use generator::{attack_targets, pseudo_legal_targets};
