//! 対局オプション
//!
//! CLI などから TOML で読み込めるよう serde に対応する。未指定の項目は既定値。

use serde::{Deserialize, Serialize};

use crate::error::{ChessError, InvalidStateReason};
use crate::types::PieceType;

/// キャスリングの可否判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastlingRule {
    /// キング・ルークの未移動と間のマスが空であることのみを確認する
    #[default]
    Lenient,
    /// 加えて、王手中・通過マス・到達マスが相手の利きにないことを要求する
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchOptions {
    pub castling: CastlingRule,
    /// 設定されていれば、ポーンが最終段に達した時点でこの駒種に自動で成る
    pub auto_promote: Option<PieceType>,
}

impl MatchOptions {
    pub fn validate(&self) -> Result<(), ChessError> {
        match self.auto_promote {
            Some(kind) if !kind.is_promotion_target() => {
                Err(InvalidStateReason::InvalidPromotionKind(kind).into())
            }
            _ => Ok(()),
        }
    }
}
