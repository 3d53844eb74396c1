//! 座標形式の指し手表記（e2e4, e2-e4, e7e8q, e7e8=Q）

use std::str::FromStr;

use anyhow::{Context, Result, bail};
use rchess_core::{ChessSquare, PieceType};

/// 1手分の指定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSpec {
    pub from: ChessSquare,
    pub to: ChessSquare,
    /// 成り先（末尾の1文字）
    pub promotion: Option<PieceType>,
}

impl FromStr for MoveSpec {
    type Err = anyhow::Error;

    fn from_str(token: &str) -> Result<Self> {
        let compact: String = token.chars().filter(|&c| c != '-' && c != '=').collect();
        if !compact.is_ascii() || !(4..=5).contains(&compact.len()) {
            bail!("malformed move {token:?} (expected e.g. e2e4 or e7e8q)");
        }

        let from: ChessSquare = compact[0..2]
            .parse()
            .with_context(|| format!("bad source square in {token:?}"))?;
        let to: ChessSquare = compact[2..4]
            .parse()
            .with_context(|| format!("bad target square in {token:?}"))?;
        let promotion = match &compact[4..] {
            "" => None,
            letter => Some(parse_promotion(letter).map_err(anyhow::Error::msg)?),
        };
        Ok(MoveSpec { from, to, promotion })
    }
}

/// 成り先の駒種（"q" / "Q" / "queen" など）
pub fn parse_promotion(s: &str) -> std::result::Result<PieceType, String> {
    let kind = match s.to_ascii_lowercase().as_str() {
        "queen" => PieceType::Queen,
        "rook" => PieceType::Rook,
        "bishop" => PieceType::Bishop,
        "knight" => PieceType::Knight,
        other => other.parse::<PieceType>().map_err(|e| e.to_string())?,
    };
    if !kind.is_promotion_target() {
        return Err(format!("cannot promote to {kind}"));
    }
    Ok(kind)
}
