//! rchess: 指し手列を再生して対局状態を JSON で出力する

mod config;
mod notation;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use rchess_core::{ChessMatch, ChessSquare, MatchOptions, PieceType};
use serde::Serialize;

use notation::{MoveSpec, parse_promotion};

/// ログレベルを指定する環境変数
const LOG_ENV: &str = "RCHESS_LOG";

#[derive(Parser, Debug)]
#[command(author, version, about = "Chess rules engine CLI", long_about = None)]
struct Cli {
    /// 対局オプションの TOML ファイル（未指定なら RCHESS_CONFIG）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 指し手列を再生し、最終局面を JSON で出力する
    Replay {
        /// 整形して出力する
        #[arg(long)]
        pretty: bool,

        /// 成り先が省略された成りの既定の駒種
        #[arg(long, value_parser = parse_promotion)]
        promote: Option<PieceType>,

        /// 指し手（e2e4, e2-e4, e7e8q, e7e8=Q）
        moves: Vec<String>,
    },
    /// 指定マスの駒の合法な移動先を出力する
    Moves {
        square: String,

        /// 先に再生する指し手
        #[arg(long, num_args = 1..)]
        after: Vec<String>,

        #[arg(long, value_parser = parse_promotion)]
        promote: Option<PieceType>,
    },
}

#[derive(Serialize)]
struct TargetsOutput {
    square: String,
    targets: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, "info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let config_path = config::resolve_path(cli.config);
    let options = config::load_options(config_path.as_deref())?;

    match cli.command {
        Command::Replay {
            pretty,
            promote,
            moves,
        } => {
            let game = replay(options, &moves, promote)?;
            info!(
                "replayed {} moves: turn {}, {} to move",
                moves.len(),
                game.turn(),
                game.current_player()
            );
            let snapshot = game.snapshot();
            let json = if pretty {
                serde_json::to_string_pretty(&snapshot)?
            } else {
                serde_json::to_string(&snapshot)?
            };
            println!("{json}");
        }
        Command::Moves {
            square,
            after,
            promote,
        } => {
            let mut game = replay(options, &after, promote)?;
            let source: ChessSquare = square.parse()?;
            let targets = game
                .legal_targets(source)
                .with_context(|| format!("no moves from {source}"))?;
            let output = TargetsOutput {
                square: source.to_string(),
                targets: targets
                    .iter()
                    .filter_map(|sq| ChessSquare::from_square(sq).ok())
                    .map(|sq| sq.to_string())
                    .collect(),
            };
            println!("{}", serde_json::to_string(&output)?);
        }
    }
    Ok(())
}

/// 初期局面から指し手列を順に指す
fn replay(
    options: MatchOptions,
    moves: &[String],
    default_promotion: Option<PieceType>,
) -> Result<ChessMatch> {
    let mut game = ChessMatch::with_options(options)?;
    for (ply, token) in moves.iter().enumerate() {
        let mv: MoveSpec = token.parse()?;
        let captured = game
            .perform_move(mv.from, mv.to)
            .with_context(|| format!("move {} ({token}) rejected", ply + 1))?;
        if let Some(piece) = captured {
            debug!("{token} captures {piece}");
        }

        if game.promotion_pending().is_some() {
            let kind = mv
                .promotion
                .or(default_promotion)
                .ok_or_else(|| anyhow!("move {} ({token}) needs a promotion piece", ply + 1))?;
            game.resolve_promotion(kind)?;
        } else if mv.promotion.is_some() {
            warn!("{token}: promotion suffix ignored");
        }
    }
    Ok(game)
}
