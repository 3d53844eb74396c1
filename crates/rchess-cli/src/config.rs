//! 対局オプションの読み込み（TOML）

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use rchess_core::MatchOptions;

/// 設定ファイルの場所を指定する環境変数
pub const CONFIG_ENV: &str = "RCHESS_CONFIG";

/// `--config` が優先、なければ環境変数
pub fn resolve_path(arg: Option<PathBuf>) -> Option<PathBuf> {
    arg.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}

/// 設定ファイルがなければ既定値
pub fn load_options(path: Option<&Path>) -> Result<MatchOptions> {
    let Some(path) = path else {
        return Ok(MatchOptions::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let options = parse_options(&text)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    debug!("loaded options from {}: {options:?}", path.display());
    Ok(options)
}

pub fn parse_options(text: &str) -> Result<MatchOptions> {
    let options: MatchOptions = toml::from_str(text)?;
    options.validate()?;
    Ok(options)
}
