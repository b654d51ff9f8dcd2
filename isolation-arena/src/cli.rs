//! 命令行参数

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::ArenaConfig;

/// Isolation 自对弈锦标赛
#[derive(Debug, Parser)]
#[command(name = "isolation-arena", version, about)]
pub struct Args {
    /// JSON 配置文件
    pub config: Option<PathBuf>,

    /// 开局库路径（覆盖配置）
    #[arg(long)]
    pub book: Option<PathBuf>,

    /// 对每个基准选手的对局数（覆盖配置）
    #[arg(long)]
    pub rounds: Option<u32>,

    /// 随机种子（覆盖配置）
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    /// 读取配置文件并合并命令行覆盖项
    pub fn into_config(self) -> Result<ArenaConfig> {
        let mut config = match &self.config {
            Some(path) => ArenaConfig::load(path)?,
            None => ArenaConfig::default(),
        };
        if let Some(book) = self.book {
            config.book_path = Some(book);
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}
