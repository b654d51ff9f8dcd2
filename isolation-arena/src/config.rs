//! 对战配置

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use isolation::{DEFAULT_BOARD_SIZE, DEFAULT_TIME_LIMIT_MS};
use isolation_ai::{AiConfig, Difficulty};
use serde::{Deserialize, Serialize};

/// 对战配置（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// 棋盘边长
    pub board_size: u8,
    /// 每步时限（毫秒）
    pub time_limit_ms: u64,
    /// 对每个基准选手的对局数，先后手交替
    pub rounds: u32,
    pub engine: AiConfig,
    /// 开局库路径，缺省时使用平台数据目录
    pub book_path: Option<PathBuf>,
    /// 随机选手的种子
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            rounds: 10,
            engine: AiConfig::from_difficulty(Difficulty::Hard),
            book_path: None,
            seed: 0,
        }
    }
}

impl ArenaConfig {
    /// 从 JSON 文件读取
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置失败: {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("解析配置失败: {:?}", path))
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isolation_ai::{EvaluatorKind, SearchStrategy};

    #[test]
    fn test_defaults() {
        let config = ArenaConfig::default();
        assert_eq!(config.board_size, 7);
        assert_eq!(config.time_limit_ms, 150);
        assert!(config.engine.use_opening_book);
        assert!(config.book_path.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ArenaConfig::from_json(r#"{"rounds": 2, "seed": 9}"#).unwrap();
        assert_eq!(config.rounds, 2);
        assert_eq!(config.seed, 9);
        assert_eq!(config.board_size, 7);
    }

    #[test]
    fn test_engine_section() {
        let json = r#"{
            "board_size": 5,
            "engine": {
                "strategy": "minimax",
                "evaluator": "open_moves",
                "max_depth": 4,
                "timer_threshold_ms": 5.0,
                "use_opening_book": false,
                "book_ply_cutoff": 3
            }
        }"#;
        let config = ArenaConfig::from_json(json).unwrap();
        assert_eq!(config.board_size, 5);
        assert_eq!(config.engine.strategy, SearchStrategy::Minimax);
        assert_eq!(config.engine.evaluator, EvaluatorKind::OpenMoves);
        assert_eq!(config.engine.max_depth, 4);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("arena.json");
        let config = ArenaConfig {
            rounds: 3,
            ..ArenaConfig::default()
        };
        fs::write(&path, config.to_json().unwrap()).unwrap();

        let loaded = ArenaConfig::load(&path).unwrap();
        assert_eq!(loaded.rounds, 3);
        assert!(ArenaConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
