//! 对局记录格式
//!
//! JSON 格式，记录双方走法、剩余时间与结果

use serde::{Deserialize, Serialize};

use crate::moves::Move;
use crate::player::Player;

/// 记录版本
pub const RECORD_VERSION: &str = "1.0";

/// 判负原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// 轮到走子时无路可走
    NoMoves,
    /// 走了非法格子
    IllegalMove,
    /// 超时
    Timeout,
}

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Player,
    pub reason: LossReason,
}

/// 对局元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    /// 先手名称
    pub first_player: String,
    /// 后手名称
    pub second_player: String,
    pub height: u8,
    pub width: u8,
    /// 每步时限（毫秒）
    pub time_limit_ms: u64,
    pub result: Option<GameResult>,
}

/// 走法记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    /// 目标位置 [row, col]
    pub to: [u8; 2],
    /// 走棋后剩余时间（毫秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_left_ms: Option<f64>,
}

impl MoveRecord {
    pub fn new(player: Player, mv: Move) -> Self {
        Self {
            player,
            to: [mv.row, mv.col],
            time_left_ms: None,
        }
    }

    /// 带剩余时间创建
    pub fn with_time_left(player: Player, mv: Move, time_left_ms: f64) -> Self {
        Self {
            time_left_ms: Some(time_left_ms),
            ..Self::new(player, mv)
        }
    }

    pub fn to_move(&self) -> Move {
        Move::new(self.to[0], self.to[1])
    }
}

/// 完整对局记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub version: String,
    pub metadata: GameMetadata,
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    /// 创建新的对局记录
    pub fn new(
        first_player: String,
        second_player: String,
        height: u8,
        width: u8,
        time_limit_ms: u64,
    ) -> Self {
        Self {
            version: RECORD_VERSION.to_string(),
            metadata: GameMetadata {
                first_player,
                second_player,
                height,
                width,
                time_limit_ms,
                result: None,
            },
            moves: Vec::new(),
        }
    }

    pub fn add_move(&mut self, mv: MoveRecord) {
        self.moves.push(mv);
    }

    pub fn set_result(&mut self, result: GameResult) {
        self.metadata.result = Some(result);
    }

    /// 走法序列
    pub fn move_list(&self) -> Vec<Move> {
        self.moves.iter().map(MoveRecord::to_move).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
