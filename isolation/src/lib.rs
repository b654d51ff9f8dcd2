//! Isolation 规则库
//!
//! 包含:
//! - 玩家、格子、走法等核心数据结构
//! - 马步 / 自定义偏移的走法生成
//! - 棋盘状态（走子后封锁、胜负判定）
//! - 方形棋盘的 8 种对称变换
//! - 对局记录 (JSON)

mod board;
mod constants;
mod error;
mod moves;
mod player;
mod record;
mod symmetry;

pub use board::Board;
pub use constants::*;
pub use error::{GameError, Result};
pub use moves::{Move, MoveRule};
pub use player::{Cell, Player};
pub use record::{GameMetadata, GameRecord, GameResult, LossReason, MoveRecord};
pub use symmetry::Symmetry;
