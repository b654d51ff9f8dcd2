//! 错误类型定义

use thiserror::Error;

/// 规则与领域错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// 无效的棋盘尺寸
    #[error("Invalid board dimensions: {height}x{width}")]
    InvalidDimensions { height: u8, width: u8 },

    /// 坐标越界
    #[error("Move ({row}, {col}) is outside the {height}x{width} board")]
    OutOfBounds {
        row: i32,
        col: i32,
        height: u8,
        width: u8,
    },

    /// 非法走法
    #[error("Illegal move: ({row}, {col})")]
    IllegalMove { row: u8, col: u8 },

    /// 无效的走法规则
    #[error("Invalid move rule: {reason}")]
    InvalidRule { reason: String },

    /// 对称变换只适用于方形棋盘
    #[error("Symmetry transforms require a square board, got {height}x{width}")]
    NotSquare { height: u8, width: u8 },

    /// 无效的对称标记
    #[error("Invalid symmetry tag: {0}")]
    InvalidSymmetry(u8),

    /// 玩家尚未落子
    #[error("Player {0} has not been placed on the board")]
    PlayerNotPlaced(crate::Player),

    /// 反序列化得到的棋盘不满足不变量
    #[error("Invalid board: {reason}")]
    InvalidBoard { reason: String },

    /// 两名玩家位于同一格（距离为 0）
    #[error("Both players occupy ({row}, {col})")]
    CoincidentPlayers { row: u8, col: u8 },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;
