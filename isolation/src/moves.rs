//! 走法与走法规则

use serde::{Deserialize, Serialize};

use crate::constants::KNIGHT_OFFSETS;
use crate::error::{GameError, Result};
use crate::symmetry::Symmetry;

/// 走法：目标格坐标 (row, col)，从 0 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    /// 无合法走法时对外使用的哨兵坐标
    pub const NONE_PAIR: (i32, i32) = (-1, -1);

    /// 创建新走法
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 检查坐标并创建走法
    pub fn checked(row: i32, col: i32, height: u8, width: u8) -> Result<Self> {
        if row < 0 || col < 0 || row >= height as i32 || col >= width as i32 {
            return Err(GameError::OutOfBounds {
                row,
                col,
                height,
                width,
            });
        }
        Ok(Self::new(row as u8, col as u8))
    }

    /// 按偏移量移动，越界时返回 None
    pub fn offset(&self, dr: i8, dc: i8, height: u8, width: u8) -> Option<Move> {
        let row = self.row as i32 + dr as i32;
        let col = self.col as i32 + dc as i32;
        if row < 0 || col < 0 || row >= height as i32 || col >= width as i32 {
            None
        } else {
            Some(Move::new(row as u8, col as u8))
        }
    }

    /// 转换为整数对，None 对应 (-1, -1)
    pub fn to_pair(mv: Option<Move>) -> (i32, i32) {
        match mv {
            Some(m) => (m.row as i32, m.col as i32),
            None => Self::NONE_PAIR,
        }
    }

    /// 曼哈顿距离
    pub fn manhattan(&self, other: &Move) -> u32 {
        (self.row as i32 - other.row as i32).unsigned_abs()
            + (self.col as i32 - other.col as i32).unsigned_abs()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// 走法规则：一组有序的 (drow, dcol) 偏移
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRule {
    offsets: Vec<(i8, i8)>,
}

impl MoveRule {
    /// 马步规则
    pub fn knight() -> Self {
        Self {
            offsets: KNIGHT_OFFSETS.to_vec(),
        }
    }

    /// 自定义偏移
    pub fn custom(offsets: Vec<(i8, i8)>) -> Result<Self> {
        if offsets.is_empty() {
            return Err(GameError::InvalidRule {
                reason: "no offsets".to_string(),
            });
        }
        if offsets.contains(&(0, 0)) {
            return Err(GameError::InvalidRule {
                reason: "(0, 0) is not a move".to_string(),
            });
        }
        Ok(Self { offsets })
    }

    /// 偏移列表
    pub fn offsets(&self) -> &[(i8, i8)] {
        &self.offsets
    }

    /// 偏移集合在 8 种对称变换下是否封闭
    ///
    /// 不封闭时，对称局面的合法走法不一一对应，开局库不能跨方向复用。
    pub fn is_symmetric(&self) -> bool {
        Symmetry::ALL.iter().all(|tag| {
            self.offsets
                .iter()
                .all(|&(dr, dc)| self.offsets.contains(&tag.apply_offset(dr, dc)))
        })
    }
}

impl Default for MoveRule {
    fn default() -> Self {
        Self::knight()
    }
}
